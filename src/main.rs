//! sixsync - declarative sync for the APISIX admin API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sixsync::config::{FileConfig, Settings};
use sixsync::gateway::client::AdminApi;
use sixsync::gateway::secrets::EnvSecretSource;
use sixsync::resource::{Reconciler, Snapshot};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Declarative sync for Apache APISIX
#[derive(Parser, Debug)]
#[command(name = "sixsync", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile a declarative snapshot against the gateway
    Apply {
        /// Snapshot file (YAML)
        #[arg(short, long)]
        file: PathBuf,

        /// Write the canonical post-sync snapshot here (JSON)
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Delete everything a snapshot declares
    Destroy {
        /// Snapshot file (YAML)
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .expect("Failed to open log file");

            let (non_blocking, guard) = tracing_appender::non_blocking(file);

            tracing_subscriber::fmt()
                .with_max_level(tracing_level)
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(tracing_level)
                .with_writer(std::io::stderr)
                .init();

            None
        }
    }
}

fn load_snapshot(file: &Path) -> Result<Snapshot> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("{} is not a valid snapshot", file.display()))
}

async fn apply(
    recon: &Reconciler<AdminApi, EnvSecretSource>,
    file: &Path,
    state: Option<&Path>,
) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let mut synced = Snapshot::default();

    // Upstreams first: routes reference them by id.
    for upstream in &snapshot.upstreams {
        let result = recon.apply_upstream(upstream).await?;
        tracing::info!("upstream {} in sync", result.id);
        synced.upstreams.push(result);
    }
    for route in &snapshot.routes {
        let result = recon.apply_route(route).await?;
        tracing::info!("route {} in sync", result.id);
        synced.routes.push(result);
    }

    if let Some(path) = state {
        let content = serde_json::to_string_pretty(&synced)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    println!(
        "Synced {} upstream(s), {} route(s)",
        synced.upstreams.len(),
        synced.routes.len()
    );
    Ok(())
}

async fn destroy(recon: &Reconciler<AdminApi, EnvSecretSource>, file: &Path) -> Result<()> {
    let snapshot = load_snapshot(file)?;

    // Reverse of apply: routes go before the upstreams they reference.
    for route in &snapshot.routes {
        recon.delete_route(&route.id).await?;
        tracing::info!("route {} deleted", route.id);
    }
    for upstream in &snapshot.upstreams {
        recon.delete_upstream(&upstream.id).await?;
        tracing::info!("upstream {} deleted", upstream.id);
    }

    println!(
        "Deleted {} route(s), {} upstream(s)",
        snapshot.routes.len(),
        snapshot.upstreams.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_deref());

    let settings = Settings::from_env()?;
    let client = AdminApi::new(&settings).context("failed to build admin API client")?;
    let config = FileConfig::load();
    let recon = Reconciler::new(client, EnvSecretSource, config.oidc_defaults());

    match args.command {
        Command::Apply { file, state } => apply(&recon, &file, state.as_deref()).await,
        Command::Destroy { file } => destroy(&recon, &file).await,
    }
}
