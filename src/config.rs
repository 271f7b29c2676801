//! Runtime settings
//!
//! The admin endpoint and key come from the environment, the same contract
//! the gateway's own tooling uses, so they never land in snapshot files.
//! Deployment-wide OIDC policy may be overridden from a config file under
//! the user config dir.

use crate::resource::plugins::OidcDefaults;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var naming the admin API address, e.g. `http://127.0.0.1:9180`
pub const APISIX_HOST: &str = "APISIX_HOST";

/// Env var holding the admin API key
pub const APISIX_KEY: &str = "APISIX_KEY";

/// Connection settings for the admin API.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub key: String,
}

impl Settings {
    /// Resolve settings from the environment.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var(APISIX_HOST).with_context(|| {
            format!("env `{APISIX_HOST}` not set; it must point at the gateway admin API")
        })?;
        if host.is_empty() {
            bail!("env `{APISIX_HOST}` is empty; it must point at the gateway admin API");
        }
        url::Url::parse(&host)
            .with_context(|| format!("env `{APISIX_HOST}` is not a valid URL: `{host}`"))?;

        let key = std::env::var(APISIX_KEY).with_context(|| {
            format!("env `{APISIX_KEY}` not set; it authenticates against the admin API")
        })?;
        if key.is_empty() {
            bail!("env `{APISIX_KEY}` is empty; it authenticates against the admin API");
        }

        Ok(Self { host, key })
    }
}

/// Optional on-disk overrides for deployment-wide plugin policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub oidc: Option<OidcDefaults>,
}

impl FileConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sixsync").join("config.json"))
    }

    /// Load configuration from disk; missing or unreadable files mean
    /// built-in defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Effective OIDC policy (file override > built-in defaults).
    pub fn oidc_defaults(&self) -> OidcDefaults {
        self.oidc.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oidc_defaults_fall_back() {
        let config = FileConfig::default();
        assert_eq!(config.oidc_defaults(), OidcDefaults::default());
    }

    #[test]
    fn test_oidc_overrides_parse() {
        let config: FileConfig = serde_json::from_str(
            r#"{"oidc": {"realm": "uat-gateway", "audience": "aud", "jwk_expires_in": 300}}"#,
        )
        .unwrap();
        assert_eq!(config.oidc_defaults().realm, "uat-gateway");
        assert_eq!(config.oidc_defaults().jwk_expires_in, 300);
    }
}
