//! External sources for plugin client secrets
//!
//! Client secrets are never part of declared state; the plugin resolver
//! pulls them from a [`SecretSource`] at write time, so version-controlled
//! snapshots stay free of secret material.

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Where OIDC client secrets come from.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetch the current secret for a client id.
    async fn fetch(&self, client_id: &str) -> Result<String>;
}

/// Env var prefix for client secrets
const ENV_PREFIX: &str = "SIXSYNC_CLIENT_SECRET_";

/// Reads client secrets from environment variables.
///
/// `checkout-client` resolves through `SIXSYNC_CLIENT_SECRET_CHECKOUT_CLIENT`;
/// anything that is not alphanumeric maps to `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretSource;

impl EnvSecretSource {
    fn var_name(client_id: &str) -> String {
        let suffix: String = client_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", ENV_PREFIX, suffix)
    }
}

#[async_trait]
impl SecretSource for EnvSecretSource {
    async fn fetch(&self, client_id: &str) -> Result<String> {
        let name = Self::var_name(client_id);
        std::env::var(&name).with_context(|| format!("env `{}` not set", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name_mapping() {
        assert_eq!(
            EnvSecretSource::var_name("checkout-client"),
            "SIXSYNC_CLIENT_SECRET_CHECKOUT_CLIENT"
        );
        assert_eq!(
            EnvSecretSource::var_name("a.b c"),
            "SIXSYNC_CLIENT_SECRET_A_B_C"
        );
    }

    #[test]
    fn test_fetch_reads_env() {
        std::env::set_var("SIXSYNC_CLIENT_SECRET_UNIT_TEST_ID", "s3cret");
        let secret = tokio_test::block_on(EnvSecretSource.fetch("unit-test-id")).unwrap();
        assert_eq!(secret, "s3cret");
    }

    #[test]
    fn test_fetch_fails_when_unset() {
        let err = tokio_test::block_on(EnvSecretSource.fetch("never-set-anywhere"));
        assert!(err.is_err());
    }
}
