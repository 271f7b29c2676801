//! OIDC plugin expansion and secret resolution
//!
//! A declared plugin carries only what an operator may say: client id,
//! discovery URL, required scopes. The full policy object the gateway wants
//! is computed here, with the client secret pulled from a [`SecretSource`]
//! at write time. Resolution runs on every create and update; stored state
//! is never trusted for the secret, since the source may rotate it.

use crate::error::SyncError;
use crate::gateway::secrets::SecretSource;
use crate::model::{OpenIdConnectPlugin, Plugins};
use serde::{Deserialize, Serialize};

/// Declared subset of the openid-connect plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OidcSpec {
    pub client_id: String,
    pub discovery: String,
    #[serde(default)]
    pub required_scopes: Vec<String>,
}

/// Declared plugin bundle on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PluginsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openid_connect: Option<OidcSpec>,
}

/// Deployment-wide policy constants, injected into the resolver at
/// construction so a deployment can override them without code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcDefaults {
    pub realm: String,
    pub audience: String,
    pub jwk_expires_in: u64,
}

impl Default for OidcDefaults {
    fn default() -> Self {
        Self {
            realm: "silas-apisix-gateway".to_string(),
            audience: "aud".to_string(),
            jwk_expires_in: 600,
        }
    }
}

/// Expands declared plugins into the full policy objects the gateway wants.
pub struct PluginResolver<S> {
    secrets: S,
    defaults: OidcDefaults,
}

impl<S: SecretSource> PluginResolver<S> {
    pub fn new(secrets: S, defaults: OidcDefaults) -> Self {
        Self { secrets, defaults }
    }

    /// Resolve a declared bundle into payload form.
    ///
    /// No plugin declared is the side-effect-free fast path: no secret
    /// lookup, no error. A secret fetch failure aborts the whole write
    /// before anything reaches the gateway.
    pub async fn resolve(
        &self,
        declared: Option<&PluginsSpec>,
    ) -> Result<Option<Plugins>, SyncError> {
        let Some(oidc) = declared.and_then(|p| p.openid_connect.as_ref()) else {
            return Ok(None);
        };

        let secret = self
            .secrets
            .fetch(&oidc.client_id)
            .await
            .map_err(|cause| SyncError::SecretFetch {
                client_id: oidc.client_id.clone(),
                cause,
            })?;

        Ok(Some(Plugins {
            openid_connect: Some(OpenIdConnectPlugin {
                client_id: oidc.client_id.clone(),
                client_secret: secret,
                discovery: oidc.discovery.clone(),
                required_scopes: oidc.required_scopes.clone(),
                bearer_only: true,
                use_jwks: true,
                jwk_expires_in: self.defaults.jwk_expires_in,
                audience_required: true,
                audience: self.defaults.audience.clone(),
                audience_match_client_id: true,
                realm: self.defaults.realm.clone(),
            }),
        }))
    }
}

/// Copy back only the declared subset from a gateway response.
///
/// The secret and the computed policy flags never round-trip into
/// declarative state.
pub fn declared_subset(plugins: Option<&Plugins>) -> Option<PluginsSpec> {
    let oidc = plugins?.openid_connect.as_ref()?;
    Some(PluginsSpec {
        openid_connect: Some(OidcSpec {
            client_id: oidc.client_id.clone(),
            discovery: oidc.discovery.clone(),
            required_scopes: oidc.required_scopes.clone(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct StaticSecret(&'static str);

    #[async_trait]
    impl SecretSource for StaticSecret {
        async fn fetch(&self, _client_id: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSecrets;

    #[async_trait]
    impl SecretSource for FailingSecrets {
        async fn fetch(&self, client_id: &str) -> anyhow::Result<String> {
            Err(anyhow!("vault sealed while fetching `{}`", client_id))
        }
    }

    fn declared() -> PluginsSpec {
        PluginsSpec {
            openid_connect: Some(OidcSpec {
                client_id: "client-id".to_string(),
                discovery: "https://x/jwks.json".to_string(),
                required_scopes: vec!["admin".to_string(), "book".to_string()],
            }),
        }
    }

    #[test]
    fn test_absent_plugin_resolves_to_none() {
        let resolver = PluginResolver::new(StaticSecret("s"), OidcDefaults::default());
        let resolved = tokio_test::block_on(resolver.resolve(None)).unwrap();
        assert!(resolved.is_none());

        let empty = PluginsSpec::default();
        let resolved = tokio_test::block_on(resolver.resolve(Some(&empty))).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn test_resolved_plugin_carries_fixed_policy() {
        let resolver = PluginResolver::new(StaticSecret("from-source"), OidcDefaults::default());
        let declared = declared();

        let resolved = tokio_test::block_on(resolver.resolve(Some(&declared)))
            .unwrap()
            .unwrap();
        let oidc = resolved.openid_connect.unwrap();

        assert_eq!(oidc.client_id, "client-id");
        assert_eq!(oidc.client_secret, "from-source");
        assert_eq!(oidc.discovery, "https://x/jwks.json");
        assert_eq!(oidc.required_scopes, vec!["admin", "book"]);
        assert!(oidc.bearer_only);
        assert!(oidc.use_jwks);
        assert_eq!(oidc.jwk_expires_in, 600);
        assert!(oidc.audience_required);
        assert_eq!(oidc.audience, "aud");
        assert!(oidc.audience_match_client_id);
        assert_eq!(oidc.realm, "silas-apisix-gateway");
    }

    #[test]
    fn test_injected_defaults_override_policy() {
        let defaults = OidcDefaults {
            realm: "uat-gateway".to_string(),
            audience: "azp".to_string(),
            jwk_expires_in: 60,
        };
        let resolver = PluginResolver::new(StaticSecret("s"), defaults);

        let resolved = tokio_test::block_on(resolver.resolve(Some(&declared())))
            .unwrap()
            .unwrap();
        let oidc = resolved.openid_connect.unwrap();
        assert_eq!(oidc.realm, "uat-gateway");
        assert_eq!(oidc.audience, "azp");
        assert_eq!(oidc.jwk_expires_in, 60);
    }

    #[test]
    fn test_secret_failure_surfaces_client_id() {
        let resolver = PluginResolver::new(FailingSecrets, OidcDefaults::default());

        let err = tokio_test::block_on(resolver.resolve(Some(&declared()))).unwrap_err();
        match err {
            SyncError::SecretFetch { client_id, .. } => assert_eq!(client_id, "client-id"),
            other => panic!("expected SecretFetch, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_subset_drops_secret() {
        let resolver = PluginResolver::new(StaticSecret("s3cret"), OidcDefaults::default());
        let resolved = tokio_test::block_on(resolver.resolve(Some(&declared()))).unwrap();

        let subset = declared_subset(resolved.as_ref()).unwrap();
        assert_eq!(subset, declared());
        let json = serde_json::to_string(&subset).unwrap();
        assert!(!json.contains("s3cret"));
    }
}
