//! Route resource
//!
//! Declarative model of a gateway route and its conversions to and from the
//! admin API wire form.

use crate::error::{ResourceKind, SyncError};
use crate::gateway::secrets::SecretSource;
use crate::model::{self, Timeout};
use crate::resource::defaults::{timeout_or_default, STATUS_ENABLED};
use crate::resource::plugins::{declared_subset, PluginResolver, PluginsSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declarative description of a gateway route.
///
/// `vars` and `labels` are opaque to the sync engine and round-trip
/// untouched. There is no `client_secret` here by construction; secrets
/// come from a secret source at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RouteSpec {
    pub id: String,
    #[serde(default)]
    pub uris: Vec<String>,
    #[serde(default)]
    pub upstream_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginsSpec>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub vars: Vec<Value>,
    #[serde(default)]
    pub labels: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Timeout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl RouteSpec {
    /// Build the full admin API payload from this spec.
    ///
    /// The payload is rebuilt from scratch on every call: defaults are
    /// filled, the plugin secret is resolved fresh, and nothing is carried
    /// over from previously stored state.
    pub async fn to_api<S: SecretSource>(
        &self,
        resolver: &PluginResolver<S>,
    ) -> Result<model::Route, SyncError> {
        if self.id.is_empty() {
            return Err(SyncError::MissingId {
                kind: ResourceKind::Route,
            });
        }

        Ok(model::Route {
            id: self.id.clone(),
            uris: self.uris.clone(),
            upstream_id: self.upstream_id.clone(),
            plugins: resolver.resolve(self.plugins.as_ref()).await?,
            name: self.name.clone(),
            desc: self.desc.clone(),
            hosts: self.hosts.clone(),
            methods: self.methods.clone(),
            priority: self.priority,
            vars: self.vars.clone(),
            labels: self.labels.clone(),
            timeout: Some(timeout_or_default(self.timeout)),
            status: self.status.unwrap_or(STATUS_ENABLED),
        })
    }

    /// Canonical declarative form of an admin API response.
    ///
    /// Only the declared plugin subset comes back; the secret stays out of
    /// declarative state.
    pub fn from_api(route: model::Route) -> Self {
        Self {
            id: route.id,
            uris: route.uris,
            upstream_id: route.upstream_id,
            plugins: declared_subset(route.plugins.as_ref()),
            name: route.name,
            desc: route.desc,
            hosts: route.hosts,
            methods: route.methods,
            priority: route.priority,
            vars: route.vars,
            labels: route.labels,
            timeout: route.timeout,
            status: Some(route.status),
        }
    }
}
