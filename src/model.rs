//! Admin API wire models
//!
//! Serde representations of what the gateway admin API consumes and returns.
//! These are the fully-resolved payload forms: defaults filled in, secrets
//! resolved. `vars` and `labels` are opaque JSON trees; the sync engine
//! carries them through untouched and never looks inside.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A route as the admin API sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Route {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uris: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub upstream_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Timeout>,
    #[serde(default)]
    pub status: i32,
}

/// An upstream pool as the admin API sees it.
///
/// Nodes live in a `BTreeMap` so iteration and serialization order are
/// deterministic regardless of how the map was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Upstream {
    pub id: String,
    /// Load balancer type: roundrobin, chash, ewma.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub lb_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, u32>,
    #[serde(default)]
    pub retries: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pass_host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub upstream_host: String,
}

/// Plugin bundle attached to a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Plugins {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openid_connect: Option<OpenIdConnectPlugin>,
}

/// The full openid-connect policy object the gateway requires.
///
/// Only `client_id`, `discovery` and `required_scopes` come from declared
/// state; everything else is computed by the plugin resolver on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OpenIdConnectPlugin {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    pub discovery: String,
    #[serde(default)]
    pub required_scopes: Vec<String>,
    #[serde(default)]
    pub bearer_only: bool,
    #[serde(default)]
    pub use_jwks: bool,
    #[serde(default)]
    pub jwk_expires_in: u64,
    #[serde(default)]
    pub audience_required: bool,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub audience_match_client_id: bool,
    #[serde(default)]
    pub realm: String,
}

/// Route timeouts in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Timeout {
    #[serde(default)]
    pub connect: u64,
    #[serde(default)]
    pub send: u64,
    #[serde(default)]
    pub read: u64,
}
