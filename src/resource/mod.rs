//! Declarative resources and reconciliation
//!
//! The declarative side of the sync engine: caller-visible resource specs,
//! the normalization passes that turn them into exact admin API payloads
//! (and gateway responses back into canonical declarative form), and the
//! reconciler that drives create/read/update/delete.
//!
//! # Architecture
//!
//! - [`nodes`] - Node set normalization between row lists and weight maps
//! - [`defaults`] - Fixed defaults and gateway-enforced invariants
//! - [`plugins`] - OIDC plugin expansion and secret resolution
//! - [`route`] / [`upstream`] - Declarative models and API conversions
//! - [`reconciler`] - CRUD driver against a [`GatewayClient`]
//!
//! [`GatewayClient`]: crate::gateway::client::GatewayClient

pub mod defaults;
pub mod nodes;
pub mod plugins;
pub mod reconciler;
pub mod route;
pub mod upstream;

use serde::{Deserialize, Serialize};

pub use reconciler::Reconciler;
pub use route::RouteSpec;
pub use upstream::UpstreamSpec;

/// A declarative desired-state snapshot: every routing object the operator
/// wants on the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub upstreams: Vec<UpstreamSpec>,
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}
