//! Upstream resource
//!
//! Declarative model of an upstream server pool and its conversions to and
//! from the admin API wire form.

use crate::error::{ResourceKind, SyncError};
use crate::model;
use crate::resource::defaults::enforce_upstream_host;
use crate::resource::nodes::{nodes_to_rows, rows_to_nodes};
use serde::{Deserialize, Serialize};

/// Declarative description of an upstream pool.
///
/// Nodes are ordered `[host, port, weight]` rows in declared state and a
/// canonical weight map on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UpstreamSpec {
    pub id: String,
    /// Load balancer type: roundrobin, chash, ewma.
    #[serde(rename = "type", default)]
    pub lb_type: String,
    #[serde(default)]
    pub nodes: Vec<Vec<String>>,
    #[serde(default)]
    pub retries: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub pass_host: String,
    #[serde(default)]
    pub upstream_host: String,
}

impl UpstreamSpec {
    /// Build the full admin API payload from this spec.
    ///
    /// The `upstream_host`/`pass_host` invariant is applied to the payload
    /// itself, not just to responses, so the gateway never sees a host
    /// override outside rewrite mode.
    pub fn to_api(&self) -> Result<model::Upstream, SyncError> {
        if self.id.is_empty() {
            return Err(SyncError::MissingId {
                kind: ResourceKind::Upstream,
            });
        }

        Ok(model::Upstream {
            id: self.id.clone(),
            lb_type: self.lb_type.clone(),
            nodes: rows_to_nodes(&self.nodes)?,
            retries: self.retries,
            name: self.name.clone(),
            desc: self.desc.clone(),
            pass_host: self.pass_host.clone(),
            upstream_host: enforce_upstream_host(&self.pass_host, &self.upstream_host),
        })
    }

    /// Canonical declarative form of an admin API response.
    ///
    /// Node rows come back sorted by endpoint, and the host invariant is
    /// re-applied rather than trusting whatever the gateway stored.
    pub fn from_api(upstream: model::Upstream) -> Self {
        Self {
            id: upstream.id,
            lb_type: upstream.lb_type,
            nodes: nodes_to_rows(&upstream.nodes),
            retries: upstream.retries,
            name: upstream.name,
            desc: upstream.desc,
            upstream_host: enforce_upstream_host(&upstream.pass_host, &upstream.upstream_host),
            pass_host: upstream.pass_host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> UpstreamSpec {
        UpstreamSpec {
            id: "common".to_string(),
            lb_type: "roundrobin".to_string(),
            nodes: vec![vec![
                "127.0.0.1".to_string(),
                "80".to_string(),
                "1".to_string(),
            ]],
            retries: 3,
            name: "common".to_string(),
            desc: "Common upstream, forward requests to ingress".to_string(),
            pass_host: "pass".to_string(),
            upstream_host: "ignored.example".to_string(),
        }
    }

    #[test]
    fn test_to_api_requires_id() {
        let err = UpstreamSpec::default().to_api().unwrap_err();
        assert!(matches!(
            err,
            SyncError::MissingId {
                kind: ResourceKind::Upstream
            }
        ));
    }

    #[test]
    fn test_to_api_normalizes_nodes_and_host() {
        let upstream = spec().to_api().unwrap();
        assert_eq!(upstream.nodes["127.0.0.1:80"], 1);
        // pass mode: whatever was declared is overridden in the payload
        assert_eq!(upstream.upstream_host, "invalid");
    }

    #[test]
    fn test_to_api_keeps_host_under_rewrite() {
        let mut declared = spec();
        declared.pass_host = "rewrite".to_string();
        declared.upstream_host = "127.0.0.2:80".to_string();

        let upstream = declared.to_api().unwrap();
        assert_eq!(upstream.upstream_host, "127.0.0.2:80");
    }

    #[test]
    fn test_to_api_rejects_malformed_nodes() {
        let mut declared = spec();
        declared.nodes = vec![vec!["127.0.0.1".to_string(), "80".to_string()]];
        assert!(matches!(
            declared.to_api().unwrap_err(),
            SyncError::MalformedNodeRow { .. }
        ));
    }

    #[test]
    fn test_from_api_re_applies_host_invariant() {
        let mut upstream = spec().to_api().unwrap();
        // Simulate a gateway that stored a stale host despite pass mode.
        upstream.upstream_host = "stale.example".to_string();

        let back = UpstreamSpec::from_api(upstream);
        assert_eq!(back.upstream_host, "invalid");
    }

    #[test]
    fn test_round_trip_is_fixed_point() {
        let mut declared = spec();
        declared.upstream_host = String::new();
        // Unsorted declared rows normalize once, then stay put.
        declared.nodes = vec![
            vec!["b.internal".to_string(), "80".to_string(), "2".to_string()],
            vec!["a.internal".to_string(), "80".to_string(), "1".to_string()],
        ];

        let once = UpstreamSpec::from_api(declared.to_api().unwrap());
        let twice = UpstreamSpec::from_api(once.to_api().unwrap());
        assert_eq!(once, twice);
        assert_eq!(
            once.nodes,
            vec![
                vec!["a.internal".to_string(), "80".to_string(), "1".to_string()],
                vec!["b.internal".to_string(), "80".to_string(), "2".to_string()],
            ]
        );
    }
}
