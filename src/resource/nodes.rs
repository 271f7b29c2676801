//! Node set normalization
//!
//! Declarative state describes an upstream's endpoints as an ordered list of
//! `[host, port, weight]` rows; the admin API wants a `host:port` -> weight
//! mapping. Both directions must be deterministic: rebuilding the row list
//! from an unordered map would report a spurious diff on every sync pass
//! even when nothing changed, so rows always come back sorted by key.

use crate::error::SyncError;
use std::collections::BTreeMap;

/// Parse declarative `[host, port, weight]` rows into the canonical mapping.
///
/// Rows may carry extra elements (ignored). A later row with the same
/// `host:port` silently overwrites an earlier one.
pub fn rows_to_nodes(rows: &[Vec<String>]) -> Result<BTreeMap<String, u32>, SyncError> {
    let mut nodes = BTreeMap::new();

    for row in rows {
        let [host, port, weight, ..] = row.as_slice() else {
            return Err(SyncError::MalformedNodeRow {
                row: row.clone(),
                reason: "expected at least [host, port, weight]".to_string(),
            });
        };

        let weight: u32 = weight.parse().map_err(|_| SyncError::MalformedNodeRow {
            row: row.clone(),
            reason: format!("weight `{}` is not a non-negative base-10 integer", weight),
        })?;

        nodes.insert(format!("{}:{}", host, port), weight);
    }

    Ok(nodes)
}

/// Emit declarative rows from the canonical mapping.
///
/// Output is sorted lexicographically by `host:port` key, so equal mappings
/// always produce byte-identical rows regardless of insertion history. The
/// key splits on its last `:`, the exact inverse of the join above.
pub fn nodes_to_rows(nodes: &BTreeMap<String, u32>) -> Vec<Vec<String>> {
    nodes
        .iter()
        .map(|(endpoint, weight)| {
            let (host, port) = endpoint
                .rsplit_once(':')
                .unwrap_or((endpoint.as_str(), ""));
            vec![host.to_string(), port.to_string(), weight.to_string()]
        })
        .collect()
}
