//! Error taxonomy for sync operations
//!
//! Local validation failures never reach the gateway; remote failures are
//! propagated verbatim with an operation label and no retry. "Not found" on
//! read is its own variant so callers can distinguish a missing resource
//! from a transport or auth failure.

use thiserror::Error;

/// Resource kinds handled by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Route,
    Upstream,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Route => f.write_str("route"),
            ResourceKind::Upstream => f.write_str("upstream"),
        }
    }
}

/// Errors produced by the admin API HTTP layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The admin API answered with a non-success status.
    #[error("admin API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode admin API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The admin API has no object under the requested id.
    #[error("not found")]
    NotFound,
}

/// Everything a reconciliation call can fail with.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A declarative node row could not be parsed. Local failure; the
    /// gateway is never contacted.
    #[error("malformed node row {row:?}: {reason}")]
    MalformedNodeRow { row: Vec<String>, reason: String },

    /// The resource has no id; ids are caller-assigned and required.
    #[error("{kind} is missing an id")]
    MissingId { kind: ResourceKind },

    /// The secret source failed; the write was aborted before any remote
    /// call.
    #[error("failed to fetch client secret for `{client_id}`: {cause}")]
    SecretFetch {
        client_id: String,
        cause: anyhow::Error,
    },

    /// A gateway call failed. The underlying error is surfaced verbatim.
    #[error("{op} failed: {cause}")]
    Remote {
        op: &'static str,
        cause: GatewayError,
    },

    /// Read found nothing under the id. Distinct from transport failure so
    /// the caller can drop the resource from its state.
    #[error("{kind} `{id}` does not exist on the gateway")]
    Absent { kind: ResourceKind, id: String },
}
