//! Fixed defaults and gateway-enforced invariants

use crate::model::Timeout;

/// Timeout in seconds applied when declared state has none
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Route status value for an enabled route
pub const STATUS_ENABLED: i32 = 1;

/// `pass_host` mode under which `upstream_host` is meaningful
pub const PASS_HOST_REWRITE: &str = "rewrite";

/// Sentinel the gateway stores for `upstream_host` in every other mode
pub const INVALID_UPSTREAM_HOST: &str = "invalid";

/// Fill the timeout with `{5,5,5}` when absent.
///
/// A present timeout passes through as-is: a field the operator left off a
/// partial timeout object stays zero rather than picking up the default.
pub fn timeout_or_default(declared: Option<Timeout>) -> Timeout {
    declared.unwrap_or(Timeout {
        connect: DEFAULT_TIMEOUT_SECS,
        send: DEFAULT_TIMEOUT_SECS,
        read: DEFAULT_TIMEOUT_SECS,
    })
}

/// Keep `upstream_host` consistent with `pass_host`.
///
/// The declared value is only meaningful in rewrite mode; in every other
/// mode the gateway stores the `invalid` sentinel, so that is what goes in
/// both the payload and the canonical snapshot. Never trusts a stale stored
/// value.
pub fn enforce_upstream_host(pass_host: &str, upstream_host: &str) -> String {
    if pass_host == PASS_HOST_REWRITE {
        upstream_host.to_string()
    } else {
        INVALID_UPSTREAM_HOST.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_timeout_gets_default() {
        let timeout = timeout_or_default(None);
        assert_eq!(
            timeout,
            Timeout {
                connect: 5,
                send: 5,
                read: 5
            }
        );
    }

    #[test]
    fn test_present_timeout_passes_through() {
        let declared = Timeout {
            connect: 10,
            send: 30,
            read: 30,
        };
        assert_eq!(timeout_or_default(Some(declared)), declared);
    }

    #[test]
    fn test_partial_timeout_keeps_zero_fields() {
        // A present-but-partial timeout does not get per-field defaults.
        let declared: Timeout = serde_json::from_str(r#"{"connect": 10}"#).unwrap();
        let timeout = timeout_or_default(Some(declared));
        assert_eq!(timeout.connect, 10);
        assert_eq!(timeout.send, 0);
        assert_eq!(timeout.read, 0);
    }

    #[test]
    fn test_upstream_host_invalid_outside_rewrite() {
        assert_eq!(enforce_upstream_host("pass", "X"), "invalid");
        assert_eq!(enforce_upstream_host("", "X"), "invalid");
        assert_eq!(enforce_upstream_host("node", "X"), "invalid");
    }

    #[test]
    fn test_upstream_host_kept_under_rewrite() {
        assert_eq!(
            enforce_upstream_host("rewrite", "127.0.0.2:80"),
            "127.0.0.2:80"
        );
    }
}
