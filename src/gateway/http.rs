//! HTTP utilities for admin API calls

use crate::error::GatewayError;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

/// Header carrying the admin key
const API_KEY_HEADER: &str = "X-API-KEY";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for admin API calls
///
/// Security: the admin key travels in a header and is never logged.
#[derive(Clone)]
pub struct AdminHttp {
    client: Client,
}

impl AdminHttp {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(concat!("sixsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request to the admin API
    pub async fn get(&self, url: &str, key: &str) -> Result<Value, GatewayError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, key)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Make a PUT request to the admin API
    pub async fn put(&self, url: &str, key: &str, body: &Value) -> Result<Value, GatewayError> {
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(url)
            .header(API_KEY_HEADER, key)
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Make a DELETE request to the admin API
    pub async fn delete(&self, url: &str, key: &str) -> Result<Value, GatewayError> {
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .header(API_KEY_HEADER, key)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode(response: Response) -> Result<Value, GatewayError> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }

        if !status.is_success() {
            // Security: only log sanitized/truncated error bodies
            tracing::error!("admin API error: {} - {}", status, sanitize_for_log(&body));
            return Err(GatewayError::Status {
                status,
                body: sanitize_for_log(&body),
            });
        }

        // Handle empty response
        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
        assert!(sanitized.len() < body.len());
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        let sanitized = sanitize_for_log("ok\x1b[31m\nline");
        assert_eq!(sanitized, "ok[31mline");
    }
}
