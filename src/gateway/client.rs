//! Admin API client
//!
//! [`GatewayClient`] is the seam the reconciler drives; [`AdminApi`] is the
//! real implementation speaking to an APISIX admin endpoint. Payloads are
//! always the fully-resolved wire models, never raw declarative state.

use super::http::AdminHttp;
use crate::config::Settings;
use crate::error::GatewayError;
use crate::model::{Route, Upstream};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The gateway operations the reconciler needs.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn create_route(&self, route: &Route) -> Result<Route, GatewayError>;
    async fn get_route_by_id(&self, id: &str) -> Result<Route, GatewayError>;
    async fn update_route(&self, route: &Route) -> Result<Route, GatewayError>;
    async fn delete_route_by_id(&self, id: &str) -> Result<(), GatewayError>;

    async fn create_upstream(&self, upstream: &Upstream) -> Result<Upstream, GatewayError>;
    async fn get_upstream_by_id(&self, id: &str) -> Result<Upstream, GatewayError>;
    async fn update_upstream(&self, upstream: &Upstream) -> Result<Upstream, GatewayError>;
    async fn delete_upstream_by_id(&self, id: &str) -> Result<(), GatewayError>;
}

/// Client for the APISIX admin API
#[derive(Clone)]
pub struct AdminApi {
    http: AdminHttp,
    host: String,
    key: String,
}

impl AdminApi {
    /// Create a new admin API client
    pub fn new(settings: &Settings) -> Result<Self, GatewayError> {
        Ok(Self {
            http: AdminHttp::new()?,
            host: settings.host.trim_end_matches('/').to_string(),
            key: settings.key.clone(),
        })
    }

    // =========================================================================
    // Admin API URL helpers
    // =========================================================================

    /// Build the admin API URL for a route
    fn route_url(&self, id: &str) -> String {
        format!("{}/apisix/admin/routes/{}", self.host, id)
    }

    /// Build the admin API URL for an upstream
    fn upstream_url(&self, id: &str) -> String {
        format!("{}/apisix/admin/upstreams/{}", self.host, id)
    }

    /// Unwrap the etcd-style `{"key": ..., "value": {...}}` envelope the
    /// admin API wraps objects in. Plain objects pass through untouched.
    fn unwrap_value(response: Value) -> Value {
        if let Value::Object(map) = &response {
            if let Some(value) = map.get("value") {
                return value.clone();
            }
        }
        response
    }

    /// Create-or-replace semantics: the admin API takes a PUT at the id URL.
    async fn put_object<T>(&self, url: &str, payload: &T) -> Result<T, GatewayError>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = serde_json::to_value(payload)?;
        let response = self.http.put(url, &self.key, &body).await?;
        Ok(serde_json::from_value(Self::unwrap_value(response))?)
    }

    async fn get_object<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let response = self.http.get(url, &self.key).await?;
        Ok(serde_json::from_value(Self::unwrap_value(response))?)
    }
}

#[async_trait]
impl GatewayClient for AdminApi {
    async fn create_route(&self, route: &Route) -> Result<Route, GatewayError> {
        self.put_object(&self.route_url(&route.id), route).await
    }

    async fn get_route_by_id(&self, id: &str) -> Result<Route, GatewayError> {
        self.get_object(&self.route_url(id)).await
    }

    async fn update_route(&self, route: &Route) -> Result<Route, GatewayError> {
        self.put_object(&self.route_url(&route.id), route).await
    }

    async fn delete_route_by_id(&self, id: &str) -> Result<(), GatewayError> {
        self.http.delete(&self.route_url(id), &self.key).await?;
        Ok(())
    }

    async fn create_upstream(&self, upstream: &Upstream) -> Result<Upstream, GatewayError> {
        self.put_object(&self.upstream_url(&upstream.id), upstream)
            .await
    }

    async fn get_upstream_by_id(&self, id: &str) -> Result<Upstream, GatewayError> {
        self.get_object(&self.upstream_url(id)).await
    }

    async fn update_upstream(&self, upstream: &Upstream) -> Result<Upstream, GatewayError> {
        self.put_object(&self.upstream_url(&upstream.id), upstream)
            .await
    }

    async fn delete_upstream_by_id(&self, id: &str) -> Result<(), GatewayError> {
        self.http.delete(&self.upstream_url(id), &self.key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_value_strips_envelope() {
        let enveloped = json!({"key": "/apisix/routes/r1", "value": {"id": "r1"}});
        assert_eq!(AdminApi::unwrap_value(enveloped), json!({"id": "r1"}));
    }

    #[test]
    fn test_unwrap_value_passes_plain_objects() {
        let plain = json!({"id": "r1"});
        assert_eq!(AdminApi::unwrap_value(plain.clone()), plain);
    }
}
