//! Reconciliation driver
//!
//! Maps declarative specs to admin API payloads on writes and API responses
//! back to canonical declarative form on reads. Each operation is a single
//! round trip through the [`GatewayClient`]; nothing is cached or retried
//! here, and no state survives between calls.

use crate::error::{GatewayError, ResourceKind, SyncError};
use crate::gateway::client::GatewayClient;
use crate::gateway::secrets::SecretSource;
use crate::resource::plugins::{OidcDefaults, PluginResolver};
use crate::resource::route::RouteSpec;
use crate::resource::upstream::UpstreamSpec;

/// Drives create/read/update/delete for routes and upstreams.
pub struct Reconciler<C, S> {
    client: C,
    resolver: PluginResolver<S>,
}

impl<C: GatewayClient, S: SecretSource> Reconciler<C, S> {
    pub fn new(client: C, secrets: S, defaults: OidcDefaults) -> Self {
        Self {
            client,
            resolver: PluginResolver::new(secrets, defaults),
        }
    }

    // =========================================================================
    // Routes
    // =========================================================================

    /// Create a route and return its canonical post-create form.
    pub async fn create_route(&self, spec: &RouteSpec) -> Result<RouteSpec, SyncError> {
        let payload = spec.to_api(&self.resolver).await?;
        let created = self
            .client
            .create_route(&payload)
            .await
            .map_err(|cause| SyncError::Remote {
                op: "create route",
                cause,
            })?;

        tracing::debug!("created route {}", created.id);
        Ok(RouteSpec::from_api(created))
    }

    /// Read a route by id. Not-found is [`SyncError::Absent`] so the caller
    /// can drop the resource from its state; everything else is `Remote`.
    pub async fn read_route(&self, id: &str) -> Result<RouteSpec, SyncError> {
        match self.client.get_route_by_id(id).await {
            Ok(route) => Ok(RouteSpec::from_api(route)),
            Err(GatewayError::NotFound) => Err(SyncError::Absent {
                kind: ResourceKind::Route,
                id: id.to_string(),
            }),
            Err(cause) => Err(SyncError::Remote {
                op: "read route",
                cause,
            }),
        }
    }

    /// Full-replace update: the payload is rebuilt from the new desired
    /// state, so optional fields omitted there are cleared remotely rather
    /// than merged. Last write wins.
    pub async fn update_route(&self, spec: &RouteSpec) -> Result<RouteSpec, SyncError> {
        let payload = spec.to_api(&self.resolver).await?;
        let updated = self
            .client
            .update_route(&payload)
            .await
            .map_err(|cause| SyncError::Remote {
                op: "update route",
                cause,
            })?;

        tracing::debug!("updated route {}", updated.id);
        Ok(RouteSpec::from_api(updated))
    }

    /// Delete a route. Already-absent counts as done; transport and auth
    /// failures do not.
    pub async fn delete_route(&self, id: &str) -> Result<(), SyncError> {
        match self.client.delete_route_by_id(id).await {
            Ok(()) => {
                tracing::debug!("deleted route {}", id);
                Ok(())
            }
            Err(GatewayError::NotFound) => {
                tracing::warn!("route {} already absent, nothing to delete", id);
                Ok(())
            }
            Err(cause) => Err(SyncError::Remote {
                op: "delete route",
                cause,
            }),
        }
    }

    /// Converge one route: create it if absent, otherwise full-replace
    /// update.
    pub async fn apply_route(&self, spec: &RouteSpec) -> Result<RouteSpec, SyncError> {
        match self.read_route(&spec.id).await {
            Ok(_) => self.update_route(spec).await,
            Err(SyncError::Absent { .. }) => self.create_route(spec).await,
            Err(err) => Err(err),
        }
    }

    // =========================================================================
    // Upstreams
    // =========================================================================

    /// Create an upstream and return its canonical post-create form.
    pub async fn create_upstream(&self, spec: &UpstreamSpec) -> Result<UpstreamSpec, SyncError> {
        let payload = spec.to_api()?;
        let created = self
            .client
            .create_upstream(&payload)
            .await
            .map_err(|cause| SyncError::Remote {
                op: "create upstream",
                cause,
            })?;

        tracing::debug!("created upstream {}", created.id);
        Ok(UpstreamSpec::from_api(created))
    }

    /// Read an upstream by id, classifying not-found as `Absent`.
    pub async fn read_upstream(&self, id: &str) -> Result<UpstreamSpec, SyncError> {
        match self.client.get_upstream_by_id(id).await {
            Ok(upstream) => Ok(UpstreamSpec::from_api(upstream)),
            Err(GatewayError::NotFound) => Err(SyncError::Absent {
                kind: ResourceKind::Upstream,
                id: id.to_string(),
            }),
            Err(cause) => Err(SyncError::Remote {
                op: "read upstream",
                cause,
            }),
        }
    }

    /// Full-replace update for an upstream.
    pub async fn update_upstream(&self, spec: &UpstreamSpec) -> Result<UpstreamSpec, SyncError> {
        let payload = spec.to_api()?;
        let updated = self
            .client
            .update_upstream(&payload)
            .await
            .map_err(|cause| SyncError::Remote {
                op: "update upstream",
                cause,
            })?;

        tracing::debug!("updated upstream {}", updated.id);
        Ok(UpstreamSpec::from_api(updated))
    }

    /// Delete an upstream; already-absent counts as done.
    pub async fn delete_upstream(&self, id: &str) -> Result<(), SyncError> {
        match self.client.delete_upstream_by_id(id).await {
            Ok(()) => {
                tracing::debug!("deleted upstream {}", id);
                Ok(())
            }
            Err(GatewayError::NotFound) => {
                tracing::warn!("upstream {} already absent, nothing to delete", id);
                Ok(())
            }
            Err(cause) => Err(SyncError::Remote {
                op: "delete upstream",
                cause,
            }),
        }
    }

    /// Converge one upstream: create it if absent, otherwise update.
    pub async fn apply_upstream(&self, spec: &UpstreamSpec) -> Result<UpstreamSpec, SyncError> {
        match self.read_upstream(&spec.id).await {
            Ok(_) => self.update_upstream(spec).await,
            Err(SyncError::Absent { .. }) => self.create_upstream(spec).await,
            Err(err) => Err(err),
        }
    }
}
