//! Admin API interaction module
//!
//! Everything that talks to the gateway lives here: the HTTP layer, the
//! `GatewayClient` seam the reconciler drives, and the secret sources that
//! feed the plugin resolver.
//!
//! # Module Structure
//!
//! - [`client`] - `GatewayClient` trait and the real admin API implementation
//! - [`http`] - HTTP utilities for admin API calls
//! - [`secrets`] - External sources for plugin client secrets
//!
//! # Example
//!
//! ```ignore
//! use crate::config::Settings;
//! use crate::gateway::client::{AdminApi, GatewayClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let api = AdminApi::new(&Settings::from_env()?)?;
//!     let route = api.get_route_by_id("checkout-v2").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod secrets;
