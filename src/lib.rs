//! Declarative sync for the Apache APISIX admin API
//!
//! sixsync reconciles declaratively described routing objects (routes and
//! upstream server pools) against a live gateway. Desired state goes in,
//! the exact admin API payload goes out (with computed defaults and secrets
//! resolved at write time), and the gateway's response comes back normalized
//! into a canonical declarative form, so running the same sync twice on
//! unchanged state produces no diff.
//!
//! # Module Structure
//!
//! - [`config`] - Admin endpoint settings and on-disk policy overrides
//! - [`error`] - Typed error taxonomy for sync operations
//! - [`gateway`] - Admin API client, HTTP layer, and secret sources
//! - [`model`] - Wire models of what the admin API consumes and returns
//! - [`resource`] - Declarative models, normalization, and the reconciler

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod resource;
