//! Synchronous Databricks workspace REST client.
//!
//! Provides `WorkspaceClient` with typed list/delete operations for the
//! resource kinds warden enforces (apps, model serving endpoints).
//! Authentication comes from the standard `DATABRICKS_HOST` /
//! `DATABRICKS_TOKEN` environment variables. Used by `warden-core`'s
//! resource handlers; carries no enforcement logic of its own.

mod client;
mod errors;
mod types;

pub use client::WorkspaceClient;
pub use errors::ApiError;
pub use types::{App, AppStatus, EndpointState, ServingEndpoint};
