//! Wire types for the Databricks REST API.
//!
//! Every optional field is tolerated individually: a missing field
//! deserializes to its default rather than failing the whole listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Databricks app as returned by `GET /api/2.0/apps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub status: Option<AppStatus>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

/// Nested app lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStatus {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListAppsResponse {
    #[serde(default)]
    pub apps: Vec<App>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A model serving endpoint as returned by `GET /api/2.0/serving-endpoints`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingEndpoint {
    pub name: String,
    #[serde(default)]
    pub state: Option<EndpointState>,
    #[serde(default)]
    pub creator: Option<String>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub creation_timestamp: Option<i64>,
}

/// Nested endpoint state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointState {
    #[serde(default)]
    pub ready: Option<String>,
    #[serde(default)]
    pub config_update: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListEndpointsResponse {
    #[serde(default)]
    pub endpoints: Vec<ServingEndpoint>,
}
