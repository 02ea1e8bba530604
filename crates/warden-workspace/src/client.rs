use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::types::{App, ListAppsResponse, ListEndpointsResponse, ServingEndpoint};

const HOST_ENV: &str = "DATABRICKS_HOST";
const TOKEN_ENV: &str = "DATABRICKS_TOKEN";

/// Shape of a Databricks error response body.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// A synchronous client for the Databricks workspace REST API.
///
/// One best-effort request per operation: no retries, no cancellation.
/// A hung call is bounded only by the 30s request timeout.
#[derive(Debug)]
pub struct WorkspaceClient {
    http: reqwest::blocking::Client,
    host: String,
    token: String,
}

impl WorkspaceClient {
    /// Build a client from `DATABRICKS_HOST` and `DATABRICKS_TOKEN`.
    ///
    /// This mirrors the environment authentication used by Databricks
    /// job clusters, where both variables are injected by the runtime.
    pub fn from_env() -> Result<Self, ApiError> {
        let host = std::env::var(HOST_ENV)
            .map_err(|_| ApiError::MissingCredentials { variable: HOST_ENV })?;
        let token = std::env::var(TOKEN_ENV).map_err(|_| ApiError::MissingCredentials {
            variable: TOKEN_ENV,
        })?;

        Self::new(&host, &token)
    }

    /// Build a client for an explicit host and token.
    pub fn new(host: &str, token: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            host: normalize_host(host),
            token: token.to_string(),
        })
    }

    /// The normalized workspace URL this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// List every Databricks app in the workspace, following pagination.
    pub fn list_apps(&self) -> Result<Vec<App>, ApiError> {
        let mut apps = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, &str)> = Vec::new();
            if let Some(token) = page_token.as_deref() {
                query.push(("page_token", token));
            }

            let page: ListAppsResponse = self.get("/api/2.0/apps", &query)?;
            apps.extend(page.apps);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        info!(event = "workspace.apps_listed", count = apps.len());
        Ok(apps)
    }

    /// Delete a Databricks app by name.
    pub fn delete_app(&self, name: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/2.0/apps/{}", name))?;
        info!(event = "workspace.app_deleted", name = name);
        Ok(())
    }

    /// List every model serving endpoint in the workspace.
    pub fn list_serving_endpoints(&self) -> Result<Vec<ServingEndpoint>, ApiError> {
        let response: ListEndpointsResponse = self.get("/api/2.0/serving-endpoints", &[])?;

        info!(
            event = "workspace.endpoints_listed",
            count = response.endpoints.len()
        );
        Ok(response.endpoints)
    }

    /// Delete a model serving endpoint by name.
    pub fn delete_serving_endpoint(&self, name: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/2.0/serving-endpoints/{}", name))?;
        info!(event = "workspace.endpoint_deleted", name = name);
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = format!("{}{}", self.host, path);
        debug!(event = "workspace.request", method = "GET", url = %url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;

        let response = check_status(response)?;
        response.json::<T>().map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.host, path);
        debug!(event = "workspace.request", method = "DELETE", url = %url);

        let response = self.http.delete(&url).bearer_auth(&self.token).send()?;

        check_status(response)?;
        Ok(())
    }
}

/// Convert a non-success response into `ApiError::Api`, decoding the
/// Databricks `{"error_code", "message"}` body when present.
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(parse_error_body(status.as_u16(), &body))
}

fn parse_error_body(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or(ErrorBody {
        error_code: None,
        message: None,
    });

    ApiError::Api {
        status,
        code: parsed.error_code.unwrap_or_else(|| "UNKNOWN".to_string()),
        message: parsed
            .message
            .unwrap_or_else(|| truncate_body(body).to_string()),
    }
}

fn truncate_body(body: &str) -> &str {
    let trimmed = body.trim();
    trimmed.get(..200).unwrap_or(trimmed)
}

fn normalize_host(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
