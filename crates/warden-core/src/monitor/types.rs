use chrono::{DateTime, Utc};
use serde::Serialize;

use super::errors::MonitorError;

/// Resource kinds the monitor can enforce.
///
/// Closed set: each variant has a handler implementation and a packaged
/// default whitelist. Unknown names fail at parse time, before any
/// network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Apps,
    ModelEndpoints,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Apps => "apps",
            ResourceType::ModelEndpoints => "model_endpoints",
        }
    }

    /// Every supported resource type, in display order.
    pub fn all() -> &'static [ResourceType] {
        &[ResourceType::Apps, ResourceType::ModelEndpoints]
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apps" => Ok(ResourceType::Apps),
            "model_endpoints" => Ok(ResourceType::ModelEndpoints),
            _ => Err(MonitorError::UnsupportedResourceType {
                resource_type: s.to_string(),
                supported: supported_types_string(),
            }),
        }
    }
}

/// Comma-separated list of every supported resource type name.
pub fn supported_types_string() -> String {
    ResourceType::all()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Policy for handling violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionMode {
    /// Delete each violating resource, best-effort.
    Delete,
    /// Fail the run with a report enumerating every violation.
    Alert,
}

impl ActionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionMode::Delete => "delete",
            ActionMode::Alert => "alert",
        }
    }
}

impl std::fmt::Display for ActionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionMode {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" => Ok(ActionMode::Delete),
            "alert" => Ok(ActionMode::Alert),
            _ => Err(MonitorError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Uniform shape every handler produces for every enumerated resource.
///
/// Optional platform fields are resolved to sentinels once, at
/// construction: a missing state becomes `"UNKNOWN"`, a missing creator
/// becomes `None`. `raw` carries the original platform object untouched;
/// the engine never interprets it.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecord {
    /// Stable handle used for whitelist lookup and deletion.
    pub id: String,
    pub name: String,
    /// Platform-reported lifecycle status, free-form.
    pub state: String,
    pub creator: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub raw: serde_json::Value,
}

/// A resource that failed the whitelist/managed-filter check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub id: String,
    pub details: String,
    /// Set exactly once, during the action-dispatch pass.
    pub action_taken: Option<ActionOutcome>,
}

/// Per-violation outcome of the delete dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Deleted,
    DeleteFailed,
    Error,
}

impl ActionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOutcome::Deleted => "deleted",
            ActionOutcome::DeleteFailed => "delete_failed",
            ActionOutcome::Error => "error",
        }
    }
}

/// Aggregate status of one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    PartialFailure,
}

/// Summary of the actions taken for one violation sequence.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub status: ReportStatus,
    pub violations: usize,
    /// One human-readable line per attempted action, in input order.
    pub actions: Vec<String>,
}

impl ActionReport {
    /// The report for an empty violation sequence.
    pub fn empty() -> Self {
        Self {
            status: ReportStatus::Success,
            violations: 0,
            actions: Vec::new(),
        }
    }
}
