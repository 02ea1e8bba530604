//! Monitor error types.

use warden_workspace::ApiError;

use crate::errors::WardenError;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Platform enumeration failed. Fatal: aborts the run, no retry.
    #[error("Failed to list {resource_type}: {source}")]
    ListingFailed {
        resource_type: String,
        source: ApiError,
    },

    /// A deletion attempt failed below the API level (transport, decode).
    /// Recoverable at the aggregate level: recorded per violation, the
    /// run continues.
    #[error("Error deleting {resource_type} '{resource_id}': {source}")]
    DeletionFailed {
        resource_type: String,
        resource_id: String,
        source: ApiError,
    },

    /// The alert-mode violation report. An intentional failure: the
    /// surrounding job scheduler treats the failed run as the alert
    /// delivery channel.
    #[error(
        "ALERT: found {count} unauthorized resources:\n{details}\n\nPlease review and take appropriate action."
    )]
    AlertRaised { count: usize, details: String },

    #[error("Invalid action mode '{mode}'. Supported modes: delete, alert")]
    InvalidMode { mode: String },

    #[error("Unsupported resource type: {resource_type}. Supported types: {supported}")]
    UnsupportedResourceType {
        resource_type: String,
        supported: String,
    },
}

impl WardenError for MonitorError {
    fn error_code(&self) -> &'static str {
        match self {
            MonitorError::ListingFailed { .. } => "MONITOR_LISTING_FAILED",
            MonitorError::DeletionFailed { .. } => "MONITOR_DELETION_FAILED",
            MonitorError::AlertRaised { .. } => "MONITOR_ALERT_RAISED",
            MonitorError::InvalidMode { .. } => "MONITOR_INVALID_MODE",
            MonitorError::UnsupportedResourceType { .. } => "MONITOR_UNSUPPORTED_TYPE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            MonitorError::InvalidMode { .. } | MonitorError::UnsupportedResourceType { .. }
        )
    }
}
