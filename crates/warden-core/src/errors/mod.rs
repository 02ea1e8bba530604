use std::error::Error;

// Re-export ConfigError from warden-config for a single import surface
pub use warden_config::ConfigError;

use warden_workspace::ApiError;

/// Base trait for all application errors
pub trait WardenError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

impl WardenError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigNotFound { .. }
                | ConfigError::ConfigParseError { .. }
                | ConfigError::InvalidConfiguration { .. }
        )
    }
}

impl WardenError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials { .. } => "API_MISSING_CREDENTIALS",
            ApiError::Api { .. } => "API_ERROR",
            ApiError::Transport(_) => "API_TRANSPORT_ERROR",
            ApiError::Decode { .. } => "API_DECODE_ERROR",
            _ => "API_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ApiError::MissingCredentials { .. })
    }
}
