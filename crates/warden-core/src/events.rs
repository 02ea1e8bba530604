//! Structured error event helpers.
//!
//! One sink for "an operation failed" so every layer reports failures
//! with the same shape: an event name, the stable error code, and the
//! rendered message. User errors log at warn, defects at error.

use tracing::{error, warn};

use crate::errors::WardenError;

/// Log an application error with its stable code.
pub fn log_app_error(err: &dyn WardenError) {
    if err.is_user_error() {
        warn!(
            event = "app.user_error",
            code = err.error_code(),
            error = %err,
        );
    } else {
        error!(
            event = "app.error",
            code = err.error_code(),
            error = %err,
        );
    }
}
