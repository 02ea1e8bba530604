/// Error from the workspace REST client layer.
#[non_exhaustive]
#[derive(Debug)]
pub enum ApiError {
    /// Required authentication environment variable is not set.
    MissingCredentials { variable: &'static str },
    /// The API answered with a non-success status.
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// Connection-level failure (DNS, TLS, timeout, refused).
    Transport(reqwest::Error),
    /// The response body could not be decoded into the expected shape.
    Decode { message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingCredentials { variable } => {
                write!(f, "Databricks credentials not configured: {} is not set", variable)
            }
            ApiError::Api {
                status,
                code,
                message,
            } => {
                write!(f, "Databricks API error [{} {}]: {}", status, code, message)
            }
            ApiError::Transport(e) => write!(f, "Request failed: {}", e),
            ApiError::Decode { message } => write!(f, "Failed to decode response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

impl ApiError {
    /// Whether this error is an explicit refusal from the API, as opposed
    /// to a transport-level failure where the outcome is unknown.
    pub fn is_api_response(&self) -> bool {
        matches!(self, ApiError::Api { .. })
    }
}
