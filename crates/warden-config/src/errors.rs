use std::error::Error;

#[derive(Debug)]
pub enum ConfigError {
    ConfigNotFound {
        resource_type: String,
        searched: String,
    },
    ConfigParseError {
        message: String,
    },
    InvalidConfiguration {
        message: String,
    },
    IoError {
        source: std::io::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound {
                resource_type,
                searched,
            } => {
                write!(
                    f,
                    "No whitelist found for resource type '{}' (searched: {})",
                    resource_type, searched
                )
            }
            ConfigError::ConfigParseError { message } => {
                write!(f, "Failed to parse whitelist file: {}", message)
            }
            ConfigError::InvalidConfiguration { message } => {
                write!(f, "Invalid whitelist configuration: {}", message)
            }
            ConfigError::IoError { source } => {
                write!(f, "IO error reading whitelist: {}", source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::IoError { source } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(source: std::io::Error) -> Self {
        ConfigError::IoError { source }
    }
}
