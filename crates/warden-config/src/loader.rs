use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::defaults::packaged_whitelist;
use crate::errors::ConfigError;

/// Deployment location for whitelist files inside a Databricks workspace.
const WORKSPACE_WHITELIST_DIR: &str = "/Workspace/config/whitelists";

/// Local development location, relative to the working directory.
const LOCAL_WHITELIST_DIR: &str = "config/whitelists";

/// Whitelist and filtering options for one resource type.
///
/// Immutable once loaded; a handler holds it for its entire lifetime.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    whitelist: HashSet<String>,
    ignore_databricks_managed: bool,
}

impl ResourceConfig {
    pub fn new(whitelist: impl IntoIterator<Item = String>, ignore_databricks_managed: bool) -> Self {
        Self {
            whitelist: whitelist.into_iter().collect(),
            ignore_databricks_managed,
        }
    }

    /// Whether the given resource id is explicitly permitted to exist.
    pub fn is_whitelisted(&self, resource_id: &str) -> bool {
        self.whitelist.contains(resource_id)
    }

    pub fn whitelist_len(&self) -> usize {
        self.whitelist.len()
    }

    /// Whether resources that look Databricks-managed should be ignored.
    pub fn ignore_databricks_managed(&self) -> bool {
        self.ignore_databricks_managed
    }
}

/// Where a whitelist document was found.
enum ConfigSource {
    Explicit(PathBuf),
    Packaged,
    WorkspacePath,
    LocalPath,
}

/// Load the `ResourceConfig` for a resource type.
///
/// Sources are tried in order, first hit wins:
/// 1. an explicit caller-supplied path (missing file is an error, not a
///    fall-through),
/// 2. the whitelist packaged into the binary,
/// 3. `/Workspace/config/whitelists/<resource_type>.json`,
/// 4. `config/whitelists/<resource_type>.json` relative to the working
///    directory.
pub fn load_resource_config(
    resource_type: &str,
    custom_path: Option<&Path>,
) -> Result<ResourceConfig, ConfigError> {
    debug!(
        event = "config.load_started",
        resource_type = resource_type,
        custom_path = ?custom_path,
    );

    let sources = match custom_path {
        Some(path) => vec![ConfigSource::Explicit(path.to_path_buf())],
        None => vec![
            ConfigSource::Packaged,
            ConfigSource::WorkspacePath,
            ConfigSource::LocalPath,
        ],
    };

    let mut searched = Vec::new();

    for source in sources {
        match read_source(resource_type, &source)? {
            Some((raw, location)) => {
                let data: serde_json::Value =
                    serde_json::from_str(&raw).map_err(|e| ConfigError::ConfigParseError {
                        message: e.to_string(),
                    })?;
                let config = parse_config(&data)?;

                info!(
                    event = "config.loaded",
                    resource_type = resource_type,
                    source = %location,
                    whitelist_len = config.whitelist_len(),
                    ignore_databricks_managed = config.ignore_databricks_managed(),
                );
                return Ok(config);
            }
            None => searched.push(describe_source(resource_type, &source)),
        }
    }

    Err(ConfigError::ConfigNotFound {
        resource_type: resource_type.to_string(),
        searched: searched.join(", "),
    })
}

/// Read one source, returning the raw document and a label for logging.
/// `Ok(None)` means not found here, try the next source.
fn read_source(
    resource_type: &str,
    source: &ConfigSource,
) -> Result<Option<(String, String)>, ConfigError> {
    match source {
        ConfigSource::Explicit(path) => {
            if !path.exists() {
                return Err(ConfigError::ConfigNotFound {
                    resource_type: resource_type.to_string(),
                    searched: path.display().to_string(),
                });
            }
            let raw = std::fs::read_to_string(path)?;
            Ok(Some((raw, path.display().to_string())))
        }
        ConfigSource::Packaged => Ok(packaged_whitelist(resource_type)
            .map(|raw| (raw.to_string(), "packaged default".to_string()))),
        ConfigSource::WorkspacePath | ConfigSource::LocalPath => {
            let path = source_path(resource_type, source);
            match std::fs::read_to_string(&path) {
                Ok(raw) => Ok(Some((raw, path.display().to_string()))),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(ConfigError::IoError { source: e }),
            }
        }
    }
}

fn source_path(resource_type: &str, source: &ConfigSource) -> PathBuf {
    let dir = match source {
        ConfigSource::WorkspacePath => Path::new(WORKSPACE_WHITELIST_DIR),
        _ => Path::new(LOCAL_WHITELIST_DIR),
    };
    dir.join(format!("{}.json", resource_type))
}

fn describe_source(resource_type: &str, source: &ConfigSource) -> String {
    match source {
        ConfigSource::Explicit(path) => path.display().to_string(),
        ConfigSource::Packaged => "packaged default".to_string(),
        ConfigSource::WorkspacePath | ConfigSource::LocalPath => {
            source_path(resource_type, source).display().to_string()
        }
    }
}

/// Validate the document shape and build a `ResourceConfig`.
///
/// Accepted shapes: a bare array of id strings, or an object with a
/// required `whitelist` array and an optional `ignore_databricks_managed`
/// boolean. Anything else is a configuration error.
fn parse_config(data: &serde_json::Value) -> Result<ResourceConfig, ConfigError> {
    match data {
        serde_json::Value::Array(entries) => {
            let whitelist = parse_id_array(entries)?;
            Ok(ResourceConfig::new(whitelist, false))
        }
        serde_json::Value::Object(fields) => {
            let whitelist = match fields.get("whitelist") {
                Some(serde_json::Value::Array(entries)) => parse_id_array(entries)?,
                Some(_) => {
                    return Err(ConfigError::InvalidConfiguration {
                        message: "'whitelist' must be an array of strings".to_string(),
                    });
                }
                None => {
                    return Err(ConfigError::InvalidConfiguration {
                        message: "Object format must contain a 'whitelist' key".to_string(),
                    });
                }
            };

            let ignore_databricks_managed = match fields.get("ignore_databricks_managed") {
                Some(serde_json::Value::Bool(flag)) => *flag,
                Some(_) => {
                    return Err(ConfigError::InvalidConfiguration {
                        message: "'ignore_databricks_managed' must be a boolean".to_string(),
                    });
                }
                None => false,
            };

            Ok(ResourceConfig::new(whitelist, ignore_databricks_managed))
        }
        _ => Err(ConfigError::InvalidConfiguration {
            message: "Expected an array of ids or an object with a 'whitelist' key".to_string(),
        }),
    }
}

fn parse_id_array(entries: &[serde_json::Value]) -> Result<Vec<String>, ConfigError> {
    entries
        .iter()
        .map(|entry| match entry {
            serde_json::Value::String(id) => Ok(id.clone()),
            other => Err(ConfigError::InvalidConfiguration {
                message: format!("Whitelist entries must be strings, found: {}", other),
            }),
        })
        .collect()
}

/// Serialize a whitelist into the canonical object shape, for
/// bootstrapping new whitelist files.
///
/// Ids are sorted so the output is stable under re-runs.
pub fn write_whitelist(
    dir: &Path,
    resource_type: &str,
    resource_ids: &[String],
) -> Result<PathBuf, ConfigError> {
    std::fs::create_dir_all(dir)?;

    let mut ids: Vec<&String> = resource_ids.iter().collect();
    ids.sort();
    ids.dedup();

    let document = serde_json::json!({
        "description": format!("Whitelist for {}", resource_type),
        "whitelist": ids,
    });

    let path = dir.join(format!("{}.json", resource_type));
    let rendered =
        serde_json::to_string_pretty(&document).map_err(|e| ConfigError::ConfigParseError {
            message: e.to_string(),
        })?;
    std::fs::write(&path, rendered)?;

    info!(
        event = "config.whitelist_written",
        resource_type = resource_type,
        path = %path.display(),
        count = ids.len(),
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<ResourceConfig, ConfigError> {
        parse_config(&serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn bare_array_yields_whitelist_with_filter_disabled() {
        let config = parse(r#"["a", "b"]"#).unwrap();
        assert!(config.is_whitelisted("a"));
        assert!(config.is_whitelisted("b"));
        assert!(!config.is_whitelisted("c"));
        assert_eq!(config.whitelist_len(), 2);
        assert!(!config.ignore_databricks_managed());
    }

    #[test]
    fn object_format_reads_whitelist_and_flag() {
        let config = parse(r#"{"whitelist": ["a"], "ignore_databricks_managed": true}"#).unwrap();
        assert!(config.is_whitelisted("a"));
        assert_eq!(config.whitelist_len(), 1);
        assert!(config.ignore_databricks_managed());
    }

    #[test]
    fn object_format_flag_defaults_to_false() {
        let config = parse(r#"{"description": "x", "whitelist": []}"#).unwrap();
        assert!(!config.ignore_databricks_managed());
    }

    #[test]
    fn object_without_whitelist_key_is_invalid() {
        let error = parse("{}").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfiguration { .. }));
        assert!(error.to_string().contains("'whitelist' key"));
    }

    #[test]
    fn scalar_document_is_invalid() {
        let error = parse("42").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn non_string_whitelist_entry_is_invalid() {
        let error = parse(r#"{"whitelist": ["a", 1]}"#).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn non_boolean_flag_is_invalid() {
        let error = parse(r#"{"whitelist": [], "ignore_databricks_managed": "yes"}"#).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn explicit_path_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.json");
        std::fs::write(&path, r#"["prod-endpoint"]"#).unwrap();

        let config = load_resource_config("model_endpoints", Some(&path)).unwrap();
        assert!(config.is_whitelisted("prod-endpoint"));
        assert!(!config.ignore_databricks_managed());
    }

    #[test]
    fn explicit_missing_path_is_not_found_not_fall_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let error = load_resource_config("apps", Some(&path)).unwrap_err();
        assert!(matches!(error, ConfigError::ConfigNotFound { .. }));
        assert!(error.to_string().contains("nope.json"));
    }

    #[test]
    fn explicit_path_with_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let error = load_resource_config("apps", Some(&path)).unwrap_err();
        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn known_type_without_explicit_path_falls_back_to_packaged_default() {
        let config = load_resource_config("apps", None).unwrap();
        assert_eq!(config.whitelist_len(), 0);
        assert!(config.ignore_databricks_managed());
    }

    #[test]
    fn unknown_type_without_any_source_is_not_found() {
        let error = load_resource_config("clusters", None).unwrap_err();
        match error {
            ConfigError::ConfigNotFound {
                resource_type,
                searched,
            } => {
                assert_eq!(resource_type, "clusters");
                assert!(searched.contains("clusters.json"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn write_whitelist_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let ids = vec!["b".to_string(), "a".to_string(), "a".to_string()];

        let path = write_whitelist(dir.path(), "apps", &ids).unwrap();
        assert!(path.ends_with("apps.json"));

        let config = load_resource_config("apps", Some(&path)).unwrap();
        assert_eq!(config.whitelist_len(), 2);
        assert!(config.is_whitelisted("a"));
        assert!(config.is_whitelisted("b"));
    }

    #[test]
    fn write_whitelist_output_is_sorted_and_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let ids = vec!["z".to_string(), "a".to_string()];

        let path = write_whitelist(dir.path(), "model_endpoints", &ids).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            value["description"],
            serde_json::json!("Whitelist for model_endpoints")
        );
        assert_eq!(value["whitelist"], serde_json::json!(["a", "z"]));
    }
}
