//! Whitelists compiled into the binary.
//!
//! The deployed job runs without a checkout, so a default whitelist per
//! known resource type ships inside the crate itself. Closed set: adding
//! a resource type means adding a file here and a match arm.

/// The packaged default whitelist for a resource type, if one ships
/// with the binary.
pub fn packaged_whitelist(resource_type: &str) -> Option<&'static str> {
    match resource_type {
        "apps" => Some(include_str!("../whitelists/apps.json")),
        "model_endpoints" => Some(include_str!("../whitelists/model_endpoints.json")),
        _ => None,
    }
}
