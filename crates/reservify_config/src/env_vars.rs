//! Environment variable naming for the Reservify configuration.
//!
//! Structured settings use `RESERVIFY__SECTION__KEY`. The plain variables the
//! service has always been deployed with (`PORT`, `CALENDAR_ID`, ...) are
//! still honoured and take precedence over everything else.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "RESERVIFY";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Plain environment variables and the configuration path each one sets.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("CALENDAR_ID", "gcal.calendar_id"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "gcal.key_path"),
    ("CALENDAR_TIME_ZONE", "gcal.time_zone"),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "server.port")
///
/// # Returns
///
/// The environment variable name (e.g., "RESERVIFY__SERVER__PORT")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Collects the plain environment variables that are set, as
/// `(configuration path, value)` pairs. Empty values are ignored.
pub fn legacy_overrides() -> Vec<(&'static str, String)> {
    LEGACY_ENV_VARS
        .iter()
        .filter_map(|(var, path)| {
            env::var(var)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*path, value))
        })
        .collect()
}
