//! Configuration constants and utilities for layerdesk
//!
//! Locations of the profile file and the environment variables that
//! override them.

/// Default profile file path
pub const DEFAULT_PROFILE_PATH: &str = "~/.layerdesk/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "LAYERDESK_PROFILE_PATH";

/// Environment variable holding the tracing filter, e.g. `debug` or `layerdesk=trace`
pub const LOG_LEVEL_ENV_VAR: &str = "LAYERDESK_LOG_LEVEL";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Tracing filter directive; `--verbose` wins over the environment
pub fn log_filter(verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    std::env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| "warn".to_string())
}
