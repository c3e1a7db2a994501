//! # Connection Profiles
//!
//! Named backend connection settings stored in an INI file:
//!
//! ```ini
//! [default]
//! host = http://localhost:8080/PFCAdminApplication/
//! endpoint = layer-handler
//! user = admin
//! password = secret
//! insecure = false
//! timeout = 30
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Endpoint name used when a profile does not set one
pub const DEFAULT_ENDPOINT: &str = "layer-handler";

/// Request timeout used when a profile does not set one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the layer backend
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionProfile {
    host: Option<String>,
    endpoint: String,
    user: Option<String>,
    password: Option<String>,
    insecure: bool,
    timeout: Duration,
}

impl ConnectionProfile {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::blank()
        }
    }

    /// Profile with no host; requests fail until one is set
    pub fn blank() -> Self {
        Self {
            host: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user: None,
            password: None,
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = Some(host.into());
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = endpoint.into();
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self::blank()
    }
}

/// Profile store backed by an INI file
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Load the named profile. A missing file or section yields `None`.
    pub fn get_profile(&self, name: &str) -> Result<Option<ConnectionProfile>> {
        let expanded = shellexpand::full(&self.path)
            .with_context(|| format!("Failed to expand profile path '{}'", self.path))?;
        let path = Path::new(expanded.as_ref());
        if !path.exists() {
            tracing::debug!("Profile file '{}' does not exist", path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;
        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let mut profile = ConnectionProfile::blank();
        profile.host = section.get("host").map(str::to_string);
        if let Some(endpoint) = section.get("endpoint") {
            profile.endpoint = endpoint.to_string();
        }
        profile.user = section.get("user").map(str::to_string);
        profile.password = section.get("password").map(str::to_string);
        if let Some(insecure) = section.get("insecure") {
            profile.insecure = parse_bool(insecure)
                .with_context(|| format!("Invalid 'insecure' value in profile '{name}'"))?;
        }
        if let Some(timeout) = section.get("timeout") {
            let secs: u64 = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid 'timeout' value in profile '{name}'"))?;
            profile.timeout = Duration::from_secs(secs);
        }

        Ok(Some(profile))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got '{other}'")),
    }
}
