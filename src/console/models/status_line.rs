//! # Status Line Model
//!
//! Encapsulates all state shown on the console's status line:
//! the last outcome message, the last error, the last HTTP status
//! and the active profile.

use crate::config::DEFAULT_PROFILE_PATH;

/// Severity of the current status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Status line model containing all status bar display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Message from the last completed action
    status_message: Option<(MessageKind, String)>,

    /// Status code of the last backend response
    http_status: Option<u16>,

    /// Profile name and path
    profile_name: String,
    profile_path: String,

    /// Backend endpoint in use
    endpoint_url: Option<String>,

    /// Whether a backend call is in flight
    is_executing: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            status_message: None,
            http_status: None,
            profile_name: "default".to_string(),
            profile_path: DEFAULT_PROFILE_PATH.to_string(),
            endpoint_url: None,
            is_executing: false,
        }
    }

    // === Status Message Methods ===

    /// Set an informational message
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some((MessageKind::Info, message.into()));
    }

    /// Set an error message
    pub fn set_error_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some((MessageKind::Error, message.into()));
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(_, m)| m.as_str())
    }

    pub fn message_kind(&self) -> Option<MessageKind> {
        self.status_message.as_ref().map(|(kind, _)| *kind)
    }

    pub fn is_error(&self) -> bool {
        self.message_kind() == Some(MessageKind::Error)
    }

    // === HTTP Status Methods ===

    pub fn set_http_status(&mut self, status_code: u16) {
        self.http_status = Some(status_code);
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    // === Profile Methods ===

    pub fn set_profile(&mut self, name: String, path: String) {
        self.profile_name = name;
        self.profile_path = path;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }

    pub fn set_endpoint_url(&mut self, url: Option<String>) {
        self.endpoint_url = url;
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    // === Execution State Methods ===

    pub fn set_executing(&mut self, executing: bool) {
        self.is_executing = executing;
    }

    pub fn is_executing(&self) -> bool {
        self.is_executing
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_should_start_without_message() {
        let status = StatusLine::new();
        assert_eq!(status.status_message(), None);
        assert!(!status.is_error());
        assert_eq!(status.profile_name(), "default");
    }

    #[test]
    fn error_message_should_replace_info_message() {
        let mut status = StatusLine::new();
        status.set_status_message("Loaded 3 layers");
        assert_eq!(status.message_kind(), Some(MessageKind::Info));

        status.set_error_message("network error: timeout");
        assert!(status.is_error());
        assert_eq!(status.status_message(), Some("network error: timeout"));

        status.clear_status_message();
        assert_eq!(status.message_kind(), None);
    }
}
