//! # Layer Errors
//!
//! Domain errors raised by the view model and the layer client.
//! Every variant leaves the view-model state as it was before the operation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    /// The staged layer failed a required-field or range check
    #[error("validation failed: {0}")]
    Validation(String),
    /// Save/delete target is not in the local layer list
    #[error("layer not found: {0}")]
    NotFound(String),
    /// HTTP failure, non-success status or malformed response
    #[error("network error: {0}")]
    Network(String),
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Another write is still in flight
    #[error("a {action} of layer '{wms_id}' is still pending")]
    WritePending { action: &'static str, wms_id: String },
}

impl LayerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

impl From<reqwest::Error> for LayerError {
    fn from(error: reqwest::Error) -> Self {
        // Include the full source chain
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(&format!("\n  Caused by: {cause}"));
            source = cause.source();
        }
        Self::Network(message)
    }
}

pub type Result<T> = std::result::Result<T, LayerError>;
