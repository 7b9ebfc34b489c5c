use thiserror::Error;

use crate::reference::ObjectReference;

#[derive(Debug, Error)]
pub enum VmError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid property path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("Property `{0}` has no mapping")]
    UnknownProperty(String),
    #[error("Cannot decode property `{path}`: {message}")]
    DecodeError { path: String, message: String },
    #[error("Managed object {0} not found")]
    ManagedObjectNotFound(ObjectReference),
    #[error("{0}")]
    NotFound(String),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<serde_json::error::Error> for VmError {
    fn from(e: serde_json::error::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

impl From<String> for VmError {
    fn from(e: String) -> Self {
        Self::GenericError(e)
    }
}

impl From<&str> for VmError {
    fn from(e: &str) -> Self {
        Self::GenericError(e.to_string())
    }
}
