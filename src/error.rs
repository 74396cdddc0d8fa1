//! Unified error types for fabric-tools.
//!
//! The error surface is intentionally small: a closed set of tagged kinds
//! carried as explicit result values. Expected outcomes (assertion failures,
//! topology defects) are represented as [`crate::validate::ValidationResult`]
//! data and never travel through this type.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fabric-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FabricError {
    /// A driver capability call failed during capture.
    ///
    /// The snapshot engine catches these per category and records them as
    /// inline error markers; they only escape as errors when a caller invokes
    /// a capability directly.
    #[error("Collection failed on {device} ({category}): {message}")]
    Collection {
        device: String,
        category: String,
        message: String,
    },

    /// Invalid operation setup: mismatched diff devices, empty graph input,
    /// unknown vendor. Fatal to the single operation, never coerced.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Snapshot persistence failed (missing file, corrupt JSON, write error).
    #[error("Snapshot store error at {path:?}: {message}")]
    Store {
        path: Option<PathBuf>,
        message: String,
    },

    /// IO errors with optional path context.
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// An external collaborator (triage, reporting sink) was unreachable.
    /// Degraded but non-fatal: validation and diff results remain usable.
    #[error("External service unavailable: {0}")]
    ExternalService(String),
}

/// Convenient Result type for fabric-tools operations.
pub type Result<T> = std::result::Result<T, FabricError>;

impl FabricError {
    /// Create a collection error for a failed capability call.
    pub fn collection(
        device: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Collection {
            device: device.into(),
            category: category.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a store error with path context.
    pub fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Store {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }
}

impl From<std::io::Error> for FabricError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FabricError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store {
            path: None,
            message: format!("JSON serialization: {err}"),
        }
    }
}
