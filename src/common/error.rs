//! Error types for xctestrun
//!
//! Error messages are meant to be shown to the user as-is, so they name
//! the offending file, key or version wherever one is known.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xctestrun
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("Failed to open xctestrun file '{path}': {error}")]
    UnreadableInput { path: String, error: String },

    #[error("Failed to parse xctestrun document: {0}")]
    MalformedDocument(String),

    #[error("xctestrun currently only supports .xctestrun files in formatVersion {supported}: The formatVersion of your xctestrun file is {version}, feel free to open an issue in the project's issue tracker to add support")]
    UnsupportedFormatVersion { version: i64, supported: String },

    #[error("Unexpected xctestrun layout: {0}")]
    SchemaMismatch(String),

    // === Bundle Resolution Errors ===
    #[error("App {name} not found")]
    AppNotFound { name: String },

    #[error("Test target '{name}' not found. Available: {available}")]
    TargetNotFound { name: String, available: String },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid app inventory: {0}")]
    Inventory(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unreadable input error for a path
    pub fn unreadable(path: &Path, error: &io::Error) -> Self {
        Self::UnreadableInput {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create an unsupported version error listing the accepted versions
    pub fn unsupported_version(version: i64, supported: &[i64]) -> Self {
        let supported = match supported {
            [] => "none".to_string(),
            [only] => only.to_string(),
            [init @ .., last] => format!(
                "{} and {}",
                init.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "),
                last
            ),
        };
        Self::UnsupportedFormatVersion { version, supported }
    }

    /// Create a target not found error with the names that do exist
    pub fn target_not_found<S: AsRef<str>>(name: &str, available: &[S]) -> Self {
        Self::TargetNotFound {
            name: name.to_string(),
            available: available.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", "),
        }
    }

    /// Stable code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Error::UnreadableInput { .. } | Error::FileRead { .. } | Error::Io(_) => {
                "UNREADABLE_INPUT"
            }
            Error::MalformedDocument(_) => "MALFORMED_DOCUMENT",
            Error::UnsupportedFormatVersion { .. } => "UNSUPPORTED_FORMAT_VERSION",
            Error::SchemaMismatch(_) => "SCHEMA_MISMATCH",
            Error::AppNotFound { .. } => "APP_NOT_FOUND",
            Error::TargetNotFound { .. } => "TARGET_NOT_FOUND",
            Error::ConfigParse(_) | Error::Inventory(_) => "CONFIG_ERROR",
            Error::Json(_) => "INTERNAL_ERROR",
        }
    }
}

/// Serializable error for `--json` output
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
}

impl From<&Error> for ErrorReport {
    fn from(e: &Error) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}
