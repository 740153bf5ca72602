//! Error types and exit code constants for modfix.
//!
//! This module provides a unified error type (`FixError`) covering every
//! fatal condition a run can hit, plus a stable exit-code table for the CLI.
//!
//! ## Exit Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller)
//! - `3`: Resolution errors (unknown app, missing manifest)
//! - `4`: Apply errors (failed to read, parse, or rewrite a document)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! Recoverable conditions (missing `custom/` or `fixtures/` directories,
//! objects without a `name` field) are not errors: they are logged and
//! counted, and the run continues.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Exit codes for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed override spec).
    InvalidArguments = 2,
    /// Resolution errors (unknown app, missing manifest).
    ResolutionError = 3,
    /// Apply errors (failed to read, parse, or rewrite a document).
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for library and CLI output.
///
/// Every fatal condition carries enough context to produce a useful message
/// on its own; file-level failures name the offending path.
#[derive(Debug, Error)]
pub enum FixError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The app could not be resolved under the apps root.
    #[error("app not found: '{app}' (expected directory at {})", .path.display())]
    AppNotFound { app: String, path: PathBuf },

    /// The module manifest is missing. Fatal: nothing has been touched yet.
    #[error("modules.txt not found at {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    /// IO failure on a specific file or directory.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document could not be parsed or serialized as JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Result type for modfix operations.
pub type FixResult<T> = Result<T, FixError>;

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&FixError> for OutputErrorCode {
    fn from(err: &FixError) -> Self {
        match err {
            FixError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            FixError::AppNotFound { .. } => OutputErrorCode::ResolutionError,
            FixError::ManifestNotFound { .. } => OutputErrorCode::ResolutionError,
            FixError::Io { .. } => OutputErrorCode::ApplyError,
            FixError::Json { .. } => OutputErrorCode::ApplyError,
            FixError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<FixError> for OutputErrorCode {
    fn from(err: FixError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl FixError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        FixError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error with path context.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        FixError::Json {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        FixError::Internal {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
