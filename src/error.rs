//! Error types for fixturegate operations.
//!
//! This module defines [`FixtureError`], the error type used throughout
//! the engine, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Malformed requirement text and broken invariants are errors and abort
//!   the evaluation
//! - Unmet preconditions (policy conflicts, unresolvable installs) are *not*
//!   errors; they surface as [`GateOutcome::Skip`](crate::requirements::GateOutcome)
//! - Use `anyhow::Error` (via `FixtureError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fixturegate operations.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A requirement declaration could not be parsed.
    #[error("Malformed plugin spec '{spec}': {reason}")]
    MalformedSpec { spec: String, reason: String },

    /// Internal state contradicts what the engine relies on.
    #[error("Invariant violated: {message}")]
    InvariantViolation { message: String },

    /// Suite manifest is structurally invalid.
    #[error("Invalid suite manifest: {message}")]
    ManifestInvalid { message: String },

    /// File not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a manifest or environment file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding of audit records failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FixtureError {
    /// Build a `MalformedSpec` error.
    pub fn malformed(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Build an `InvariantViolation` error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

/// Result type alias for fixturegate operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
