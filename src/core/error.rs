// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for gifseries.
//!
//! Every fallible operation in the crate returns [`GifError`]. The variants
//! follow the failure taxonomy of the ingestion routine:
//! - configuration problems (no resolvable sample rate, bad decimation ratio)
//! - file name and content parse failures
//! - I/O failures surfaced under the strict gap policy
//! - registry lookups and registration conflicts

use thiserror::Error;

/// Errors that can occur while reading, writing or dispatching series.
#[derive(Debug, Clone, Error)]
pub enum GifError {
    /// Options could not be resolved into a usable read/write configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },

    /// Parse error in a file name, a text row or raw sample data
    #[error("Parse error in {context}: {message}")]
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// File could not be opened, mapped, read or written
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// Path of the file involved (empty when unknown)
        path: String,
        /// Underlying error message
        message: String,
    },

    /// A series would violate its length/spacing invariants
    #[error("Invalid series: {reason}")]
    InvalidSeries {
        /// Which invariant failed
        reason: String,
    },

    /// No reader/writer/identifier registered for the requested key
    #[error("No {role} registered for format '{format}' and kind '{kind}'")]
    UnknownFormat {
        /// Format name
        format: String,
        /// Series kind
        kind: String,
        /// "reader", "writer" or "identifier"
        role: String,
    },

    /// More than one identifier claimed the same file
    #[error("Ambiguous format for '{path}': matched {}", .formats.join(", "))]
    AmbiguousFormat {
        /// File being identified
        path: String,
        /// All formats whose identifier matched
        formats: Vec<String>,
    },

    /// A strict registration found an existing entry
    #[error("A {role} is already registered for format '{format}' and kind '{kind}'")]
    DuplicateRegistration {
        /// Format name
        format: String,
        /// Series kind
        kind: String,
        /// "reader" or "writer"
        role: String,
    },
}

impl GifError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        GifError::Configuration {
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        GifError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error for a path.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        GifError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid series error.
    pub fn invalid_series(reason: impl Into<String>) -> Self {
        GifError::InvalidSeries {
            reason: reason.into(),
        }
    }

    /// Create an "unknown format" error.
    pub fn unknown_format(
        format: impl Into<String>,
        kind: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        GifError::UnknownFormat {
            format: format.into(),
            kind: kind.into(),
            role: role.into(),
        }
    }

    /// Create a duplicate registration error.
    pub fn duplicate(
        format: impl Into<String>,
        kind: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        GifError::DuplicateRegistration {
            format: format.into(),
            kind: kind.into(),
            role: role.into(),
        }
    }

    /// Whether this is an I/O failure (the only kind a gap policy may absorb).
    pub fn is_io(&self) -> bool {
        matches!(self, GifError::Io { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            GifError::Configuration { message } => vec![("message", message.clone())],
            GifError::Parse { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            GifError::Io { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            GifError::InvalidSeries { reason } => vec![("reason", reason.clone())],
            GifError::UnknownFormat { format, kind, role }
            | GifError::DuplicateRegistration { format, kind, role } => vec![
                ("format", format.clone()),
                ("kind", kind.clone()),
                ("role", role.clone()),
            ],
            GifError::AmbiguousFormat { path, formats } => {
                vec![("path", path.clone()), ("formats", formats.join(","))]
            }
        }
    }
}

impl From<std::io::Error> for GifError {
    fn from(err: std::io::Error) -> Self {
        GifError::Io {
            path: String::new(),
            message: err.to_string(),
        }
    }
}

/// Result type for gifseries operations.
pub type Result<T> = std::result::Result<T, GifError>;
