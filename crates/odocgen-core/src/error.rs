//! Error types for odocgen core operations.
//!
//! Rendering and filtering are total over a well-formed index and never fail.
//! The errors here come from the edges: reading the generator's output,
//! optional strict validation, and configuration. Library code uses
//! `thiserror`; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using OdocError
pub type Result<T> = std::result::Result<T, OdocError>;

/// Core error types for odocgen operations.
#[derive(Error, Debug)]
pub enum OdocError {
    // === Input Errors ===
    /// The index file is missing
    #[error("index not found at {path}")]
    IndexNotFound { path: PathBuf },

    /// The index file exists but could not be parsed
    #[error("failed to parse index at byte {offset}: {reason}")]
    IndexParse { reason: String, offset: usize },

    /// Strict validation found broken invariants
    #[error("invalid index: {reason}")]
    InvalidIndex { reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OdocError {
    /// Returns true if the error points at the index input rather than the
    /// environment (regenerating the index is the fix).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OdocError::IndexNotFound { .. }
                | OdocError::IndexParse { .. }
                | OdocError::InvalidIndex { .. }
        )
    }

    /// Create a parse error at the given byte offset
    pub fn parse(reason: impl Into<String>, offset: usize) -> Self {
        OdocError::IndexParse {
            reason: reason.into(),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_input_error() {
        let err = OdocError::IndexNotFound {
            path: PathBuf::from("/test/db.js"),
        };
        assert!(err.is_input_error());

        assert!(OdocError::parse("unexpected token", 12).is_input_error());

        let err = OdocError::ConfigError {
            reason: "bad toml".to_string(),
        };
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_parse_error_message() {
        let err = OdocError::parse("expected ':'", 42);
        assert_eq!(
            err.to_string(),
            "failed to parse index at byte 42: expected ':'"
        );
    }
}
