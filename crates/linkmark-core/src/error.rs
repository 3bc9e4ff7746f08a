//! Error types for Linkmark.
//!
//! This module defines the error hierarchy shared by the domain layer
//! and every repository implementation. All errors implement the standard
//! `std::error::Error` trait via `thiserror`.
//!
//! # Error Handling Philosophy
//!
//! Expected failures are values, not control flow:
//! - Repository operations return `Result<T, BookmarkError>`
//! - "Not found" and "unreachable" are ordinary variants, never panics
//! - Callers decide at their boundary whether a failure is worth retrying
//!
//! # Example
//!
//! ```
//! use linkmark_core::{BookmarkError, Result};
//!
//! fn find_note(id: &str) -> Result<String> {
//!     if id.is_empty() {
//!         return Err(BookmarkError::validation_error("id", "note id cannot be empty"));
//!     }
//!     Err(BookmarkError::note_not_found(id))
//! }
//!
//! assert!(find_note("abc").unwrap_err().is_not_found());
//! ```

use std::io;
use thiserror::Error;

/// Main error type for Linkmark operations.
///
/// Each variant carries enough context to diagnose the failure without
/// inspecting the collaborator that produced it.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The requested note does not exist on the remote service.
    #[error("Note '{id}' not found")]
    NoteNotFound {
        /// Id that was requested
        id: String,
    },

    /// The remote service could not be reached.
    #[error("Network unreachable: {message}")]
    Unreachable {
        /// Description of what went wrong
        message: String,
    },

    /// The remote service answered with an error status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// Status code reported by the service
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// The remote service rejected the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Error parsing remote or stored content.
    #[error("Failed to parse '{source_name}': {message}")]
    ParseError {
        /// What was being parsed (payload name, field, etc.)
        source_name: String,
        /// Description of the parse error
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error reading or writing local state.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of what went wrong
        message: String,
        /// Underlying error
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation error for an input value.
    #[error("Validation error for field '{field}': {message}")]
    ValidationError {
        /// Field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookmarkError {
    // ============================================
    // Convenience constructors
    // ============================================

    /// Creates a NoteNotFound error.
    ///
    /// # Example
    ///
    /// ```
    /// use linkmark_core::BookmarkError;
    ///
    /// let error = BookmarkError::note_not_found("n-42");
    /// assert!(error.is_not_found());
    /// ```
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NoteNotFound { id: id.into() }
    }

    /// Creates an Unreachable error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Creates an Api error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an Unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a ParseError without a cause.
    pub fn parse_error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a ParseError with a cause.
    pub fn parse_error_with_cause<E>(
        source: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates a Storage error without a cause.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a ValidationError.
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================
    // Query methods
    // ============================================

    /// Returns true if this error indicates the note was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound { .. })
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns true if this is a parse error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns true if the operation might succeed when attempted again.
    ///
    /// Network failures, I/O errors and server-side (5xx) or rate-limit
    /// (429) API answers are transient. Everything else is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable { .. } | Self::Io(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Type alias for Results with BookmarkError.
pub type Result<T> = std::result::Result<T, BookmarkError>;
