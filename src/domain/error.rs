//! Error types for the bookdesk plugin.
//!
//! This module defines the centralized error type [`BookdeskError`], the
//! user-facing [`ValidationError`] raised by form checks, and a [`Result`]
//! alias used throughout the crate. All errors use `thiserror`.

use thiserror::Error;

/// The main error type for bookdesk operations.
///
/// Network failures are not surfaced to the user; they travel as this type
/// only as far as the response decoder and the tracing layer.
///
/// # Examples
///
/// ```
/// use bookdesk::domain::BookdeskError;
///
/// let error = BookdeskError::Http {
///     status: 404,
///     body: "Not Found".to_string(),
/// };
/// assert_eq!(error.to_string(), "HTTP 404: Not Found");
/// ```
#[derive(Debug, Error)]
pub enum BookdeskError {
    /// The backend answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code reported by the host for the request.
        status: u16,
        /// Response body, lossily decoded for logging.
        body: String,
    },

    /// A request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The correlation context attached to a web request was missing or malformed.
    #[error("Request context error: {0}")]
    Context(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// Reasons a book form is refused before submission.
///
/// The `Display` text is shown verbatim as the form notice. These never
/// become a [`BookdeskError`]: they stop at the form that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title or author is empty.
    #[error("Title and author must not be empty.")]
    MissingTitleOrAuthor,

    /// Publication year outside `1000..=max`.
    #[error("Published year {year} is invalid (expected 1000-{max}).")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// Latest accepted year (current year + 1).
        max: i32,
    },

    /// Price below zero.
    #[error("Price must not be negative.")]
    NegativePrice,

    /// A numeric field did not parse as a finite number.
    #[error("{field} must be a number.")]
    NotANumber {
        /// Label of the offending field.
        field: &'static str,
    },
}

/// A specialized `Result` type for bookdesk operations.
pub type Result<T> = std::result::Result<T, BookdeskError>;
