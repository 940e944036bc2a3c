//! Domain layer for the bookdesk plugin.
//!
//! Core types and rules, independent of Zellij APIs: the [`Book`] record,
//! its validation, the client-side search filter, and the crate error types.
//!
//! # Organization
//!
//! - [`book`]: `Book`, `BookDraft`, `BookId` and field validation
//! - [`filter`]: substring search over the collection
//! - [`error`]: error types and result alias

pub mod book;
pub mod error;
pub mod filter;

pub use book::{current_year, format_price, Book, BookDraft, BookId, MIN_PUBLISHED_YEAR};
pub use error::{BookdeskError, Result, ValidationError};
pub use filter::{filter_books, match_ranges};
