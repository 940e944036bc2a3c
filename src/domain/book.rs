//! Book domain model and field validation.
//!
//! A [`Book`] is the only entity the plugin manages. Its `id` is assigned by
//! the backend and treated as an opaque string; the four business fields live
//! in [`BookDraft`], which is also the body of create and update requests.

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ValidationError;

/// Earliest publication year the edit form accepts.
pub const MIN_PUBLISHED_YEAR: i32 = 1000;

/// Returns the current calendar year in the local time zone.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Latest publication year accepted when the current year is `current_year`.
#[must_use]
pub const fn max_published_year(current_year: i32) -> i32 {
    current_year + 1
}

/// Server-assigned book identifier.
///
/// The backend emits integer ids while older deployments used strings, so
/// deserialization accepts both and keeps the textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Wraps an identifier received from the server.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as it appears in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(n) => Self(n.to_string()),
        })
    }
}

/// The business fields of a book, without an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub price: f64,
}

impl BookDraft {
    /// Checks the fields the way the add form does: title and author are
    /// required (an empty string fails, whitespace does not).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingTitleOrAuthor`] for an empty field.
    pub fn check_required(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() || self.author.is_empty() {
            return Err(ValidationError::MissingTitleOrAuthor);
        }
        Ok(())
    }

    /// Checks applied before a new book is sent: the required fields, then
    /// the year range `1000..=current_year + 1`.
    ///
    /// Unlike [`validate`](Self::validate), whitespace-only text and a
    /// negative price are let through.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingTitleOrAuthor`] or
    /// [`ValidationError::YearOutOfRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bookdesk::domain::{BookDraft, ValidationError};
    ///
    /// let draft = BookDraft {
    ///     title: "Emma".to_string(),
    ///     author: "Austen".to_string(),
    ///     published_year: 500,
    ///     price: 0.0,
    /// };
    /// assert_eq!(
    ///     draft.check_new(2025),
    ///     Err(ValidationError::YearOutOfRange { year: 500, max: 2026 })
    /// );
    /// ```
    pub fn check_new(&self, current_year: i32) -> Result<(), ValidationError> {
        self.check_required()?;
        check_year(self.published_year, current_year)
    }

    /// Full validation applied before an update is sent.
    ///
    /// Checks run in a fixed order and the first failure wins: blank title or
    /// author, then the year range `1000..=current_year + 1`, then price sign.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookdesk::domain::{BookDraft, ValidationError};
    ///
    /// let draft = BookDraft {
    ///     title: "Dune".to_string(),
    ///     author: "Herbert".to_string(),
    ///     published_year: 3000,
    ///     price: 10.0,
    /// };
    /// assert_eq!(
    ///     draft.validate(2025),
    ///     Err(ValidationError::YearOutOfRange { year: 3000, max: 2026 })
    /// );
    /// ```
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() || self.author.trim().is_empty() {
            return Err(ValidationError::MissingTitleOrAuthor);
        }

        check_year(self.published_year, current_year)?;

        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice);
        }

        Ok(())
    }
}

fn check_year(year: i32, current_year: i32) -> Result<(), ValidationError> {
    let max = max_published_year(current_year);
    if (MIN_PUBLISHED_YEAR..=max).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::YearOutOfRange { year, max })
    }
}

/// A book as held in the client-side collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub price: f64,
}

impl Book {
    /// Attaches a server id to a draft.
    #[must_use]
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            published_year: draft.published_year,
            price: draft.price,
        }
    }

    /// Returns the business fields, as sent in an update body.
    #[must_use]
    pub fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            published_year: self.published_year,
            price: self.price,
        }
    }

    /// Decimal rendering of the price used for display and search.
    ///
    /// Whole prices render without a fractional part (`10`, not `10.0`).
    #[must_use]
    pub fn price_text(&self) -> String {
        format_price(self.price)
    }
}

/// Formats a price with the shortest representation that round-trips.
///
/// Follows the number-to-string rules browsers use, so searching a price
/// finds the same rows a web client would:
///
/// - whole values have no fractional part (`10`, not `10.0`);
/// - `-0` renders as `0`;
/// - magnitudes of `1e21` and above, or below `1e-6`, use exponent form with
///   an explicit sign (`1e+21`, `1.5e-7`).
///
/// ```
/// use bookdesk::domain::format_price;
///
/// assert_eq!(format_price(12.5), "12.5");
/// assert_eq!(format_price(1e21), "1e+21");
/// assert_eq!(format_price(-0.0), "0");
/// ```
#[must_use]
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "0".to_string();
    }

    let magnitude = price.abs();
    if price.is_finite() && !(1e-6..1e21).contains(&magnitude) {
        let exponent = format!("{price:e}");
        return match exponent.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => exponent,
        };
    }

    price.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, author: &str, year: i32, price: f64) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            published_year: year,
            price,
        }
    }

    #[test]
    fn current_year_follows_local_clock() {
        let before = chrono::Local::now().year();
        let year = current_year();
        let after = chrono::Local::now().year();
        assert!(year == before || year == after);
    }

    #[test]
    fn id_accepts_integer_and_string() {
        let from_int: Book = serde_json::from_str(
            r#"{"id":7,"title":"Dune","author":"Herbert","published_year":1965,"price":10}"#,
        )
        .unwrap();
        let from_str: Book = serde_json::from_str(
            r#"{"id":"7","title":"Dune","author":"Herbert","published_year":1965,"price":10.0}"#,
        )
        .unwrap();

        assert_eq!(from_int.id, BookId::new("7"));
        assert_eq!(from_int, from_str);
    }

    #[test]
    fn draft_body_has_no_id() {
        let book = Book::from_draft(BookId::new("3"), draft("Emma", "Austen", 1815, 4.5));
        let body = serde_json::to_value(book.draft()).unwrap();

        assert!(body.get("id").is_none());
        assert_eq!(body["title"], "Emma");
        assert_eq!(body["published_year"], 1815);
    }

    #[rstest]
    #[case(draft("", "Herbert", 1965, 1.0))]
    #[case(draft("Dune", "", 1965, 1.0))]
    #[case(draft("   ", "Herbert", 1965, 1.0))]
    #[case(draft("Dune", "\t", 1965, 1.0))]
    fn blank_title_or_author_is_rejected(#[case] input: BookDraft) {
        assert_eq!(input.validate(2025), Err(ValidationError::MissingTitleOrAuthor));
    }

    #[rstest]
    #[case(999, false)]
    #[case(1000, true)]
    #[case(2025, true)]
    #[case(2026, true)]
    #[case(2027, false)]
    fn year_bounds_follow_current_year(#[case] year: i32, #[case] accepted: bool) {
        let result = draft("Dune", "Herbert", year, 0.0).validate(2025);
        assert_eq!(result.is_ok(), accepted, "year {year}");
    }

    #[test]
    fn negative_price_is_rejected_zero_is_not() {
        assert_eq!(
            draft("Dune", "Herbert", 1965, -0.01).validate(2025),
            Err(ValidationError::NegativePrice)
        );
        assert!(draft("Dune", "Herbert", 1965, 0.0).validate(2025).is_ok());
    }

    #[rstest]
    #[case(draft("Emma", "Austen", 3000, 0.0), Err(ValidationError::YearOutOfRange { year: 3000, max: 2026 }))]
    #[case(draft("Emma", "Austen", 999, 0.0), Err(ValidationError::YearOutOfRange { year: 999, max: 2026 }))]
    #[case(draft("", "Austen", 3000, 0.0), Err(ValidationError::MissingTitleOrAuthor))]
    #[case(draft(" ", " ", 2026, -1.0), Ok(()))]
    fn new_book_checks_required_then_year(
        #[case] input: BookDraft,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(input.check_new(2025), expected);
    }

    #[test]
    fn required_check_only_refuses_empty_strings() {
        assert!(draft(" ", "x", 1965, 0.0).check_required().is_ok());
        assert_eq!(
            draft("", "x", 1965, 0.0).check_required(),
            Err(ValidationError::MissingTitleOrAuthor)
        );
    }

    #[test]
    fn price_text_drops_trailing_zero() {
        assert_eq!(format_price(10.0), "10");
        assert_eq!(format_price(12.5), "12.5");
        assert_eq!(format_price(0.0), "0");
    }

    #[rstest]
    #[case(-0.0, "0")]
    #[case(1e21, "1e+21")]
    #[case(2.5e22, "2.5e+22")]
    #[case(1e-7, "1e-7")]
    #[case(0.000001, "0.000001")]
    #[case(123_456_789.25, "123456789.25")]
    fn price_text_matches_browser_rendering(#[case] price: f64, #[case] expected: &str) {
        assert_eq!(format_price(price), expected);
    }
}
