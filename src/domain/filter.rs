//! Client-side search over the book collection.
//!
//! A book matches when the lower-cased query is a substring of its
//! lower-cased title or author, or of the decimal text of its year or price.
//! Matching preserves collection order and an empty query matches everything.

use super::book::Book;

/// Returns `true` if `book` matches an already lower-cased query.
#[must_use]
pub fn matches(book: &Book, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }

    book.title.to_lowercase().contains(query_lower)
        || book.author.to_lowercase().contains(query_lower)
        || book.published_year.to_string().contains(query_lower)
        || book.price_text().contains(query_lower)
}

/// Returns the books matching `query`, in their original order.
///
/// # Examples
///
/// ```
/// use bookdesk::domain::{filter_books, Book, BookId};
///
/// let books = vec![Book {
///     id: BookId::new("1"),
///     title: "Dune".to_string(),
///     author: "Herbert".to_string(),
///     published_year: 1965,
///     price: 10.0,
/// }];
/// assert_eq!(filter_books(&books, "DUNE").len(), 1);
/// assert!(filter_books(&books, "zzz").is_empty());
/// ```
#[must_use]
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    let query_lower = query.to_lowercase();
    books
        .iter()
        .filter(|book| matches(book, &query_lower))
        .collect()
}

/// Character ranges (start inclusive, end exclusive) where the lower-cased
/// query occurs in `text`, for highlighting.
///
/// Occurrences do not overlap. Indices count `char`s, not bytes.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lower-casing may change the char count (e.g. 'İ'), so match per char.
    let haystack: Vec<String> = text.chars().map(|c| c.to_lowercase().collect()).collect();
    let needle: Vec<String> = needle.iter().map(ToString::to_string).collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookId;

    fn book(id: &str, title: &str, author: &str, year: i32, price: f64) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: author.to_string(),
            published_year: year,
            price,
        }
    }

    fn ids(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.id.to_string()).collect()
    }

    fn library() -> Vec<Book> {
        vec![
            book("1", "Dune", "Frank Herbert", 1965, 10.0),
            book("2", "Emma", "Jane Austen", 1815, 4.5),
            book("3", "Dune Messiah", "Frank Herbert", 1969, 12.25),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, "")), ["1", "2", "3"]);
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, "dUNe")), ["1", "3"]);
    }

    #[test]
    fn author_match() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, "austen")), ["2"]);
    }

    #[test]
    fn year_and_price_match_on_decimal_text() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, "196")), ["1", "3"]);
        assert_eq!(ids(&filter_books(&books, "4.5")), ["2"]);
        assert_eq!(ids(&filter_books(&books, ".25")), ["3"]);
    }

    #[test]
    fn whole_price_has_no_fraction_to_match() {
        let books = vec![book("1", "A", "B", 2000, 10.0)];
        assert!(filter_books(&books, "10.0").is_empty());
        assert_eq!(filter_books(&books, "10").len(), 1);
    }

    #[test]
    fn seeded_dune_record() {
        let books = vec![book("1", "Dune", "Herbert", 1965, 10.0)];
        assert_eq!(ids(&filter_books(&books, "dune")), ["1"]);
        assert_eq!(ids(&filter_books(&books, "1965")), ["1"]);
        assert!(filter_books(&books, "zzz").is_empty());
    }

    #[test]
    fn match_ranges_finds_every_occurrence() {
        assert_eq!(match_ranges("Dune Dune", "dune"), vec![(0, 4), (5, 9)]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert!(match_ranges("Dune", "").is_empty());
        assert!(match_ranges("Dune", "x").is_empty());
    }

    #[test]
    fn match_ranges_counts_chars_not_bytes() {
        assert_eq!(match_ranges("Đắc Nhân Tâm", "nhân"), vec![(4, 8)]);
    }
}
