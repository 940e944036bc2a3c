//! Decoding of web request results into application responses.

use std::collections::BTreeMap;

use super::request::{Operation, CONTEXT_BOOK, CONTEXT_BOOK_ID, CONTEXT_OPERATION};
use crate::domain::error::{BookdeskError, Result};
use crate::domain::{Book, BookId};

/// Outcome of a backend call, as consumed by the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The full collection, in server order.
    BooksFetched(Vec<Book>),
    /// The record created by the server, including its id.
    BookCreated(Book),
    /// An update succeeded; carries the record that was submitted.
    BookUpdated(Book),
    /// A delete succeeded.
    BookDeleted(BookId),
    /// The call failed. Logged by the handler, never shown to the user.
    Failed {
        operation: Operation,
        reason: String,
    },
}

/// Returns `true` for 2xx status codes.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Turns a web request result into an [`ApiResponse`].
///
/// Returns `None` when the context does not belong to a bookdesk request.
/// Every other problem (bad status, undecodable body) becomes
/// [`ApiResponse::Failed`] for the recognised operation.
#[must_use]
pub fn decode_web_result(
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Option<ApiResponse> {
    let operation = match context.get(CONTEXT_OPERATION)?.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring web result with unknown operation");
            return None;
        }
    };

    Some(decode_for(operation, status, body, context).unwrap_or_else(|e| {
        ApiResponse::Failed {
            operation,
            reason: e.to_string(),
        }
    }))
}

fn decode_for(
    operation: Operation,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Result<ApiResponse> {
    if !is_success(status) {
        return Err(BookdeskError::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    match operation {
        Operation::FetchBooks => Ok(ApiResponse::BooksFetched(serde_json::from_slice(body)?)),
        Operation::CreateBook => Ok(ApiResponse::BookCreated(serde_json::from_slice(body)?)),
        Operation::UpdateBook => {
            let submitted = context
                .get(CONTEXT_BOOK)
                .ok_or_else(|| BookdeskError::Context("update result without record".to_string()))?;
            Ok(ApiResponse::BookUpdated(serde_json::from_str(submitted)?))
        }
        Operation::DeleteBook => {
            let id = context
                .get(CONTEXT_BOOK_ID)
                .ok_or_else(|| BookdeskError::Context("delete result without id".to_string()))?;
            Ok(ApiResponse::BookDeleted(BookId::new(id.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpCall;

    fn dune() -> Book {
        Book {
            id: BookId::new("1"),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            published_year: 1965,
            price: 10.0,
        }
    }

    const BASE: &str = "http://books.test";

    #[test]
    fn foreign_results_are_ignored() {
        assert_eq!(decode_web_result(200, b"[]", &BTreeMap::new()), None);
    }

    #[test]
    fn fetch_decodes_integer_ids() {
        let body = br#"[{"id":1,"title":"Dune","author":"Herbert","published_year":1965,"price":10.0}]"#;
        let response = decode_web_result(200, body, &HttpCall::fetch_books(BASE).context);

        assert_eq!(response, Some(ApiResponse::BooksFetched(vec![dune()])));
    }

    #[test]
    fn create_accepts_201() {
        let body = br#"{"id":"2","title":"Emma","author":"Austen","published_year":1815,"price":3}"#;
        let context = HttpCall::create_book(BASE, &dune().draft()).unwrap().context;

        let Some(ApiResponse::BookCreated(book)) = decode_web_result(201, body, &context) else {
            panic!("expected created book");
        };
        assert_eq!(book.id, BookId::new("2"));
        assert_eq!(book.title, "Emma");
    }

    #[test]
    fn update_returns_submitted_record_regardless_of_body() {
        let context = HttpCall::update_book(BASE, &dune()).unwrap().context;
        assert_eq!(
            decode_web_result(200, b"", &context),
            Some(ApiResponse::BookUpdated(dune()))
        );
    }

    #[test]
    fn delete_accepts_204_without_body() {
        let context = HttpCall::delete_book(BASE, &BookId::new("9")).context;
        assert_eq!(
            decode_web_result(204, b"", &context),
            Some(ApiResponse::BookDeleted(BookId::new("9")))
        );
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let context = HttpCall::update_book(BASE, &dune()).unwrap().context;
        let response = decode_web_result(404, b"not found", &context);

        assert!(matches!(
            response,
            Some(ApiResponse::Failed { operation: Operation::UpdateBook, ref reason })
                if reason.contains("404")
        ));
    }

    #[test]
    fn malformed_body_is_a_failure() {
        let response = decode_web_result(200, b"{oops", &HttpCall::fetch_books(BASE).context);
        assert!(matches!(
            response,
            Some(ApiResponse::Failed { operation: Operation::FetchBooks, .. })
        ));
    }
}
