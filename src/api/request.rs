//! Outbound request description and correlation context.
//!
//! Web requests in Zellij are fire-and-forget: the result comes back later as
//! an event carrying the string map passed with the request. [`HttpCall`]
//! builds both the call and that map, so a response can be decoded without
//! consulting any pending-request table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{BookdeskError, Result};
use crate::domain::{Book, BookDraft, BookId};

/// Context key naming the [`Operation`].
pub const CONTEXT_OPERATION: &str = "bookdesk.op";
/// Context key carrying the target book id (update and delete).
pub const CONTEXT_BOOK_ID: &str = "bookdesk.book_id";
/// Context key carrying the submitted record as JSON (update).
pub const CONTEXT_BOOK: &str = "bookdesk.book";

/// The four calls the backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchBooks,
    CreateBook,
    UpdateBook,
    DeleteBook,
}

impl Operation {
    /// Stable name stored under [`CONTEXT_OPERATION`] and parsed back by
    /// [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchBooks => "fetch",
            Self::CreateBook => "create",
            Self::UpdateBook => "update",
            Self::DeleteBook => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = BookdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fetch" => Ok(Self::FetchBooks),
            "create" => Ok(Self::CreateBook),
            "update" => Ok(Self::UpdateBook),
            "delete" => Ok(Self::DeleteBook),
            other => Err(BookdeskError::Context(format!("unknown operation: {other}"))),
        }
    }
}

/// HTTP verbs used by the book API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully described HTTP call, ready for the host to execute.
///
/// Built through one constructor per [`Operation`]; each stamps the
/// correlation context the response decoder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

impl HttpCall {
    fn new(operation: Operation, method: HttpMethod, url: String, body: Option<Vec<u8>>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let mut context = BTreeMap::new();
        context.insert(CONTEXT_OPERATION.to_string(), operation.as_str().to_string());

        Self {
            method,
            url,
            headers,
            body: body.unwrap_or_default(),
            context,
        }
    }

    fn with_book_id(mut self, id: &BookId) -> Self {
        self.context.insert(CONTEXT_BOOK_ID.to_string(), id.to_string());
        self
    }

    /// `GET {base_url}/books/`.
    #[must_use]
    pub fn fetch_books(base_url: &str) -> Self {
        Self::new(Operation::FetchBooks, HttpMethod::Get, collection_url(base_url), None)
    }

    /// `POST {base_url}/books/` with `draft` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`BookdeskError::Decode`] if the draft fails to serialize.
    pub fn create_book(base_url: &str, draft: &BookDraft) -> Result<Self> {
        let body = serde_json::to_vec(draft)?;
        Ok(Self::new(
            Operation::CreateBook,
            HttpMethod::Post,
            collection_url(base_url),
            Some(body),
        ))
    }

    /// `PUT {base_url}/books/{id}` with the business fields as the body.
    ///
    /// The whole record also rides in the context, so a success can be
    /// applied without parsing the response body.
    ///
    /// # Errors
    ///
    /// Returns [`BookdeskError::Decode`] if the record fails to serialize.
    pub fn update_book(base_url: &str, book: &Book) -> Result<Self> {
        let body = serde_json::to_vec(&book.draft())?;
        let record = serde_json::to_string(book)?;

        let mut call = Self::new(
            Operation::UpdateBook,
            HttpMethod::Put,
            item_url(base_url, &book.id),
            Some(body),
        )
        .with_book_id(&book.id);
        call.context.insert(CONTEXT_BOOK.to_string(), record);
        Ok(call)
    }

    /// `DELETE {base_url}/books/{id}`.
    ///
    /// ```
    /// use bookdesk::api::{HttpCall, HttpMethod};
    /// use bookdesk::domain::BookId;
    ///
    /// let call = HttpCall::delete_book("http://127.0.0.1:8000", &BookId::new("4"));
    /// assert_eq!(call.method, HttpMethod::Delete);
    /// assert_eq!(call.url, "http://127.0.0.1:8000/books/4");
    /// assert!(call.body.is_empty());
    /// ```
    #[must_use]
    pub fn delete_book(base_url: &str, id: &BookId) -> Self {
        Self::new(Operation::DeleteBook, HttpMethod::Delete, item_url(base_url, id), None)
            .with_book_id(id)
    }
}

fn collection_url(base_url: &str) -> String {
    format!("{base_url}/books/")
}

fn item_url(base_url: &str, id: &BookId) -> String {
    format!("{base_url}/books/{id}")
}

/// A request the view layer wants sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// `GET /books/`.
    FetchBooks,
    /// `POST /books/` with the draft as body.
    CreateBook(BookDraft),
    /// `PUT /books/{id}` with the record's business fields as body.
    UpdateBook(Book),
    /// `DELETE /books/{id}`.
    DeleteBook(BookId),
}

impl ApiRequest {
    /// The operation this request performs, used for logging and failures.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::FetchBooks => Operation::FetchBooks,
            Self::CreateBook(_) => Operation::CreateBook,
            Self::UpdateBook(_) => Operation::UpdateBook,
            Self::DeleteBook(_) => Operation::DeleteBook,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://books.test";

    fn dune() -> Book {
        Book {
            id: BookId::new("1"),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            published_year: 1965,
            price: 10.0,
        }
    }

    #[test]
    fn fetch_targets_collection_without_body() {
        let call = HttpCall::fetch_books(BASE);

        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.url, "http://books.test/books/");
        assert!(call.body.is_empty());
        assert!(!call.headers.contains_key("Content-Type"));
        assert_eq!(call.context[CONTEXT_OPERATION], "fetch");
    }

    #[test]
    fn create_posts_draft_json() {
        let call = HttpCall::create_book(BASE, &dune().draft()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&call.body).unwrap();

        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.url, "http://books.test/books/");
        assert_eq!(call.headers["Content-Type"], "application/json");
        assert_eq!(
            body,
            serde_json::json!({
                "title": "Dune",
                "author": "Herbert",
                "published_year": 1965,
                "price": 10.0
            })
        );
    }

    #[test]
    fn update_puts_to_item_url_and_remembers_record() {
        let call = HttpCall::update_book(BASE, &dune()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&call.body).unwrap();
        let remembered: Book = serde_json::from_str(&call.context[CONTEXT_BOOK]).unwrap();

        assert_eq!(call.method, HttpMethod::Put);
        assert_eq!(call.url, "http://books.test/books/1");
        assert!(body.get("id").is_none());
        assert_eq!(call.context[CONTEXT_BOOK_ID], "1");
        assert_eq!(remembered, dune());
    }

    #[test]
    fn operation_names_parse_back() {
        for op in [
            Operation::FetchBooks,
            Operation::CreateBook,
            Operation::UpdateBook,
            Operation::DeleteBook,
        ] {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert!("patch".parse::<Operation>().is_err());
    }
}
