//! [`BookApi`] implementation on top of Zellij's host HTTP client.
//!
//! Requires the `WebAccess` permission and a subscription to
//! `WebRequestResult` events.

use zellij_tile::prelude::{web_request, HttpVerb};

use super::request::{HttpCall, HttpMethod, Operation};
use super::BookApi;
use crate::domain::error::Result;
use crate::domain::{Book, BookDraft, BookId};

/// Sends book API requests through `web_request`.
#[derive(Debug, Clone)]
pub struct ZellijBookApi {
    base_url: String,
}

impl ZellijBookApi {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Scheme, host and optional path prefix, without a
    ///   trailing slash (`Config::from_zellij` trims it)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    const fn verb(method: HttpMethod) -> HttpVerb {
        match method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
            HttpMethod::Put => HttpVerb::Put,
            HttpMethod::Delete => HttpVerb::Delete,
        }
    }

    fn send(operation: Operation, call: HttpCall) {
        let span = tracing::info_span!(
            "book_api_request",
            otel.kind = "client",
            http.request.method = call.method.as_str(),
            url.full = %call.url,
            operation = %operation
        );
        let _guard = span.entered();

        tracing::debug!(body_len = call.body.len(), "sending web request");
        web_request(
            call.url,
            Self::verb(call.method),
            call.headers,
            call.body,
            call.context,
        );
    }
}

impl BookApi for ZellijBookApi {
    fn fetch_books(&mut self) -> Result<()> {
        Self::send(Operation::FetchBooks, HttpCall::fetch_books(&self.base_url));
        Ok(())
    }

    fn create_book(&mut self, draft: &BookDraft) -> Result<()> {
        let call = HttpCall::create_book(&self.base_url, draft)?;
        Self::send(Operation::CreateBook, call);
        Ok(())
    }

    fn update_book(&mut self, book: &Book) -> Result<()> {
        let call = HttpCall::update_book(&self.base_url, book)?;
        Self::send(Operation::UpdateBook, call);
        Ok(())
    }

    fn delete_book(&mut self, id: &BookId) -> Result<()> {
        Self::send(Operation::DeleteBook, HttpCall::delete_book(&self.base_url, id));
        Ok(())
    }
}
