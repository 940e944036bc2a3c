//! Book API capability and its wire format.
//!
//! The application layer never talks to the network directly. It emits
//! [`ApiRequest`]s, which the plugin runtime hands to a [`BookApi`]
//! implementation; results come back as Zellij `WebRequestResult` events and
//! are decoded into [`ApiResponse`]s.
//!
//! ```text
//! handle_event → Action::Request(ApiRequest) → BookApi → web_request
//!                                                            │
//! handle_event ← Event::Api(ApiResponse) ← decode_web_result ┘
//! ```
//!
//! # Modules
//!
//! - [`request`]: request description, HTTP call building, correlation context
//! - [`response`]: status/body/context decoding
//! - [`zellij`]: `BookApi` backed by Zellij's `web_request`

pub mod request;
pub mod response;
pub mod zellij;

pub use request::{ApiRequest, HttpCall, HttpMethod, Operation};
pub use response::{decode_web_result, is_success, ApiResponse};
pub use zellij::ZellijBookApi;

use crate::domain::error::Result;
use crate::domain::{Book, BookDraft, BookId};

/// Capability interface for the remote book store.
///
/// Calls are asynchronous from the caller's point of view: a successful
/// return only means the request was handed off. Results arrive later as
/// events.
pub trait BookApi {
    /// Requests the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be handed off.
    fn fetch_books(&mut self) -> Result<()>;

    /// Requests creation of a new record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be built or handed off.
    fn create_book(&mut self, draft: &BookDraft) -> Result<()>;

    /// Requests replacement of the business fields of `book`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be built or handed off.
    fn update_book(&mut self, book: &Book) -> Result<()>;

    /// Requests deletion of the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be handed off.
    fn delete_book(&mut self, id: &BookId) -> Result<()>;
}

impl ApiRequest {
    /// Routes this request to the matching [`BookApi`] method.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying call.
    pub fn dispatch<A: BookApi + ?Sized>(&self, api: &mut A) -> Result<()> {
        match self {
            Self::FetchBooks => api.fetch_books(),
            Self::CreateBook(draft) => api.create_book(draft),
            Self::UpdateBook(book) => api.update_book(book),
            Self::DeleteBook(id) => api.delete_book(id),
        }
    }
}
