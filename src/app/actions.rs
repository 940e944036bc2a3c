//! Side effects requested by the event handler.
//!
//! The handler never talks to the host directly. It returns `Action`s and the
//! plugin runtime executes them in order after the state change is applied.

use crate::api::ApiRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request to the book backend through the [`BookApi`](crate::api::BookApi).
    Request(ApiRequest),
}
