//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain and API layers.
//! Data flows one way:
//!
//! ```text
//! Key / host event → Event → handle_event → AppState mutation → Actions
//!                                ↑                                 ↓
//!                                └──── Event::Api(ApiResponse) ←── BookApi
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`form`]: text buffers behind the add form and the edit modal
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: input mode state machine types
//! - [`state`]: application state container and view model computation

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

#[cfg(test)]
mod scenarios;

pub use actions::Action;
pub use form::{BookForm, EditSession, FormField};
pub use handler::{handle_event, Event};
pub use modes::{FormKind, InputMode, SearchFocus};
pub use state::AppState;
