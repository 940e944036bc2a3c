//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place the application state changes. The
//! plugin runtime translates keys and host events into [`Event`]s, calls the
//! handler, re-renders when asked to, and executes the returned [`Action`]s.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Text input**: `Char`, `Backspace`, `Escape`
//! - **Forms**: `OpenCreateForm`, `EditSelected`, `NextField`, `PrevField`, `Submit`
//! - **Delete**: `DeleteSelected`, `ConfirmDelete`, `DeclineDelete`
//! - **Backend**: `Refresh`, `PermissionsResult`, `Api`
//!
//! # Example
//!
//! ```rust
//! use bookdesk::app::{handle_event, Action, AppState, Event};
//! use bookdesk::api::ApiRequest;
//! use bookdesk::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert_eq!(actions, vec![Action::Request(ApiRequest::FetchBooks)]);
//! assert!(state.loading);
//! # Ok::<(), bookdesk::domain::BookdeskError>(())
//! ```

use super::form::{BookForm, EditSession};
use super::modes::{FormKind, InputMode, SearchFocus};
use crate::api::{ApiRequest, ApiResponse, Operation};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{current_year, Book};

/// Events triggered by user input or host notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the cursor down one row (wraps to top).
    KeyDown,
    /// Moves the cursor up one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Enters search mode with an empty query.
    SearchMode,
    /// Returns focus from the results to the query.
    FocusSearchBar,
    /// Moves focus from the query to the results.
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Types a character into the query or the focused form field.
    Char(char),
    /// Deletes the last character of the query or the focused form field.
    Backspace,
    /// Cancels whatever the current mode is doing.
    Escape,

    /// Opens the add form with whatever it held when last closed.
    OpenCreateForm,
    /// Opens the edit modal seeded from the selected book.
    EditSelected,
    /// Asks for confirmation to delete the selected book.
    DeleteSelected,
    /// Answers the delete prompt with yes.
    ConfirmDelete,
    /// Answers the delete prompt with anything but yes.
    DeclineDelete,
    /// Focuses the next form field.
    NextField,
    /// Focuses the previous form field.
    PrevField,
    /// Validates the open form and sends it.
    Submit,

    /// Refetches the collection.
    Refresh,

    /// Result of the web access permission request.
    PermissionsResult {
        granted: bool,
    },

    /// A decoded backend response.
    Api(ApiResponse),
}

/// Processes an event, mutates state, and returns whether to re-render plus
/// the actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime's error path uniform.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.input_mode)
        .entered();

    match event {
        Event::KeyDown => {
            if !allows_row_actions(state.input_mode) && !is_searching(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if !allows_row_actions(state.input_mode) && !is_searching(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if state.input_mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if !is_searching(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => Ok((exit_search(state), vec![])),
        Event::Char(c) => {
            if state.input_mode == InputMode::Search(SearchFocus::Typing) {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, "search query updated");
                state.apply_search_filter();
                return Ok((true, vec![]));
            }
            let Some(form) = active_form_mut(state) else {
                return Ok((false, vec![]));
            };
            form.push_char(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode == InputMode::Search(SearchFocus::Typing) {
                state.search_query.pop();
                state.apply_search_filter();
                return Ok((true, vec![]));
            }
            let Some(form) = active_form_mut(state) else {
                return Ok((false, vec![]));
            };
            form.backspace();
            Ok((true, vec![]))
        }
        Event::Escape => match state.input_mode {
            InputMode::Form(FormKind::Create) => {
                tracing::debug!("closing add form, keeping values");
                state.input_mode = state.resume_mode;
                Ok((true, vec![]))
            }
            InputMode::Form(FormKind::Edit) => {
                tracing::debug!("discarding edits");
                state.editing = None;
                state.input_mode = state.resume_mode;
                Ok((true, vec![]))
            }
            InputMode::ConfirmDelete => Ok((decline_delete(state), vec![])),
            InputMode::Search(_) => Ok((exit_search(state), vec![])),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::OpenCreateForm => {
            if !allows_row_actions(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.resume_mode = state.input_mode;
            state.input_mode = InputMode::Form(FormKind::Create);
            Ok((true, vec![]))
        }
        Event::EditSelected => {
            if !allows_row_actions(state.input_mode) {
                return Ok((false, vec![]));
            }
            let Some(book) = state.selected_book().cloned() else {
                tracing::debug!("no book selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(book_id = %book.id, "opening edit modal");
            state.editing = Some(EditSession::open(&book));
            state.resume_mode = state.input_mode;
            state.input_mode = InputMode::Form(FormKind::Edit);
            Ok((true, vec![]))
        }
        Event::DeleteSelected => {
            if !allows_row_actions(state.input_mode) {
                return Ok((false, vec![]));
            }
            let Some(id) = state.selected_book().map(|b| b.id.clone()) else {
                tracing::debug!("no book selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(book_id = %id, "asking for delete confirmation");
            state.pending_delete = Some(id);
            state.resume_mode = state.input_mode;
            state.input_mode = InputMode::ConfirmDelete;
            Ok((true, vec![]))
        }
        Event::ConfirmDelete => {
            if state.input_mode != InputMode::ConfirmDelete {
                return Ok((false, vec![]));
            }
            state.input_mode = state.resume_mode;
            let Some(id) = state.pending_delete.take() else {
                return Ok((true, vec![]));
            };
            tracing::debug!(book_id = %id, "delete confirmed");
            Ok((true, vec![Action::Request(ApiRequest::DeleteBook(id))]))
        }
        Event::DeclineDelete => Ok((decline_delete(state), vec![])),
        Event::NextField => {
            let Some(form) = active_form_mut(state) else {
                return Ok((false, vec![]));
            };
            form.focus_next();
            Ok((true, vec![]))
        }
        Event::PrevField => {
            let Some(form) = active_form_mut(state) else {
                return Ok((false, vec![]));
            };
            form.focus_prev();
            Ok((true, vec![]))
        }
        Event::Submit => match state.input_mode {
            InputMode::Form(FormKind::Create) => Ok(submit_create(&mut state.create_form)),
            InputMode::Form(FormKind::Edit) => match state.editing.as_mut() {
                Some(session) => Ok(submit_edit(session)),
                None => Ok((false, vec![])),
            },
            _ => Ok((false, vec![])),
        },
        Event::Refresh => {
            if !allows_row_actions(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.loading = true;
            Ok((true, vec![Action::Request(ApiRequest::FetchBooks)]))
        }
        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("web access denied, the book list cannot be loaded");
                return Ok((false, vec![]));
            }
            tracing::debug!("web access granted, loading books");
            state.loading = true;
            Ok((true, vec![Action::Request(ApiRequest::FetchBooks)]))
        }
        Event::Api(response) => Ok((apply_response(state, response), vec![])),
    }
}

const fn allows_row_actions(mode: InputMode) -> bool {
    matches!(mode, InputMode::Normal | InputMode::Search(SearchFocus::Navigating))
}

const fn is_searching(mode: InputMode) -> bool {
    matches!(mode, InputMode::Search(_))
}

fn active_form_mut(state: &mut AppState) -> Option<&mut BookForm> {
    match state.input_mode {
        InputMode::Form(FormKind::Create) => Some(&mut state.create_form),
        InputMode::Form(FormKind::Edit) => state.editing.as_mut().map(|s| &mut s.form),
        _ => None,
    }
}

fn exit_search(state: &mut AppState) -> bool {
    if !is_searching(state.input_mode) {
        return false;
    }
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.input_mode = InputMode::Normal;
    state.search_query.clear();
    state.apply_search_filter();
    true
}

fn decline_delete(state: &mut AppState) -> bool {
    if state.input_mode != InputMode::ConfirmDelete {
        return false;
    }
    tracing::debug!(book_id = ?state.pending_delete, "delete declined");
    state.pending_delete = None;
    state.input_mode = state.resume_mode;
    true
}

/// The add form enforces presence, numeric fields and the year range.
fn submit_create(form: &mut BookForm) -> (bool, Vec<Action>) {
    let draft = form
        .parse()
        .and_then(|draft| draft.check_new(current_year()).map(|()| draft));

    match draft {
        Ok(draft) => {
            form.notice = None;
            (true, vec![Action::Request(ApiRequest::CreateBook(draft))])
        }
        Err(e) => {
            tracing::debug!(error = %e, "add form rejected");
            form.notice = Some(e.to_string());
            (true, vec![])
        }
    }
}

fn submit_edit(session: &mut EditSession) -> (bool, Vec<Action>) {
    let draft = session
        .form
        .parse()
        .and_then(|draft| draft.validate(current_year()).map(|()| draft));

    match draft {
        Ok(draft) => {
            session.form.notice = None;
            let book = Book::from_draft(session.book_id().clone(), draft);
            (true, vec![Action::Request(ApiRequest::UpdateBook(book))])
        }
        Err(e) => {
            tracing::debug!(book_id = %session.book_id(), error = %e, "edit rejected");
            session.form.notice = Some(e.to_string());
            (true, vec![])
        }
    }
}

fn apply_response(state: &mut AppState, response: &ApiResponse) -> bool {
    match response {
        ApiResponse::BooksFetched(books) => {
            tracing::debug!(count = books.len(), "books fetched");
            state.loading = false;
            state.replace_books(books.clone());
            true
        }
        ApiResponse::BookCreated(book) => {
            tracing::debug!(book_id = %book.id, "book created");
            state.append_book(book.clone());
            state.create_form = BookForm::blank(current_year());
            if state.input_mode == InputMode::Form(FormKind::Create) {
                state.input_mode = state.resume_mode;
            }
            true
        }
        ApiResponse::BookUpdated(book) => {
            if !state.replace_book(book.clone()) {
                tracing::debug!(book_id = %book.id, "updated book is no longer listed");
            }
            let editing_this = state
                .editing
                .as_ref()
                .is_some_and(|session| session.book_id() == &book.id);
            if editing_this {
                state.editing = None;
                if state.input_mode == InputMode::Form(FormKind::Edit) {
                    state.input_mode = state.resume_mode;
                }
            }
            true
        }
        ApiResponse::BookDeleted(id) => {
            tracing::debug!(book_id = %id, "book deleted");
            state.remove_book(id)
        }
        ApiResponse::Failed { operation, reason } => {
            tracing::error!(operation = %operation, reason = %reason, "book request failed");
            if *operation == Operation::FetchBooks {
                state.loading = false;
                return true;
            }
            false
        }
    }
}
