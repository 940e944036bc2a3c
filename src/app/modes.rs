//! Input mode state machine types.
//!
//! The mode decides how keys are interpreted and which overlay is drawn:
//!
//! - **Normal**: navigate the list and trigger row actions
//! - **Search**: type a filter query, or move through the filtered rows
//! - **Form**: type into the add form or the edit modal
//! - **`ConfirmDelete`**: a blocking yes/no prompt that swallows other input

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query.
    Typing,

    /// Keys move through the filtered rows; row actions are available.
    Navigating,
}

/// Which book form is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// The add form. Its contents survive closing it.
    Create,

    /// The edit modal for one book. Closing it discards the edits.
    Edit,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Search mode with its focus state.
    Search(SearchFocus),

    /// A form has keyboard focus.
    Form(FormKind),

    /// Waiting for the user to confirm or decline a delete.
    ConfirmDelete,
}

impl InputMode {
    /// Whether printable characters are consumed as text input.
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing) | Self::Form(_))
    }
}
