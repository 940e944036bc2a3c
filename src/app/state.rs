//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for everything the plugin shows:
//! the collection as last reported by the server, the derived filtered rows,
//! the selection cursor, the forms and the pending delete prompt.
//!
//! # State Components
//!
//! - **Books**: the collection, in server order
//! - **Filtered Books**: subset matching the search query, recomputed after
//!   every change to either input
//! - **Selection**: cursor position within the filtered rows
//! - **Forms**: the add form (kept across openings) and the edit session
//! - **Input Mode**: controls keybinding interpretation and overlays
//!
//! # Example
//!
//! ```rust
//! use bookdesk::app::AppState;
//! use bookdesk::domain::{Book, BookId};
//! use bookdesk::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! state.replace_books(vec![Book {
//!     id: BookId::new("1"),
//!     title: "Dune".into(),
//!     author: "Herbert".into(),
//!     published_year: 1965,
//!     price: 10.0,
//! }]);
//! state.search_query = "dune".into();
//! state.apply_search_filter();
//! assert_eq!(state.filtered_books.len(), 1);
//! ```

use super::form::{BookForm, EditSession, FormField};
use super::modes::{FormKind, InputMode, SearchFocus};
use crate::domain::{current_year, filter_books, match_ranges, Book, BookId};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnLayout, ConfirmView, DisplayRow, EmptyState, FieldView, FooterInfo, FormView,
    HeaderInfo, SearchBarInfo, UIViewModel,
};

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The collection as last reported by the server.
    pub books: Vec<Book>,

    /// Books matching `search_query`, in collection order.
    ///
    /// Recomputed by `apply_search_filter()`. Used for rendering and
    /// selection bounds checking.
    pub filtered_books: Vec<Book>,

    /// Zero-based index of the selected row within `filtered_books`.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Mode restored when a form or the delete prompt closes.
    pub resume_mode: InputMode,

    /// Current search query string.
    pub search_query: String,

    /// The add form. Survives closing so half-typed values are kept.
    pub create_form: BookForm,

    /// The open edit modal, if any.
    pub editing: Option<EditSession>,

    /// Book awaiting delete confirmation.
    pub pending_delete: Option<BookId>,

    /// Set while a fetch of the collection is in flight.
    pub loading: bool,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state in normal mode.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            books: vec![],
            filtered_books: vec![],
            selected_index: 0,
            input_mode: InputMode::Normal,
            resume_mode: InputMode::Normal,
            search_query: String::new(),
            create_form: BookForm::blank(current_year()),
            editing: None,
            pending_delete: None,
            loading: false,
            theme,
        }
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_books.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_books.len();
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_books.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_books.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns the book under the cursor, if any row is visible.
    ///
    /// Row actions (edit, delete) apply to this book.
    ///
    /// # Returns
    ///
    /// `None` when the filtered list is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookdesk::app::AppState;
    /// use bookdesk::ui::Theme;
    ///
    /// let state = AppState::new(Theme::default());
    /// assert!(state.selected_book().is_none());
    /// ```
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.filtered_books.get(self.selected_index)
    }

    /// Recomputes `filtered_books` from the collection and the query, then
    /// clamps the cursor.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_books = self.books.len(),
            query_len = self.search_query.len()
        )
        .entered();

        self.filtered_books = filter_books(&self.books, &self.search_query)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered_books.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_books.len() - 1);
        }

        tracing::debug!(
            filtered_count = self.filtered_books.len(),
            "search filter applied"
        );
    }

    /// Replaces the whole collection with a fresh server snapshot.
    pub fn replace_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.apply_search_filter();
    }

    /// Appends a record returned by the server.
    pub fn append_book(&mut self, book: Book) {
        self.books.push(book);
        self.apply_search_filter();
    }

    /// Replaces the record sharing `book.id`. Returns `false` if no record
    /// matched, which leaves the collection untouched.
    pub fn replace_book(&mut self, book: Book) -> bool {
        let Some(slot) = self.books.iter_mut().find(|b| b.id == book.id) else {
            return false;
        };
        *slot = book;
        self.apply_search_filter();
        true
    }

    /// Removes the record with `id`. Returns `false` if it was not present.
    pub fn remove_book(&mut self, id: &BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|b| &b.id != id);
        let removed = self.books.len() != before;
        if removed {
            self.apply_search_filter();
        }
        removed
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// Rows are windowed around the cursor so the selection stays visible,
    /// and every cell is truncated to its column width.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height; header, table headers, footer and the search
    ///   bar (in search mode) are subtracted before windowing
    /// * `cols` - Pane width, split into columns by [`ColumnLayout::for_width`]
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] holding only the visible rows plus whichever overlay
    /// (form or delete prompt) the input mode calls for.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = ColumnLayout::for_width(cols);
        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_books.len());

        let actual_count = visible_end.saturating_sub(visible_start);
        if actual_count < available_rows && self.filtered_books.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight = matches!(self.input_mode, InputMode::Search(_)) || self.has_active_query();

        let display_rows: Vec<DisplayRow> = self
            .filtered_books
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| {
                self.compute_display_row(book, visible_start + relative_idx, &columns, highlight)
            })
            .collect();

        UIViewModel {
            rows: display_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            columns,
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            search_bar: self.compute_search_bar(),
            form: self.compute_form(),
            confirm: self.compute_confirm(),
        }
    }

    fn has_active_query(&self) -> bool {
        !self.search_query.is_empty()
    }

    fn compute_display_row(
        &self,
        book: &Book,
        absolute_idx: usize,
        columns: &ColumnLayout,
        highlight: bool,
    ) -> DisplayRow {
        let (title_highlights, author_highlights) = if highlight {
            (
                match_ranges(&book.title, &self.search_query),
                match_ranges(&book.author, &self.search_query),
            )
        } else {
            (vec![], vec![])
        };

        DisplayRow {
            id: truncate(book.id.as_str(), columns.id),
            title: truncate(&book.title, columns.title),
            author: truncate(&book.author, columns.author),
            published_year: book.published_year.to_string(),
            price: truncate(&book.price_text(), columns.price),
            is_selected: absolute_idx == self.selected_index,
            title_highlights,
            author_highlights,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let mut title = if self.has_active_query() {
            format!(" Books ({} of {}) ", self.filtered_books.len(), self.books.len())
        } else {
            format!(" Books ({}) ", self.books.len())
        };
        if self.loading {
            title.push_str(" loading... ");
        }
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: navigate  /: search  a: add  e/Enter: edit  d: delete  r: refresh  q: quit"
            }
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: clear search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate  e/Enter: edit  d: delete"
            }
            InputMode::Form(_) => "Tab/Shift+Tab: next/prev field  Enter: save  ESC: cancel",
            InputMode::ConfirmDelete => "y: delete  any other key: cancel",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_books.is_empty() || self.loading {
            return None;
        }

        if self.books.is_empty() {
            Some(EmptyState {
                message: "No books yet".to_string(),
                subtitle: "Press 'a' to add a book or 'r' to refresh".to_string(),
            })
        } else {
            Some(EmptyState {
                message: "No matching books".to_string(),
                subtitle: format!("Nothing matches \"{}\"", self.search_query),
            })
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            _ => None,
        }
    }

    fn compute_form(&self) -> Option<FormView> {
        let (title, form) = match self.input_mode {
            InputMode::Form(FormKind::Create) => (" Add book ".to_string(), &self.create_form),
            InputMode::Form(FormKind::Edit) => {
                let session = self.editing.as_ref()?;
                (format!(" Edit book #{} ", session.book_id()), &session.form)
            }
            _ => return None,
        };

        let fields = FormField::ALL
            .iter()
            .map(|&field| FieldView {
                label: field.label(),
                value: form.value(field).to_string(),
                is_focused: form.focus == field,
            })
            .collect();

        Some(FormView {
            title,
            fields,
            notice: form.notice.clone(),
        })
    }

    fn compute_confirm(&self) -> Option<ConfirmView> {
        if self.input_mode != InputMode::ConfirmDelete {
            return None;
        }
        let id = self.pending_delete.as_ref()?;
        let title = self
            .books
            .iter()
            .find(|b| &b.id == id)
            .map_or_else(|| format!("#{id}"), |b| format!("\"{}\"", b.title));

        Some(ConfirmView {
            message: format!("Delete {title}? (y/N)"),
        })
    }

    /// Rows left for the table after header, borders, column header and
    /// footer, plus the search bar when it is shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Search(_) => total_rows.saturating_sub(9),
            _ => total_rows.saturating_sub(6),
        }
    }
}
