//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready text and flags only.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Visible window of table rows.
    pub rows: Vec<DisplayRow>,

    /// Index of the selected row within `rows`.
    pub selected_index: usize,

    /// Column widths for the current terminal width.
    pub columns: ColumnLayout,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Add form or edit modal, drawn over the table.
    pub form: Option<FormView>,

    /// Delete confirmation prompt, drawn over everything else.
    pub confirm: Option<ConfirmView>,
}

/// One book row in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_year: String,
    pub price: String,
    pub is_selected: bool,

    /// Character ranges of the search match within `title`.
    pub title_highlights: Vec<(usize, usize)>,

    /// Character ranges of the search match within `author`.
    pub author_highlights: Vec<(usize, usize)>,
}

/// Table column widths, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub id: usize,
    pub title: usize,
    pub author: usize,
    pub published_year: usize,
    pub price: usize,
}

impl ColumnLayout {
    const ID_WIDTH: usize = 6;
    const YEAR_WIDTH: usize = 6;
    const PRICE_WIDTH: usize = 10;
    const GAPS: usize = 4;
    const MIN_TEXT_WIDTH: usize = 8;

    /// Splits the width left after the fixed columns 3:2 between title and
    /// author, never going below a readable minimum.
    #[must_use]
    pub fn for_width(cols: usize) -> Self {
        let fixed = Self::ID_WIDTH + Self::YEAR_WIDTH + Self::PRICE_WIDTH + Self::GAPS;
        let flexible = cols.saturating_sub(fixed).max(Self::MIN_TEXT_WIDTH * 2);
        let title = (flexible * 3 / 5).max(Self::MIN_TEXT_WIDTH);
        let author = flexible.saturating_sub(title).max(Self::MIN_TEXT_WIDTH);

        Self {
            id: Self::ID_WIDTH,
            title,
            author,
            published_year: Self::YEAR_WIDTH,
            price: Self::PRICE_WIDTH,
        }
    }
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_typing: bool,
}

/// A book form overlay.
#[derive(Debug, Clone)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub notice: Option<String>,
}

/// One labelled input inside a [`FormView`].
#[derive(Debug, Clone)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub is_focused: bool,
}

/// Delete confirmation prompt.
#[derive(Debug, Clone)]
pub struct ConfirmView {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::ColumnLayout;

    #[test]
    fn layout_fills_wide_terminals() {
        let layout = ColumnLayout::for_width(120);
        let total = layout.id + layout.title + layout.author + layout.published_year + layout.price + 4;
        assert_eq!(total, 120);
        assert!(layout.title > layout.author);
    }

    #[test]
    fn layout_keeps_minimum_on_narrow_terminals() {
        let layout = ColumnLayout::for_width(20);
        assert_eq!(layout.title, 9);
        assert_eq!(layout.author, 8);
    }
}
