//! Empty state component renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Prints `text` centered on `row` using `style`.
fn centered_line(row: usize, text: &str, style: &str, cols: usize) {
    let len = char_len(text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

/// Renders the two-line empty state message starting at `row`.
///
/// Shown in place of the table when the collection is empty or nothing
/// matches the query.
///
/// # Parameters
///
/// * `row` - Row of the message line (1-indexed)
/// * `empty` - Message and subtitle, e.g. "No matching books"
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The row after the subtitle
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    centered_line(row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    centered_line(row + 1, &empty.subtitle, &subtitle_style, cols);
    row + 2
}
