//! Search bar component renderer.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search box and returns the next free row.
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Search: herb█   │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
///
/// The block cursor is only drawn while the query has focus; when the
/// results are focused the border is dimmed instead.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_typing {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}");
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_typing { "█" } else { "" };
    let search_text = truncate(&format!(" Search: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(char_len(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{border}│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}");
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
