//! Header component renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar centered across the full width.
///
/// Titles wider than the pane are cut at `cols` characters.
///
/// # Parameters
///
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Header information, e.g. `" Books (3 of 12) "`
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// [left padding] Books (3 of 12) [right padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = char_len(&header.title).min(cols);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title.chars().take(cols).collect::<String>());
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}
