//! Footer component renderer.
//!
//! Shows the keybinding hints for the current input mode, centered and
//! dimmed. Hints wider than the pane are cut rather than wrapped so the
//! layout above stays intact.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the help line at `row`.
///
/// # Parameters
///
/// * `row` - Row position to render the footer (1-indexed)
/// * `footer` - Keybinding hints for the current mode
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
