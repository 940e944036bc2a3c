//! Delete confirmation prompt renderer.

use crate::ui::helpers::{char_len, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ConfirmView;

/// Renders the prompt as a 3-line box centered in the pane.
///
/// # Parameters
///
/// * `confirm` - Prompt text, e.g. `Delete "Dune"? (y/N)`
/// * `theme` - Active color theme
/// * `rows` - Pane height
/// * `cols` - Pane width
pub fn render_confirm(confirm: &ConfirmView, theme: &Theme, rows: usize, cols: usize) {
    let inner_width = (char_len(&confirm.message) + 2).min(cols.saturating_sub(4));
    let left = cols.saturating_sub(inner_width + 2) / 2 + 1;
    let top = rows.saturating_sub(3) / 2 + 1;
    let border = Theme::fg(&theme.colors.form_border);

    position_cursor(top, left);
    print!("{border}┌{}┐", "─".repeat(inner_width));

    position_cursor(top + 1, left);
    print!("│{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
    print!("{}", pad(&format!(" {}", confirm.message), inner_width));
    print!("{}{border}│", Theme::reset());

    position_cursor(top + 2, left);
    print!("└{}┘{}", "─".repeat(inner_width), Theme::reset());
}
