//! Composable UI component renderers.
//!
//! Each component prints one part of the screen at an explicit row and
//! returns the next free row, so layouts read top to bottom.
//!
//! # Components
//!
//! - [`header`]: title bar with counts and the loading hint
//! - [`footer`]: keybinding hints for the current mode
//! - [`search`]: search input box
//! - [`table`]: the book table
//! - [`empty`]: message shown instead of an empty table
//! - [`form`]: add form and edit modal overlay
//! - [`confirm`]: delete confirmation overlay

mod confirm;
mod empty;
mod footer;
mod form;
mod header;
mod search;
mod table;

pub use confirm::render_confirm;
pub use form::render_form;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal rule and returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the base layout underneath any overlay.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Border]
/// [Footer]
/// ```
///
/// Reserves 6 rows of chrome, 9 with the search bar; the view model windows
/// its rows to match.
pub fn render_list_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, &vm.columns, theme, cols);
        render_table_rows(current_row, &vm.rows, &vm.columns, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
