//! Table component renderer.
//!
//! Renders the book list as five columns (ID, TITLE, AUTHOR, YEAR, PRICE)
//! sized by [`ColumnLayout`]. Cells arrive pre-truncated from the view model;
//! this module only pads, colors and highlights them.

use crate::ui::helpers::{self, char_len, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnLayout, DisplayRow};

/// Renders the column headers.
///
/// # Parameters
///
/// * `row` - Row position (1-indexed)
/// * `columns` - Column widths for the current pane width
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
/// ID     TITLE              AUTHOR          YEAR        PRICE
/// ```
pub fn render_table_headers(row: usize, columns: &ColumnLayout, theme: &Theme, cols: usize) -> usize {
    let line = format!(
        "{} {} {} {} {:>width$}",
        pad("ID", columns.id),
        pad("TITLE", columns.title),
        pad("AUTHOR", columns.author),
        pad("YEAR", columns.published_year),
        "PRICE",
        width = columns.price
    );

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row in order, one line each.
///
/// # Returns
///
/// The row after the last one drawn (`row + rows.len()`)
pub fn render_table_rows(
    row: usize,
    rows: &[DisplayRow],
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for display_row in rows {
        current_row = render_table_row(current_row, display_row, columns, theme, cols);
    }
    current_row
}

/// One row, padded to the full width so the selection background is solid.
///
/// Selection colors take precedence over match highlights.
fn render_table_row(
    row: usize,
    item: &DisplayRow,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let row_style = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(row, 1);
    print!("{row_style}");

    print!("{} ", pad(&item.id, columns.id));
    render_cell(&item.title, &item.title_highlights, columns.title, item, theme, &row_style);
    print!(" ");
    render_cell(&item.author, &item.author_highlights, columns.author, item, theme, &row_style);
    print!(" ");
    print!("{} ", pad(&item.published_year, columns.published_year));
    print!("{:>width$}", item.price, width = columns.price);

    let line_len = columns.id + columns.title + columns.author + columns.published_year + 4
        + columns.price.max(char_len(&item.price));
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

fn render_cell(
    text: &str,
    ranges: &[(usize, usize)],
    width: usize,
    item: &DisplayRow,
    theme: &Theme,
    row_style: &str,
) {
    helpers::render_highlighted_text(text, ranges, theme, item.is_selected, row_style);
    print!("{}", " ".repeat(width.saturating_sub(char_len(text))));
}
