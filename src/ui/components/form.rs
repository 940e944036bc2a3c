//! Add form and edit modal renderer.
//!
//! Both forms are drawn as a centered box over the table:
//!
//! ```text
//! ┌─ Add book ───────────────────────────┐
//! │                                      │
//! │ > Title           Dune█              │
//! │   Author          Herbert            │
//! │   Published year  1965               │
//! │   Price           10                 │
//! │                                      │
//! │ Title and author must not be empty.  │
//! └──────────────────────────────────────┘
//! ```

use crate::ui::helpers::{char_len, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormView;

const MAX_BOX_WIDTH: usize = 64;
const LABEL_WIDTH: usize = 16;

/// Rows taken by the box: borders, two spacer lines, four fields, notice.
pub const FORM_HEIGHT: usize = 9;

/// Renders the form box centered in a `rows` x `cols` pane.
///
/// The focused field gets a `>` marker and a block cursor after its value.
/// A validation notice, when present, is drawn in the error color on the
/// last line inside the box.
///
/// # Parameters
///
/// * `form` - Title, field values and notice from the view model
/// * `theme` - Active color theme
/// * `rows` - Pane height, used to center the box vertically
/// * `cols` - Pane width, used to center and size the box
///
/// # Example
///
/// ```rust
/// use bookdesk::ui::components::render_form;
/// use bookdesk::ui::{FieldView, FormView, Theme};
///
/// let form = FormView {
///     title: " Add book ".to_string(),
///     fields: vec![FieldView { label: "Title", value: "Dune".to_string(), is_focused: true }],
///     notice: None,
/// };
/// render_form(&form, &Theme::default(), 24, 80);
/// ```
pub fn render_form(form: &FormView, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_BOX_WIDTH);
    let inner_width = box_width.saturating_sub(2);
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let top = rows.saturating_sub(FORM_HEIGHT) / 2 + 1;
    let border = Theme::fg(&theme.colors.form_border);

    let title = truncate(&form.title, inner_width.saturating_sub(1));
    position_cursor(top, left);
    print!("{border}┌─{}{}", Theme::bold(), title);
    print!("{}{border}", Theme::reset());
    print!("{}┐", "─".repeat(inner_width.saturating_sub(1 + char_len(&title))));

    let mut row = top + 1;
    let mut line = |content: String, style: String| {
        position_cursor(row, left);
        print!("{border}│{}{style}", Theme::reset());
        print!("{}", pad(&content, inner_width));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
        row += 1;
    };

    let text_style = Theme::fg(&theme.colors.text_normal);
    line(String::new(), text_style.clone());
    for field in &form.fields {
        let marker = if field.is_focused { ">" } else { " " };
        let cursor = if field.is_focused { "█" } else { "" };
        let style = if field.is_focused {
            format!("{}{}", Theme::bold(), text_style)
        } else {
            text_style.clone()
        };
        line(
            format!(" {marker} {}{}{cursor}", pad(field.label, LABEL_WIDTH), field.value),
            style,
        );
    }
    line(String::new(), text_style);
    line(
        form.notice.as_deref().map(|n| format!(" {n}")).unwrap_or_default(),
        Theme::fg(&theme.colors.error_fg),
    );

    position_cursor(row, left);
    print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());
}
