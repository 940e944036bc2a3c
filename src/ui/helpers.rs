//! Shared rendering utilities.
//!
//! All widths here are counted in `char`s, which is what the table cells and
//! highlight ranges use.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of `char`s in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` chars, ending in `...` when cut.
///
/// ```
/// use bookdesk::ui::helpers::truncate;
///
/// assert_eq!(truncate("Dune", 10), "Dune");
/// assert_eq!(truncate("The Left Hand of Darkness", 10), "The Lef...");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Left-aligns `text` in a cell of `width` chars, truncating if needed.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let cell = truncate(text, width);
    let fill = width.saturating_sub(char_len(&cell));
    format!("{cell}{}", " ".repeat(fill))
}

/// Splits `text` into `(segment, highlighted)` pieces.
///
/// Ranges are char indices; anything past the end of `text`, overlapping or
/// out of order is clamped away rather than panicking.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
        }
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }
    segments
}

/// Prints `text` with `ranges` in the match highlight colors.
///
/// On a selected row the selection colors win, so highlights are skipped.
/// `restore` is re-emitted after each highlight to return to the row style.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{restore}");
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Nguyễn Du", 9), "Nguyễn Du");
        assert_eq!(truncate("Truyện Kiều", 8), "Truyệ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(char_len(&pad("éé", 5)), 5);
    }

    #[test]
    fn segments_split_on_ranges() {
        assert_eq!(
            highlight_segments("Herbert", &[(1, 3)]),
            vec![
                ("H".to_string(), false),
                ("er".to_string(), true),
                ("bert".to_string(), false),
            ]
        );
    }

    #[test]
    fn segments_clamp_ranges_past_truncation() {
        assert_eq!(
            highlight_segments("Du...", &[(3, 9), (12, 14)]),
            vec![("Du.".to_string(), false), ("..".to_string(), true)]
        );
    }
}
