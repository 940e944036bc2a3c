//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the Catppuccin `mocha` (default) and `latte` palettes,
//! compiled in from `themes/*.toml`. Custom themes use the same TOML shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! form_border = "#cba6f7"
//! error_fg = "#f38ba8"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::{BookdeskError, Result};

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color strings (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, column headers and other secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Frame of the add form, the edit modal and the delete prompt.
    pub form_border: String,
    /// Validation notices.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` for unknown names.
    ///
    /// ```
    /// use bookdesk::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BookdeskError::Io`] if the file cannot be read and
    /// [`BookdeskError::Theme`] if its contents are not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| BookdeskError::Theme(e.to_string()))
    }

    /// Hex to RGB; malformed input falls back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Plain palette used if the compiled-in default ever fails to parse.
    fn fallback() -> Self {
        let color = |hex: &str| hex.to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: color("#ffffff"),
                header_bg: None,
                selection_fg: color("#000000"),
                selection_bg: color("#ffffff"),
                text_normal: color("#ffffff"),
                text_dim: color("#808080"),
                border: color("#808080"),
                search_bar_border: color("#ffffff"),
                match_highlight_fg: color("#000000"),
                match_highlight_bg: color("#ffff00"),
                empty_state_fg: color("#ffffff"),
                form_border: color("#ffffff"),
                error_fg: color("#ff0000"),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte"] {
            assert_eq!(Theme::from_name(name).map(|t| t.name).as_deref(), Some(name));
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn escapes_use_rgb_and_tolerate_garbage() {
        assert_eq!(Theme::fg("#1e1e2e"), "\u{1b}[38;2;30;30;46m");
        assert_eq!(Theme::bg("zz"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#é1e2e"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = Theme {
            name: "custom".to_string(),
            ..Theme::default()
        };
        write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), custom);
    }

    #[test]
    fn invalid_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(BookdeskError::Theme(_))));
    }
}
