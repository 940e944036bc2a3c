//! bookdesk: a Zellij plugin for managing a list of books over a REST API.
//!
//! It lists the collection served by a backend, filters it as you type,
//! adds new books, edits them in a modal with validation, and deletes them
//! after confirmation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and state transitions             │
//! │  - Form buffers and input modes                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────┐                   ┌───────────────┐
//! │ UI Layer      │                   │ API Layer     │
//! │ (ui/)         │                   │ (api/)        │
//! │ - Rendering   │                   │ - BookApi     │
//! │ - Theming     │                   │ - web_request │
//! └───────────────┘                   └───────────────┘
//!         │                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - Book, BookDraft, validation, filter, errors      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookdesk.wasm" {
//!         api_url "http://127.0.0.1:8000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookdesk::api::{ApiRequest, ApiResponse};
//! use bookdesk::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions, vec![Action::Request(ApiRequest::FetchBooks)]);
//!
//! handle_event(&mut state, &Event::Api(ApiResponse::BooksFetched(vec![])))?;
//! assert!(!state.loading);
//! # Ok::<(), bookdesk::BookdeskError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{Book, BookDraft, BookId, BookdeskError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

use infrastructure::expand_tilde;

/// Backend base URL used when the plugin configuration names none.
///
/// Fixed at build time from `BOOKDESK_API_URL`, falling back to a local
/// development server.
pub const DEFAULT_API_URL: &str = match option_env!("BOOKDESK_API_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

/// Plugin configuration parsed from Zellij's configuration map.
///
/// ```kdl
/// plugin location="file:/path/to/bookdesk.wasm" {
///     api_url "https://books.example.com"
///     theme "catppuccin-latte"
///     theme_file "~/.config/zellij/bookdesk-theme.toml"
///     trace_level "bookdesk=debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL without a trailing slash.
    pub api_url: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file, with `~` already mapped to `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: normalize_api_url(DEFAULT_API_URL),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookdesk::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://books.example.com/".to_string());
    /// map.insert("theme_file".to_string(), "~/theme.toml".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://books.example.com");
    /// assert_eq!(config.theme_file.as_deref(), Some("/host/theme.toml"));
    /// assert_eq!(config.trace_level, "info");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.as_str().trim())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_url: get("api_url").map_or(defaults.api_url, normalize_api_url),
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(expand_tilde),
            trace_level: get("trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    /// Resolves the configured theme: file first, then name, then default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the initial application state for `config`.
///
/// The collection starts empty; it is fetched once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing bookdesk plugin");
    AppState::new(config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000")]
    #[case("http://localhost:8000/", "http://localhost:8000")]
    #[case(" https://books.example.com/api// ", "https://books.example.com/api")]
    fn api_url_is_normalized(#[case] raw: &str, #[case] expected: &str) {
        let config = Config::from_zellij(&map(&[("api_url", raw)]));
        assert_eq!(config.api_url, expected);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_zellij(&map(&[("api_url", "  "), ("trace_level", "")]));
        assert_eq!(config.api_url, Config::default().api_url);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config::from_zellij(&map(&[("theme", "solarized")]));
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn missing_theme_file_falls_back_to_named_theme() {
        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", "/nonexistent/theme.toml"),
        ]));
        assert_eq!(config.theme().name, "catppuccin-latte");
    }
}
