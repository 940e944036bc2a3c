//! Zellij plugin wrapper and entry point.
//!
//! Translates Zellij events into library [`Event`]s, runs them through
//! [`handle_event`], and executes the returned [`Action`]s against the host.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: request `WebAccess`; the first fetch is issued once granted
//! 3. **Update**: map keys per input mode, decode `WebRequestResult`s
//! 4. **Render**: delegate to the library renderer
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`/`Ctrl+n`, `k`/`Up`/`Ctrl+p`: move
//! - `/`: search, `a`: add, `e`/`Enter`: edit, `d`: delete, `r`: refresh, `q`: close
//!
//! Search mode while typing: characters go to the query, `Enter` focuses the
//! results, `Esc` clears and exits. On the results: `j`/`k` move, `/` edits
//! the query, `e`/`Enter` edit, `d` deletes, `Esc` exits.
//!
//! Forms: characters go to the focused field, `Tab`/`Down` and
//! `Shift+Tab`/`Up` move between fields, `Enter` saves, `Esc` cancels.
//!
//! Delete prompt: `y` confirms, any other key declines.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;

use zellij_tile::prelude::*;

use bookdesk::api::{decode_web_result, ZellijBookApi};
use bookdesk::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper: the library state plus the host-backed API.
struct State {
    app: bookdesk::AppState,
    api: ZellijBookApi,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: bookdesk::initialize(&config),
            api: ZellijBookApi::new(config.api_url),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookdesk::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, theme = ?config.theme_name, "parsed configuration");
        self.app = bookdesk::initialize(&config);
        self.api = ZellijBookApi::new(config.api_url);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                match decode_web_result(status, &body, &context) {
                    Some(response) => Event::Api(response),
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookdesk::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press to an application event for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let shift = key.has_modifiers(&[KeyModifier::Shift]);

        match self.app.input_mode {
            InputMode::ConfirmDelete => Some(match key.bare_key {
                BareKey::Char('y' | 'Y') if !ctrl => Event::ConfirmDelete,
                _ => Event::DeclineDelete,
            }),
            InputMode::Form(_) => Some(match key.bare_key {
                BareKey::Tab if shift => Event::PrevField,
                BareKey::Tab | BareKey::Down => Event::NextField,
                BareKey::Up => Event::PrevField,
                BareKey::Char('n') if ctrl => Event::NextField,
                BareKey::Char('p') if ctrl => Event::PrevField,
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Char('n') if ctrl => Event::KeyDown,
                BareKey::Char('p') if ctrl => Event::KeyUp,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::FocusResults,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Char('n') if ctrl => Event::KeyDown,
                BareKey::Char('p') if ctrl => Event::KeyUp,
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Enter | BareKey::Char('e') => Event::EditSelected,
                BareKey::Char('d') => Event::DeleteSelected,
                BareKey::Esc => Event::ExitSearch,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Char('n') if ctrl => Event::KeyDown,
                BareKey::Char('p') if ctrl => Event::KeyUp,
                _ if ctrl => return None,
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('a') => Event::OpenCreateForm,
                BareKey::Enter | BareKey::Char('e') => Event::EditSelected,
                BareKey::Char('d') => Event::DeleteSelected,
                BareKey::Char('r') => Event::Refresh,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            }),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Request(request) => {
                if let Err(e) = request.dispatch(&mut self.api) {
                    tracing::error!(operation = %request.operation(), error = %e, "failed to send request");
                }
            }
        }
    }
}
