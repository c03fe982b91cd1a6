//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the zgallery library and the Zellij
//! plugin system. It translates host events into library events, runs the
//! library's actions as host calls, and delegates rendering.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` (search) and `RunCommands` (opener)
//! 3. **Subscribe**: Key, `WebRequestResult`, Timer, permission and command results
//! 4. **Update**: Map events, call `handle_event`, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `WebRequestResult` → `Event::FetchSettled` (generation from the context map)
//! - `Timer` → `Event::TimerFired`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//! - `Key` → depends on the modal and the input mode, see below
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! While typing a query:
//! - characters: Edit the query
//! - `Enter`: Search
//! - `Esc`: Back to the results
//!
//! While browsing results:
//! - `j` / `k`: Move down / up
//! - `Enter`: View the selected image
//! - `m`: Load more
//! - `/`: Edit the query
//! - `q` / `Esc`: Close the plugin
//!
//! With the image view open:
//! - `o`: Open the image with the configured opener
//! - `Esc` / `Enter` / `q`: Close the view

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zgallery::api::{decode_response, generation_from_context};
use zgallery::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Context key marking commands started by the external opener.
const OPENER_CONTEXT: &str = "opener";

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zgallery::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zgallery::AppState::new(zgallery::Theme::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests
    /// permissions and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zgallery::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(?config, "parsed configuration");
        self.app = zgallery::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
            EventType::RunCommandResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Translates a Zellij event, delegates to `handle_event`, executes the
    /// resulting actions, and returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => {
                tracing::debug!(elapsed, "timer fired");
                Event::TimerFired
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                if !granted {
                    tracing::warn!("permissions denied - image search unavailable");
                }
                Event::PermissionsResult { granted }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                Self::log_command_result(exit_code, &stderr, &context);
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zgallery::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if self.app.modal.is_open() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseModal),
                BareKey::Char('o') => Some(Event::OpenExternal),
                _ => None,
            };
        }

        Some(match (self.app.input_mode, key.bare_key) {
            (_, BareKey::Down) => Event::KeyDown,
            (_, BareKey::Up) => Event::KeyUp,

            (InputMode::Typing, BareKey::Enter) => Event::SubmitQuery,
            (InputMode::Typing, BareKey::Esc) => Event::CancelInput,
            (InputMode::Typing, BareKey::Backspace) => Event::Backspace,
            (InputMode::Typing, BareKey::Char(c)) => Event::Char(c),

            (InputMode::Browsing, BareKey::Char('j')) => Event::KeyDown,
            (InputMode::Browsing, BareKey::Char('k')) => Event::KeyUp,
            (InputMode::Browsing, BareKey::Enter) => Event::OpenSelected,
            (InputMode::Browsing, BareKey::Char('m')) => Event::LoadMore,
            (InputMode::Browsing, BareKey::Char('/')) => Event::FocusSearch,
            (InputMode::Browsing, BareKey::Char('q') | BareKey::Esc) => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a finished web request to a settled fetch.
    ///
    /// Results without a generation in their context did not come from this
    /// plugin's fetches and are ignored.
    fn map_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(generation) = generation_from_context(context) else {
            tracing::debug!(status, "web request result without a fetch generation");
            return None;
        };

        tracing::debug!(status, generation, body_len = body.len(), "search response received");
        Some(Event::FetchSettled {
            generation,
            outcome: decode_response(status, body),
        })
    }

    fn log_command_result(exit_code: Option<i32>, stderr: &[u8], context: &BTreeMap<String, String>) {
        if !context.contains_key(OPENER_CONTEXT) {
            return;
        }
        if exit_code == Some(0) {
            tracing::debug!("opener finished");
        } else {
            tracing::warn!(
                exit_code = ?exit_code,
                stderr = %String::from_utf8_lossy(stderr),
                "opener failed"
            );
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Requests are not recorded on the span: their headers hold the key.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                hide_self();
            }
            Action::Fetch(request) => {
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::ScheduleTimeout { seconds, .. } => {
                set_timeout(f64::from(*seconds));
            }
            Action::OpenExternal { program, url } => {
                let mut context = BTreeMap::new();
                context.insert(OPENER_CONTEXT.to_string(), program.clone());
                run_command(&[program.as_str(), url.as_str()], context);
            }
        }
    }
}
