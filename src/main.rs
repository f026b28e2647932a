//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the reposcope library and the Zellij
//! plugin system. Host events are translated into library [`Event`]s, and
//! the [`Action`]s that come back are turned into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess` and `RunCommands`
//! 3. **Initial fetch**: issued once permissions are granted
//! 4. **Update**: map events, delegate to `handle_event`, execute actions
//! 5. **Render**: call the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → navigation, paging, layout and query editing events
//! - `WebRequestResult` → `Event::SearchResponse`, matched by the sequence
//!   number in the request context
//! - `PermissionRequestResult` → `PermissionsGranted` / `PermissionsDenied`
//! - `RunCommandResult` → logged only (opener exit status)
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! In normal mode:
//! - `j` / `k`: Move down / up
//! - `n` `l` `Right`: Next page
//! - `p` `h` `Left`: Previous page
//! - `s`: Cycle sort
//! - `g` / `t` / `v`: Grid / table / toggle layout
//! - `r`: Refresh
//! - `/` or `i`: Focus search box
//! - `Enter`: Open selected repository
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters edit the query, `Backspace` deletes, `Ctrl+u` clears
//! - `Enter`: Submit and return to normal mode
//! - `Esc`: Return to normal mode, keeping the text

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use std::collections::BTreeMap;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
use reposcope::github::RequestContext;
#[cfg(target_family = "wasm")]
use reposcope::{handle_event, Action, Config, Event, InputMode};

#[cfg(target_family = "wasm")]
register_plugin!(State);

/// Entry point for non-wasm targets, where the Zellij host functions do not
/// exist. Lets `cargo test` link the binary on the build machine.
#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("reposcope is a Zellij plugin: build it with `--target wasm32-wasip1` and load the .wasm from Zellij");
    std::process::exit(1);
}

/// Plugin state wrapper.
#[cfg(target_family = "wasm")]
struct State {
    /// Core application state from the library layer.
    app: reposcope::AppState,

    /// Command that receives repository URLs.
    open_command: String,
}

#[cfg(target_family = "wasm")]
impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: reposcope::initialize(&default_config),
            open_command: default_config.open_command,
        }
    }
}

#[cfg(target_family = "wasm")]
impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = reposcope::observability::init_tracing(&config) {
            eprintln!("reposcope: tracing disabled: {e}");
        }

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            query = %config.initial_query.location(),
            api_base = %config.upstream.api_base,
            live_search = config.live_search,
            "parsed configuration"
        );
        self.app = reposcope::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
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
                match Self::map_web_response(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted");
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                Event::PermissionsDenied
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code == Some(0) {
                    tracing::debug!("opener finished");
                } else {
                    let error = String::from_utf8_lossy(&stderr);
                    tracing::warn!(exit_code = ?exit_code, error = %error, "opener command failed");
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
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
        reposcope::ui::render(&self.app, rows, cols);
    }
}

#[cfg(target_family = "wasm")]
impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('u') if self.app.input_mode == InputMode::Search => Some(Event::ClearQuery),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            _ => {}
        }

        match self.app.input_mode {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Char('j') => Event::KeyDown,
                BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('n' | 'l') | BareKey::Right => Event::NextPage,
                BareKey::Char('p' | 'h') | BareKey::Left => Event::PrevPage,
                BareKey::Char('s') => Event::CycleSort,
                BareKey::Char('g') => Event::ShowGrid,
                BareKey::Char('t') => Event::ShowTable,
                BareKey::Char('v') => Event::ToggleView,
                BareKey::Char('r') => Event::Refresh,
                BareKey::Char('/' | 'i') => Event::SearchMode,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Responses without a readable context were not issued by this plugin.
    fn map_web_response(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request) = RequestContext::from_map(context) else {
            tracing::debug!(status, "ignoring web response without request context");
            return None;
        };
        tracing::debug!(seq = request.seq, status, body_len = body.len(), "web response");
        Some(Event::SearchResponse {
            seq: request.seq,
            status,
            body,
            trace: request.trace,
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                let _span = tracing::debug_span!("fetch", seq = request.context.seq, url = %request.url).entered();
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.to_map(),
                );
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, command = %self.open_command, "opening repository");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }
}
