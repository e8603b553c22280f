//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the Cipherdeck library and the
//! Zellij plugin system. It maps Zellij events to library events, runs
//! [`handle_event`], and turns the returned actions into Zellij API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer, `WebRequestResult` and permission events
//! 3. **Update**: Map events, delegate to the library, execute actions
//! 4. **Render**: Call library render function
//!
//! # Side Effects
//!
//! - `CallService` → `web_request` (POST, JSON body); the reply comes back as
//!   `WebRequestResult` with the request context map untouched
//! - `ScheduleTick` → `set_timeout`; the reply comes back as `Timer`
//! - `CloseFocus` → `hide_self`
//!
//! # Keybindings
//!
//! Cipher view:
//! - `Ctrl+Enter` / `Ctrl+s`: Run the selected operation
//! - `Tab`: Switch between text and key field
//! - `Up`/`Down` on the key field: Increase/decrease the key
//! - `Ctrl+a`: Next algorithm
//! - `Ctrl+o`: Toggle encrypt/decrypt
//! - `Ctrl+l`: Clear all fields
//! - `Ctrl+g`: Generate new substitution keys
//! - `Ctrl+t`: Switch to the quiz
//! - `Esc`: Close plugin
//!
//! Quiz view:
//! - `j`/`k`/`Up`/`Down`: Previous/next question
//! - `h`/`l`/`Left`/`Right`: Previous/next option
//! - `Enter`/`Space`: Answer with the highlighted option
//! - `1`-`9`: Answer with that option
//! - `r`: Reset the quiz
//! - `Ctrl+t`: Switch to the cipher
//! - `q`/`Esc`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use cipherdeck::app::{Focus, Step};
use cipherdeck::domain::KeyAction;
use cipherdeck::infrastructure::{Clock, SystemClock};
use cipherdeck::service::{decode_reply, ServiceReply, TraceContext};
use cipherdeck::{handle_event, Action, Config, Event, View};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: cipherdeck::app::AppState,

    /// Base URL of the cipher service.
    service_url: String,

    clock: SystemClock,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: cipherdeck::initialize(&default_config),
            service_url: default_config.service_url,
            clock: SystemClock,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Requests `WebAccess` to reach the cipher service.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cipherdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            service_url = %config.service_url,
            start_view = ?config.start_view,
            "parsed configuration"
        );
        self.app = cipherdeck::initialize(&config);
        self.service_url.clone_from(&config.service_url);

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => self.run(event),
                None => false,
            },
            zellij_tile::prelude::Event::Timer(_) => self.run(Event::Tick),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                let Some(reply) = decode_reply(status, &body, &context) else {
                    return false;
                };
                let reply_span = tracing::debug_span!("service_reply", status, body_len = body.len());
                // Parent the reply handling on the span that issued the call.
                if let Some(trace_context) = TraceContext::from_map(&context) {
                    trace_context.set_parent_of(&reply_span);
                }
                let _reply_guard = reply_span.entered();
                self.run(Event::ServiceReply(reply))
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = match status {
                    PermissionStatus::Granted => vec![PermissionType::WebAccess],
                    PermissionStatus::Denied => vec![],
                };
                tracing::debug!(granted = ?granted, "permission result");
                self.run(Event::PermissionsResult { granted })
            }
            _ => false,
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        cipherdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Handles an event and every follow-up event its actions produce.
    fn run(&mut self, event: Event) -> bool {
        let mut pending = VecDeque::from([event]);
        let mut should_render = false;

        while let Some(event) = pending.pop_front() {
            match handle_event(&mut self.app, &event, self.clock.now()) {
                Ok((render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = render,
                        "event handled successfully"
                    );
                    should_render |= render;
                    pending.extend(actions.iter().filter_map(|a| self.execute_action(a)));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the active view.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('t') => Some(Event::ToggleView),
                BareKey::Enter | BareKey::Char('s') if self.app.view == View::Cipher => Some(Event::Submit),
                BareKey::Char('a') if self.app.view == View::Cipher => Some(Event::CycleAlgorithm),
                BareKey::Char('o') if self.app.view == View::Cipher => Some(Event::ToggleOperation),
                BareKey::Char('l') if self.app.view == View::Cipher => Some(Event::Clear),
                BareKey::Char('g') if self.app.view == View::Cipher => Some(Event::RegenerateKeys),
                _ => None,
            };
        }

        match self.app.view {
            View::Cipher => self.map_cipher_key(key),
            View::Quiz => self.map_quiz_key(key),
        }
    }

    fn map_cipher_key(&self, key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc => Event::CloseFocus,
            BareKey::Tab => Event::FocusNext,
            BareKey::Up if self.app.focus == Focus::Key => Event::AdjustKey(KeyAction::Increase),
            BareKey::Down if self.app.focus == Focus::Key => Event::AdjustKey(KeyAction::Decrease),
            BareKey::Enter => Event::Newline,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_quiz_key(&self, key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
            BareKey::Tab => Event::ToggleView,
            BareKey::Down | BareKey::Char('j') => Event::MoveQuestion(Step::Next),
            BareKey::Up | BareKey::Char('k') => Event::MoveQuestion(Step::Prev),
            BareKey::Right | BareKey::Char('l') => Event::MoveOption(Step::Next),
            BareKey::Left | BareKey::Char('h') => Event::MoveOption(Step::Prev),
            BareKey::Enter | BareKey::Char(' ') => Event::AnswerSelected,
            BareKey::Char('r') => Event::ResetQuiz,
            BareKey::Char(c @ '1'..='9') => Event::Answer {
                question: self.app.question_cursor,
                option: c.to_digit(10).map_or(0, |d| d as usize - 1),
            },
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns a follow-up event when the action failed before reaching Zellij.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            Action::ScheduleTick(delay) => {
                set_timeout(delay.as_secs_f64());
                None
            }
            Action::CallService(call) => match call.to_http(&self.service_url) {
                Ok(http) => {
                    tracing::debug!(url = %http.url, body_len = http.body.len(), "sending web request");
                    web_request(http.url, HttpVerb::Post, http.headers, http.body, http.context);
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to build web request");
                    Some(Event::ServiceReply(ServiceReply::Failed {
                        call: call.kind(),
                        generation: call.generation(),
                        message: e.to_string(),
                    }))
                }
            },
        }
    }
}
