//! Cipherdeck: a Zellij plugin front end for a remote classical-cipher service.
//!
//! Cipherdeck lets the user:
//! - Encrypt or decrypt text with the Caesar, substitution, or transposition
//!   cipher through an HTTP service
//! - Ask the service to reshuffle its substitution keys
//! - Take a short cryptography quiz with scoring and a final verdict
//!
//! Every outcome is reported through a single transient notification that
//! fades in, stays for four seconds, and fades out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key maps, web requests, timers                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and action dispatching            │
//! │  - NotificationCenter, RequestOrchestrator,         │
//! │    QuizEngine                                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ Service Layer │
//! │ (ui/)         │                     │ (service/)    │
//! │ - Rendering   │                     │ - HTTP calls  │
//! │ - Theming     │                     │ - Reply codec │
//! │ - Components  │                     │ - Trace ctx   │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Clock and sandbox paths (infrastructure/)        │
//! │  - Cipher model, key rules, quiz bank (domain/)     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cipherdeck.wasm" {
//!         service_url "http://localhost:5000"
//!         theme "catppuccin-mocha"
//!         quiz_file "~/.config/cipherdeck/quiz.toml"
//!         start_view "cipher"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cipherdeck::{handle_event, initialize, Action, Config, Event};
//! use std::time::Instant;
//!
//! let mut state = initialize(&Config::default());
//! for c in "HELLO".chars() {
//!     handle_event(&mut state, &Event::Char(c), Instant::now())?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit, Instant::now())?;
//! assert!(matches!(actions[0], Action::CallService(_)));
//! # Ok::<(), cipherdeck::CipherdeckError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod service;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, View};
pub use domain::{CipherdeckError, QuestionBank, Result};
pub use ui::Theme;

use infrastructure::expand_tilde;
use std::collections::BTreeMap;

/// Base URL used when `service_url` is not configured.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the cipher service, without the `/api/...` path.
    pub service_url: String,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Path to a TOML question bank replacing the built-in quiz.
    pub quiz_file: Option<String>,

    /// View shown when the plugin opens.
    pub start_view: View,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            theme_name: None,
            theme_file: None,
            quiz_file: None,
            start_view: View::Cipher,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown or blank values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cipherdeck::{Config, View};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("service_url".to_string(), "http://cipher.lan:8080/".to_string());
    /// map.insert("start_view".to_string(), "quiz".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.service_url, "http://cipher.lan:8080");
    /// assert_eq!(config.start_view, View::Quiz);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let service_url = non_blank("service_url").map_or_else(
            || DEFAULT_SERVICE_URL.to_string(),
            |url| url.trim_end_matches('/').to_string(),
        );

        let start_view = non_blank("start_view")
            .and_then(|name| View::from_name(&name))
            .unwrap_or(View::Cipher);

        Self {
            service_url,
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            quiz_file: non_blank("quiz_file"),
            start_view,
            trace_level: non_blank("trace_level"),
        }
    }
}

/// Initializes the plugin state from configuration.
///
/// Theme and quiz files are loaded here. A file that cannot be read or parsed
/// is logged and replaced by the built-in default; the plugin always starts.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(service_url = %config.service_url, "initializing cipherdeck plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let bank = config.quiz_file.as_ref().map_or_else(QuestionBank::default, |quiz_file| {
        QuestionBank::from_file(expand_tilde(quiz_file)).unwrap_or_else(|e| {
            tracing::debug!(quiz_file = %quiz_file, error = %e, "failed to load quiz bank, using built-in questions");
            QuestionBank::default()
        })
    });

    tracing::debug!(theme = %theme.name, questions = bank.len(), "plugin state ready");

    AppState::new(theme, bank, config.start_view)
}
