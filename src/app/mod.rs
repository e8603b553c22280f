//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the domain and
//! service layers. It never performs I/O and never reads the clock: every
//! event arrives with the instant it happened.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Service Replies ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and ordering of component updates
//! - [`modes`]: View, focus, and cursor movement types
//! - [`notifications`]: Single-slot transient notifications
//! - [`quiz`]: Quiz scoring state machine
//! - [`request`]: Validation and lifecycle of transformation requests
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod quiz;
pub mod request;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Focus, Step, View};
pub use notifications::{Notification, NotificationCenter, NotificationKind, Phase};
pub use quiz::{AnswerOutcome, OptionMark, QuizEngine, QuizOutcome, QuizResult};
pub use request::{Completion, Dispatch, RequestOrchestrator, Stats};
pub use state::AppState;
