//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` after each
//! event and the plugin runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use cipherdeck::app::Action;
//! use cipherdeck::service::ServiceCall;
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::CallService(ServiceCall::regenerate_keys()),
//!     Action::ScheduleTick(Duration::from_millis(300)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::service::ServiceCall;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Sends a request to the remote cipher service.
    ///
    /// The reply comes back as a web request result and is decoded into
    /// [`Event::ServiceReply`](super::Event::ServiceReply).
    CallService(ServiceCall),

    /// Wakes the plugin up after the given delay with [`Event::Tick`](super::Event::Tick).
    ///
    /// Emitted whenever the notification region needs to change phase.
    ScheduleTick(Duration),
}
