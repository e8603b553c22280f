//! Infrastructure layer: time and sandbox paths.
//!
//! - [`clock`]: `Clock` trait with system and manual implementations
//! - [`paths`]: data directory and `~` expansion for the Zellij sandbox

pub mod clock;
pub mod paths;

pub use clock::{Clock, ManualClock, SystemClock};
pub use paths::{expand_tilde, get_data_dir};
