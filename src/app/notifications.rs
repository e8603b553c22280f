//! Single-slot transient notifications.
//!
//! [`NotificationCenter`] owns the only notification region of the UI. At
//! most one [`Notification`] is mounted at any instant: a new one replaces the
//! current one immediately, without playing its exit transition and without
//! queueing.
//!
//! # Timing
//!
//! ```text
//! 0 ms ── Entering ── 300 ms ── Visible ── 4000 ms ── Exiting ── 4300 ms ── unmounted
//! ```
//!
//! The center is driven by explicit instants. [`NotificationCenter::tick`]
//! advances phases and [`NotificationCenter::arm_next`] tells the caller when
//! it needs to be woken up again, so the plugin shell only has to turn that
//! delay into a timer.

use std::time::{Duration, Instant};

/// Length of the entrance transition.
pub const ENTER_DURATION: Duration = Duration::from_millis(300);

/// Time from mount until the exit transition starts.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(4000);

/// Length of the exit transition.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

/// Category of a notification; drives its icon and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    /// Parses a kind name. Unrecognised names map to [`NotificationKind::Info`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Icon rendered in front of the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
        }
    }
}

/// Lifecycle phase of the mounted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Exiting,
}

/// A mounted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic id, unique for the lifetime of the center.
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Mount instant; all phase deadlines derive from it.
    pub created_at: Instant,
    pub phase: Phase,
}

impl Notification {
    fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Entering => Some(self.created_at + ENTER_DURATION),
            Phase::Visible => Some(self.created_at + DISPLAY_DURATION),
            Phase::Exiting => Some(self.created_at + DISPLAY_DURATION + EXIT_DURATION),
        }
    }

    fn phase_at(&self, now: Instant) -> Option<Phase> {
        let elapsed = now.saturating_duration_since(self.created_at);
        if elapsed >= DISPLAY_DURATION + EXIT_DURATION {
            None
        } else if elapsed >= DISPLAY_DURATION {
            Some(Phase::Exiting)
        } else if elapsed >= ENTER_DURATION {
            Some(Phase::Visible)
        } else {
            Some(Phase::Entering)
        }
    }
}

/// Owner of the single notification slot.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    slot: Option<Notification>,
    next_id: u64,
    /// Deadlines of timers handed out and not yet fired, oldest first.
    armed: Vec<Instant>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a new notification, replacing any current one.
    ///
    /// Returns the id of the new notification.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) -> u64 {
        let message = message.into();

        if let Some(previous) = self.slot.take() {
            tracing::debug!(replaced_id = previous.id, "unmounting notification without exit transition");
        }

        self.next_id += 1;
        let id = self.next_id;

        tracing::debug!(id, kind = ?kind, message = %message, "notification mounted");

        self.slot = Some(Notification {
            id,
            message,
            kind,
            created_at: now,
            phase: Phase::Entering,
        });
        id
    }

    /// Advances the mounted notification to the phase it should be in at `now`.
    ///
    /// Returns `true` if anything visible changed.
    ///
    /// A tick means one timer fired. Timers fire in deadline order, so the
    /// earliest outstanding one is retired, even if it came early.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.armed.is_empty() {
            self.armed.remove(0);
        }

        let Some(current) = self.slot.as_mut() else {
            return false;
        };

        match current.phase_at(now) {
            None => {
                tracing::debug!(id = current.id, "notification unmounted");
                self.slot = None;
                true
            }
            Some(phase) if phase != current.phase => {
                tracing::trace!(id = current.id, phase = ?phase, "notification phase changed");
                current.phase = phase;
                true
            }
            Some(_) => false,
        }
    }

    /// Returns the delay until the next phase change, if a new wake-up is needed.
    ///
    /// Returns `None` while a timer for the current deadline is still
    /// outstanding, so timers left over from replaced notifications never
    /// start a second wake-up chain.
    pub fn arm_next(&mut self, now: Instant) -> Option<Duration> {
        let deadline = self.slot.as_ref()?.deadline()?;
        if self.armed.contains(&deadline) {
            return None;
        }
        let at = self.armed.partition_point(|armed| *armed <= deadline);
        self.armed.insert(at, deadline);
        Some(deadline.saturating_duration_since(now))
    }

    /// The mounted notification, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.slot.as_ref()
    }

    /// Number of mounted notifications; never more than one.
    #[must_use]
    pub fn mounted_count(&self) -> usize {
        usize::from(self.slot.is_some())
    }
}
