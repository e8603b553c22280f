//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that mutates [`AppState`]. It
//! routes each event to the component that owns it and collects the side
//! effects to perform as [`Action`]s.
//!
//! # Event Types
//!
//! - **Cipher form**: `Submit`, `Clear`, `RegenerateKeys`, algorithm and
//!   operation selection, `AdjustKey`, text editing, `FocusNext`. While a
//!   transformation is in flight every event that edits the form is dropped
//!   (see [`Event::edits_form`]); `Submit` still supersedes the request.
//! - **Views**: `ShowCipher`, `ShowQuiz`, `ToggleView`
//! - **Quiz**: cursor movement, `AnswerSelected`, `Answer`, `ResetQuiz`
//! - **System**: `ServiceReply`, `Tick`, `CloseFocus`, `PermissionsResult`
//!
//! # Ordering
//!
//! When a transformation reply arrives, the loading state is cleared first,
//! then the output slots are written, then the notification is raised, and the
//! character counters are refreshed last. Every event ends by asking the
//! notification center whether a new timer must be armed.
//!
//! # Example
//!
//! ```rust
//! use cipherdeck::app::{handle_event, AppState, Event, View};
//! use cipherdeck::domain::QuestionBank;
//! use cipherdeck::ui::Theme;
//! use std::time::Instant;
//!
//! let mut state = AppState::new(Theme::default(), QuestionBank::default(), View::Cipher);
//! let (render, actions) = handle_event(&mut state, &Event::Submit, Instant::now())?;
//! assert!(render);
//! assert!(!actions.is_empty()); // the empty-input notification needs a timer
//! # Ok::<(), cipherdeck::CipherdeckError>(())
//! ```

use super::modes::{Focus, Step, View};
use super::notifications::NotificationKind;
use super::quiz::AnswerOutcome;
use super::request::Completion;
use crate::app::{Action, AppState};
use crate::domain::error::{CipherdeckError, Result};
use crate::domain::{adjust_key, Algorithm, KeyAction, Operation};
use crate::service::{CallKind, KeyRegenerationResult, ServiceCall, ServiceReply};
use std::time::Instant;
use zellij_tile::prelude::PermissionType;

/// Notification raised by the clear action.
pub const CLEARED_MESSAGE: &str = "All fields cleared!";

/// Notification raised when the service reshuffled its substitution keys.
pub const KEYS_REGENERATED_MESSAGE: &str = "New substitution keys generated successfully!";

/// Events triggered by user input, timers, or service replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Validates the form and sends it to the transformation service.
    Submit,
    /// Empties input and output, resets the key.
    Clear,
    /// Asks the service for new substitution keys.
    RegenerateKeys,

    SelectAlgorithm(Algorithm),
    /// Selects the next algorithm in the list (wraps).
    CycleAlgorithm,
    SelectOperation(Operation),
    ToggleOperation,

    /// Steps the key by one within its bounds.
    AdjustKey(KeyAction),

    /// Types a character into the focused field.
    Char(char),
    /// Deletes the last character of the focused field.
    Backspace,
    /// Inserts a line break in the input text.
    Newline,
    /// Moves focus between the text area and the key field.
    FocusNext,

    ShowCipher,
    ShowQuiz,
    ToggleView,

    MoveQuestion(Step),
    MoveOption(Step),
    /// Answers the question under the cursor with the option under the cursor.
    AnswerSelected,
    /// Answers `question` with `option` (both zero-based).
    Answer { question: usize, option: usize },
    ResetQuiz,

    /// A decoded reply from the cipher service.
    ServiceReply(ServiceReply),

    /// A timer armed through [`Action::ScheduleTick`] fired.
    Tick,

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Reports granted Zellij permissions after permission request.
    PermissionsResult {
        /// Permissions granted by the user.
        granted: Vec<PermissionType>,
    },
}

impl Event {
    /// Whether the event changes the cipher form. These are dropped while a
    /// transformation is in flight.
    #[must_use]
    pub const fn edits_form(&self) -> bool {
        matches!(
            self,
            Self::Clear
                | Self::RegenerateKeys
                | Self::SelectAlgorithm(_)
                | Self::CycleAlgorithm
                | Self::SelectOperation(_)
                | Self::ToggleOperation
                | Self::AdjustKey(_)
                | Self::Char(_)
                | Self::Backspace
                | Self::Newline
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI must be re-rendered and the actions to run in order.
///
/// # Errors
///
/// Returns [`CipherdeckError::Quiz`] for an answer that names a question or
/// option outside the bank. The event is dropped and the state is unchanged.
pub fn handle_event(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (render, mut actions) = dispatch(state, event, now)?;

    if let Some(delay) = state.notifications.arm_next(now) {
        tracing::trace!(delay_ms = delay.as_millis() as u64, "arming notification timer");
        actions.push(Action::ScheduleTick(delay));
    }

    Ok((render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    if state.is_loading() && event.edits_form() {
        tracing::trace!(event_type = ?event, "ignoring form change while loading");
        return Ok((false, vec![]));
    }

    match event {
        Event::Submit => Ok(submit(state, now)),
        Event::Clear => {
            state.clear_form();
            state.notifications.notify(CLEARED_MESSAGE, NotificationKind::Info, now);
            Ok((true, vec![]))
        }
        Event::RegenerateKeys => {
            tracing::debug!("requesting new substitution keys");
            Ok((false, vec![Action::CallService(ServiceCall::regenerate_keys())]))
        }
        Event::SelectAlgorithm(algorithm) => {
            state.select_algorithm(*algorithm);
            Ok((true, vec![]))
        }
        Event::CycleAlgorithm => {
            let next = state.algorithm.next();
            state.select_algorithm(next);
            Ok((true, vec![]))
        }
        Event::SelectOperation(operation) => {
            state.operation = *operation;
            Ok((true, vec![]))
        }
        Event::ToggleOperation => {
            state.operation = state.operation.toggled();
            Ok((true, vec![]))
        }
        Event::AdjustKey(action) => {
            let adjusted = adjust_key(&state.key_text, *action);
            tracing::trace!(from = %state.key_text, to = adjusted, action = ?action, "key adjusted");
            state.key_text = adjusted.to_string();
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((edit_focused(state, |field, focus| match focus {
            Focus::Text => {
                field.push(*c);
                true
            }
            Focus::Key if c.is_ascii_digit() || *c == '-' => {
                field.push(*c);
                true
            }
            Focus::Key => false,
        }), vec![])),
        Event::Backspace => Ok((edit_focused(state, |field, _| field.pop().is_some()), vec![])),
        Event::Newline => Ok((edit_focused(state, |field, focus| {
            if focus == Focus::Text {
                field.push('\n');
            }
            focus == Focus::Text
        }), vec![])),
        Event::FocusNext => {
            state.focus_next();
            Ok((true, vec![]))
        }
        Event::ShowCipher => Ok((switch_view(state, View::Cipher), vec![])),
        Event::ShowQuiz => Ok((switch_view(state, View::Quiz), vec![])),
        Event::ToggleView => {
            let target = state.view.toggled();
            Ok((switch_view(state, target), vec![]))
        }
        Event::MoveQuestion(step) => {
            state.question_cursor = step.apply(state.question_cursor, state.quiz.total_questions());
            state.option_cursor = 0;
            Ok((true, vec![]))
        }
        Event::MoveOption(step) => {
            state.option_cursor = step.apply(state.option_cursor, state.current_option_count());
            Ok((true, vec![]))
        }
        Event::AnswerSelected => {
            let (question, option) = (state.question_cursor, state.option_cursor);
            answer(state, question, option)
        }
        Event::Answer { question, option } => answer(state, *question, *option),
        Event::ResetQuiz => {
            state.quiz.reset();
            state.question_cursor = 0;
            state.option_cursor = 0;
            Ok((true, vec![]))
        }
        Event::ServiceReply(reply) => Ok((service_reply(state, reply, now), vec![])),
        Event::Tick => Ok((state.notifications.tick(now), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsResult { granted } => {
            if granted.contains(&PermissionType::WebAccess) {
                return Ok((false, vec![]));
            }
            tracing::warn!(granted = ?granted, "web access permission not granted");
            state.notifications.notify(
                "Web access was not granted; the cipher service cannot be reached.",
                NotificationKind::Warning,
                now,
            );
            Ok((true, vec![]))
        }
    }
}

fn submit(state: &mut AppState, now: Instant) -> (bool, Vec<Action>) {
    match state
        .requests
        .submit(&state.input, state.algorithm, state.operation, &state.key_text, now)
    {
        Ok(dispatch) => (
            true,
            vec![Action::CallService(ServiceCall::transform(dispatch.generation, dispatch.request))],
        ),
        Err(e) => {
            state.notifications.notify(e.to_string(), NotificationKind::Error, now);
            (true, vec![])
        }
    }
}

/// Applies `edit` to the focused field and refreshes the counters.
fn edit_focused(state: &mut AppState, edit: impl FnOnce(&mut String, Focus) -> bool) -> bool {
    let focus = state.focus;
    let field = match focus {
        Focus::Text => &mut state.input,
        Focus::Key => &mut state.key_text,
    };

    let changed = edit(field, focus);
    if changed {
        state.refresh_counts();
    }
    changed
}

fn switch_view(state: &mut AppState, view: View) -> bool {
    if state.view == view {
        return false;
    }
    tracing::debug!(from = ?state.view, to = ?view, "switching view");
    state.view = view;
    true
}

fn answer(state: &mut AppState, question: usize, option: usize) -> Result<(bool, Vec<Action>)> {
    match state.quiz.answer(question, option)? {
        AnswerOutcome::AlreadyAnswered => Ok((false, vec![])),
        AnswerOutcome::Locked { finished, .. } => {
            if finished.is_none() && question + 1 < state.quiz.total_questions() {
                state.question_cursor = question + 1;
                state.option_cursor = 0;
            }
            Ok((true, vec![]))
        }
    }
}

fn service_reply(state: &mut AppState, reply: &ServiceReply, now: Instant) -> bool {
    match reply {
        ServiceReply::Transformed { generation, reply } => {
            let completion = state.requests.complete(*generation, Ok(reply.clone()), now);
            completion.is_some_and(|c| apply_completion(state, c, now))
        }
        ServiceReply::Failed {
            call: CallKind::Transform,
            generation: Some(generation),
            message,
        } => {
            let completion = state.requests.complete(
                *generation,
                Err(CipherdeckError::Transport(message.clone())),
                now,
            );
            completion.is_some_and(|c| apply_completion(state, c, now))
        }
        ServiceReply::Failed {
            call: CallKind::Transform,
            generation: None,
            message,
        } => {
            tracing::warn!(error = %message, "transform failure without a generation");
            false
        }
        ServiceReply::KeysRegenerated {
            reply: KeyRegenerationResult { success: true, .. },
        } => {
            tracing::info!("substitution keys regenerated");
            state
                .notifications
                .notify(KEYS_REGENERATED_MESSAGE, NotificationKind::Success, now);
            true
        }
        ServiceReply::KeysRegenerated {
            reply: KeyRegenerationResult { error, .. },
        } => {
            let message = error.as_deref().unwrap_or("unknown service error");
            keys_failed(state, message, now);
            true
        }
        ServiceReply::Failed {
            call: CallKind::RegenerateKeys,
            message,
            ..
        } => {
            keys_failed(state, message, now);
            true
        }
    }
}

fn keys_failed(state: &mut AppState, message: &str, now: Instant) {
    tracing::warn!(error = %message, "key regeneration failed");
    state.notifications.notify(
        format!("Failed to generate new keys: {message}"),
        NotificationKind::Error,
        now,
    );
}

/// Writes a finished request into the output slots.
///
/// The orchestrator has already cleared the loading state.
fn apply_completion(state: &mut AppState, completion: Completion, now: Instant) -> bool {
    match completion.outcome {
        Ok((text, stats)) => {
            state.output = text;
            state.processing_time = Some(stats.processing_time_label());
            state.algorithm_used = Some(stats.algorithm_name);
            state.notifications.notify(
                completion.operation.success_message(),
                NotificationKind::Success,
                now,
            );
        }
        Err(e) => {
            state
                .notifications
                .notify(format!("Error: {e}"), NotificationKind::Error, now);
        }
    }
    state.refresh_counts();
    true
}
