//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They carry display-ready
//! strings and flags only.

use crate::app::notifications::{NotificationKind, Phase};
use crate::app::quiz::OptionMark;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Main panel of the active view.
    pub body: Body,

    /// The mounted notification, if any.
    pub toast: Option<ToastInfo>,

    pub footer: FooterInfo,
}

/// Title bar with one tab per view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub tabs: Vec<TabInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the active view.
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Cipher(CipherPanel),
    Quiz(QuizPanel),
}

/// The cipher form and its output slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherPanel {
    pub algorithm: String,
    pub operation: String,

    /// `None` while the selected algorithm takes no key.
    pub key: Option<KeyField>,

    /// Tail of the input text, already cut to the panel size.
    pub input_lines: Vec<String>,
    /// Rows reserved for the input box.
    pub input_rows: usize,
    pub input_focused: bool,
    pub input_count: usize,

    /// Head of the output text, already cut to the panel size.
    pub output_lines: Vec<String>,
    pub output_rows: usize,
    pub output_count: usize,

    pub processing_time: String,
    pub algorithm_used: String,

    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyField {
    pub value: String,
    pub focused: bool,
}

/// The quiz page.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPanel {
    /// Score label such as `2/3`.
    pub scoreboard: String,
    pub questions: Vec<QuestionView>,
    pub summary_title: String,
    pub summary_description: String,

    /// Final percentage, once every question is answered.
    pub percentage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number: usize,
    pub prompt: String,
    pub is_current: bool,
    pub is_locked: bool,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub mark: OptionMark,
    pub is_cursor: bool,
}

/// The notification region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub message: String,
    pub icon: &'static str,
    pub kind: NotificationKind,
    pub phase: Phase,
}
