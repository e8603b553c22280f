//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It holds the
//! cipher form, the output slots, and one instance of each component
//! ([`NotificationCenter`], [`RequestOrchestrator`], [`QuizEngine`]). The event
//! handler mutates it; the renderer reads it through
//! [`AppState::compute_viewmodel`].

use super::modes::{Focus, View};
use super::notifications::NotificationCenter;
use super::quiz::QuizEngine;
use super::request::RequestOrchestrator;
use crate::domain::{should_show_key_input, Algorithm, Operation, QuestionBank, DEFAULT_KEY};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, CipherPanel, FooterInfo, HeaderInfo, KeyField, OptionView, QuestionView, QuizPanel, TabInfo, ToastInfo,
    UIViewModel,
};

/// Placeholder for output slots that have no value yet.
pub const EMPTY_SLOT: &str = "-";

/// Rows taken by everything but the input and output text in the cipher view.
const CIPHER_CHROME_ROWS: usize = 13;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,

    /// Cipher form field receiving typed characters.
    pub focus: Focus,

    /// Raw input text, trimmed only when submitted.
    pub input: String,

    /// Raw key field contents. Free text; parsed at submit time.
    pub key_text: String,

    pub algorithm: Algorithm,
    pub operation: Operation,

    /// Result text of the last successful transformation.
    pub output: String,

    /// Character counts shown under the input and output areas.
    ///
    /// Refreshed explicitly, after the slots they describe have settled.
    pub input_count: usize,
    pub output_count: usize,

    /// Statistics slots of the last successful transformation.
    pub processing_time: Option<String>,
    pub algorithm_used: Option<String>,

    pub notifications: NotificationCenter,
    pub requests: RequestOrchestrator,
    pub quiz: QuizEngine,

    /// Quiz cursor: highlighted question and option.
    pub question_cursor: usize,
    pub option_cursor: usize,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, bank: QuestionBank, view: View) -> Self {
        Self {
            view,
            focus: Focus::Text,
            input: String::new(),
            key_text: DEFAULT_KEY.to_string(),
            algorithm: Algorithm::Caesar,
            operation: Operation::Encrypt,
            output: String::new(),
            input_count: 0,
            output_count: 0,
            processing_time: None,
            algorithm_used: None,
            notifications: NotificationCenter::new(),
            requests: RequestOrchestrator::new(),
            quiz: QuizEngine::new(bank),
            question_cursor: 0,
            option_cursor: 0,
            theme,
        }
    }

    /// Whether the key field is shown for the selected algorithm.
    #[must_use]
    pub fn key_visible(&self) -> bool {
        should_show_key_input(self.algorithm)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.requests.is_loading()
    }

    /// Selects an algorithm, moving focus off the key field if it gets hidden.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        if !self.key_visible() && self.focus == Focus::Key {
            self.focus = Focus::Text;
        }
        tracing::debug!(
            algorithm = algorithm.as_str(),
            key_visible = self.key_visible(),
            "algorithm selected"
        );
    }

    /// Cycles focus between the text area and the key field, if visible.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Text if self.key_visible() => Focus::Key,
            _ => Focus::Text,
        };
    }

    /// Recomputes both character counters from the current slots.
    pub fn refresh_counts(&mut self) {
        self.input_count = self.input.chars().count();
        self.output_count = self.output.chars().count();
    }

    /// Empties input and output and puts the key back to its default.
    pub fn clear_form(&mut self) {
        self.input.clear();
        self.output.clear();
        self.key_text = DEFAULT_KEY.to_string();
        self.refresh_counts();
    }

    /// Number of options of the question under the cursor.
    #[must_use]
    pub fn current_option_count(&self) -> usize {
        self.quiz
            .bank()
            .questions()
            .get(self.question_cursor)
            .map_or(0, |q| q.options.len())
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view {
            View::Cipher => Body::Cipher(self.compute_cipher_panel(rows, cols)),
            View::Quiz => Body::Quiz(self.compute_quiz_panel()),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            toast: self.notifications.current().map(|n| ToastInfo {
                message: n.message.clone(),
                icon: n.kind.icon(),
                kind: n.kind,
                phase: n.phase,
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let tabs = [View::Cipher, View::Quiz]
            .into_iter()
            .map(|view| TabInfo {
                label: view.title().to_string(),
                is_active: view == self.view,
            })
            .collect();

        HeaderInfo {
            title: " Cipherdeck ".to_string(),
            tabs,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view {
            View::Cipher => {
                "Ctrl+Enter: run  Tab: field  Ctrl+a: algorithm  Ctrl+o: operation  ↑/↓: key  Ctrl+l: clear  Ctrl+g: new keys  Ctrl+t: quiz  Esc: quit"
            }
            View::Quiz => "j/k: question  h/l: option  Enter or 1-9: answer  r: reset  Ctrl+t: cipher  q: quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_cipher_panel(&self, rows: usize, cols: usize) -> CipherPanel {
        let text_rows = rows.saturating_sub(CIPHER_CHROME_ROWS).max(2);
        let input_rows = (text_rows / 2).max(1);
        let output_rows = text_rows.saturating_sub(input_rows).max(1);
        let width = cols.saturating_sub(4).max(1);

        let input_lines = clip_lines(&self.input, width);
        let skip = input_lines.len().saturating_sub(input_rows);
        let input_lines = input_lines.into_iter().skip(skip).collect();

        let output_lines = clip_lines(&self.output, width).into_iter().take(output_rows).collect();

        CipherPanel {
            algorithm: self.algorithm.display_name().to_string(),
            operation: self.operation.label().to_string(),
            key: self.key_visible().then(|| KeyField {
                value: self.key_text.clone(),
                focused: self.focus == Focus::Key,
            }),
            input_lines,
            input_rows,
            input_focused: self.focus == Focus::Text,
            input_count: self.input_count,
            output_lines,
            output_rows,
            output_count: self.output_count,
            processing_time: self.processing_time.clone().unwrap_or_else(|| EMPTY_SLOT.to_string()),
            algorithm_used: self.algorithm_used.clone().unwrap_or_else(|| EMPTY_SLOT.to_string()),
            loading: self.is_loading(),
        }
    }

    fn compute_quiz_panel(&self) -> QuizPanel {
        let questions = self
            .quiz
            .bank()
            .questions()
            .iter()
            .enumerate()
            .map(|(qi, question)| {
                let is_current = qi == self.question_cursor;
                QuestionView {
                    number: qi + 1,
                    prompt: question.prompt.clone(),
                    is_current,
                    is_locked: self.quiz.is_locked(qi),
                    options: question
                        .options
                        .iter()
                        .enumerate()
                        .map(|(oi, option)| OptionView {
                            label: option.label.clone(),
                            mark: self.quiz.mark(qi, oi),
                            is_cursor: is_current && oi == self.option_cursor,
                        })
                        .collect(),
                }
            })
            .collect();

        let (title, description) = self.quiz.summary();

        QuizPanel {
            scoreboard: self.quiz.scoreboard(),
            questions,
            summary_title: title.to_string(),
            summary_description: description.to_string(),
            percentage: self.quiz.result().map(|r| format!("{:.0}%", r.percentage)),
        }
    }
}

/// Splits `text` into lines no wider than `width` characters.
fn clip_lines(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                vec![String::new()]
            } else {
                chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
            }
        })
        .collect()
}
