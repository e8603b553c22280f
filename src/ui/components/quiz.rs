//! Quiz page: scoreboard, questions and summary.

use crate::app::quiz::OptionMark;
use crate::ui::helpers::{fill, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{OptionView, QuestionView, QuizPanel};

/// Renders the quiz panel between `row` and `last_row` (inclusive).
///
/// Questions that do not fit are left out; the current one is always shown.
pub fn render_quiz_panel(row: usize, last_row: usize, panel: &QuizPanel, theme: &Theme, cols: usize) {
    let mut row = render_summary(row, panel, theme, cols);

    let first = first_visible(&panel.questions, last_row.saturating_sub(row) + 1);
    for question in panel.questions.iter().skip(first) {
        let needed = question.options.len() + 2;
        if row + needed > last_row + 1 {
            break;
        }
        row = render_question(row, question, theme, cols);
    }

    while row <= last_row {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
        row += 1;
    }
}

/// Index of the first question to draw so the current one fits in `rows`.
fn first_visible(questions: &[QuestionView], rows: usize) -> usize {
    let Some(current) = questions.iter().position(|q| q.is_current) else {
        return 0;
    };

    let mut used = 0;
    let mut first = current + 1;
    while first > 0 {
        let height = questions[first - 1].options.len() + 2;
        if used + height > rows {
            break;
        }
        used += height;
        first -= 1;
    }
    first.min(current)
}

fn render_summary(row: usize, panel: &QuizPanel, theme: &Theme, cols: usize) -> usize {
    let mut headline = format!(" Score {}   {}", panel.scoreboard, panel.summary_title);
    if let Some(percentage) = &panel.percentage {
        headline.push_str(&format!(" ({percentage})"));
    }
    let headline = truncate(&headline, cols);
    let description = truncate(&format!(" {}", panel.summary_description), cols);

    position_cursor(row, 1);
    print!("{}{}{headline}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), fill(&headline, cols));
    print!("{}", Theme::reset());
    position_cursor(row + 1, 1);
    print!("{}{description}{}", Theme::fg(&theme.colors.text_dim), fill(&description, cols));
    print!("{}", Theme::reset());
    row + 2
}

/// Prompt, options and a blank spacer line.
fn render_question(row: usize, question: &QuestionView, theme: &Theme, cols: usize) -> usize {
    let marker = if question.is_current { '›' } else { ' ' };
    let prompt = truncate(&format!("{marker} {}. {}", question.number, question.prompt), cols);

    position_cursor(row, 1);
    if question.is_current {
        print!("{}", Theme::bold());
    }
    let color = if question.is_locked {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    };
    print!("{}{prompt}{}", Theme::fg(color), fill(&prompt, cols));
    print!("{}", Theme::reset());

    let mut row = row + 1;
    for (index, option) in question.options.iter().enumerate() {
        render_option(row, index, option, theme, cols);
        row += 1;
    }

    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
    row + 1
}

fn render_option(row: usize, index: usize, option: &OptionView, theme: &Theme, cols: usize) {
    let (badge, color) = match option.mark {
        OptionMark::Correct => ("✓", &theme.colors.correct),
        OptionMark::Incorrect => ("✗", &theme.colors.incorrect),
        OptionMark::Unmarked => (" ", &theme.colors.text_normal),
    };
    let line = truncate(&format!("    {}) {} {badge}", index + 1, option.label), cols);

    position_cursor(row, 1);
    if option.is_cursor {
        print!("{}", Theme::fg(&theme.colors.tab_active_fg));
        print!("{}", Theme::bg(&theme.colors.tab_active_bg));
    } else {
        print!("{}", Theme::fg(color));
    }
    print!("{line}{}", fill(&line, cols));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(number: usize, is_current: bool) -> QuestionView {
        QuestionView {
            number,
            prompt: format!("Question {number}"),
            is_current,
            is_locked: false,
            options: (0..3)
                .map(|i| OptionView {
                    label: format!("Option {i}"),
                    mark: OptionMark::Unmarked,
                    is_cursor: false,
                })
                .collect(),
        }
    }

    #[test]
    fn shows_from_the_top_when_everything_fits() {
        let questions = vec![question(1, false), question(2, false), question(3, true)];
        assert_eq!(first_visible(&questions, 15), 0);
    }

    #[test]
    fn scrolls_so_the_current_question_fits() {
        let questions = vec![question(1, false), question(2, false), question(3, true)];
        assert_eq!(first_visible(&questions, 10), 1);
        assert_eq!(first_visible(&questions, 5), 2);
        assert_eq!(first_visible(&questions, 2), 2);
    }
}
