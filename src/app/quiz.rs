//! Quiz scoring state machine.
//!
//! Each question moves once from unanswered to locked, on its first answer.
//! Answers to a locked question are ignored. When the last question locks,
//! the score is classified into an outcome band. [`QuizEngine::reset`] is the
//! only way back from that terminal state.

use crate::domain::error::{CipherdeckError, Result};
use crate::domain::QuestionBank;

/// Percentage at or above which a non-perfect run is still "good".
pub const GOOD_THRESHOLD_PERCENT: f64 = 70.0;

/// Summary text shown while the quiz is in progress.
pub const INITIAL_TITLE: &str = "Answer every question!";
pub const INITIAL_DESCRIPTION: &str = "Pick an option to check your answer";

/// Outcome band of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    Perfect,
    Good,
    NeedsReview,
}

impl QuizOutcome {
    /// Classifies a percentage in `0..=100`.
    #[must_use]
    pub fn classify(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Self::Perfect
        } else if percentage >= GOOD_THRESHOLD_PERCENT {
            Self::Good
        } else {
            Self::NeedsReview
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Perfect => "🎉 Perfect!",
            Self::Good => "👍 Very good!",
            Self::NeedsReview => "📚 Keep learning!",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Perfect => "You are a true cryptography expert!",
            Self::Good => "You know the fundamentals of cryptography well!",
            Self::NeedsReview => "Review the curiosities and try again!",
        }
    }
}

/// Final result, available once every question is answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub outcome: QuizOutcome,
}

/// What an answer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerOutcome {
    /// The question was locked by this answer.
    Locked {
        correct: bool,
        /// Set when this answer completed the quiz.
        finished: Option<QuizResult>,
    },
    /// The question was already locked; nothing changed.
    AlreadyAnswered,
}

/// Presentation marking of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Unmarked,
    Correct,
    Incorrect,
}

/// Per-session quiz state.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    bank: QuestionBank,
    /// Selected option per question; `Some` means locked.
    selections: Vec<Option<usize>>,
    score: usize,
    answered: usize,
}

impl QuizEngine {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        let selections = vec![None; bank.len()];
        Self {
            bank,
            selections,
            score: 0,
            answered: 0,
        }
    }

    /// Records the first answer to `question`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Quiz`] if `question` or `option` is out of
    /// range. Such an event is dropped without touching the state.
    pub fn answer(&mut self, question: usize, option: usize) -> Result<AnswerOutcome> {
        let q = self
            .bank
            .questions()
            .get(question)
            .ok_or_else(|| CipherdeckError::Quiz(format!("no question #{question}")))?;
        let selected = q
            .options
            .get(option)
            .ok_or_else(|| CipherdeckError::Quiz(format!("question #{question} has no option #{option}")))?;

        if self.selections[question].is_some() {
            tracing::debug!(question, option, "question already answered");
            return Ok(AnswerOutcome::AlreadyAnswered);
        }

        let correct = selected.correct;
        self.selections[question] = Some(option);
        if correct {
            self.score += 1;
        }
        self.answered += 1;

        tracing::debug!(
            question,
            option,
            correct,
            score = self.score,
            answered = self.answered,
            "quiz answer recorded"
        );

        let finished = self.result();
        if let Some(result) = finished {
            tracing::info!(
                score = result.score,
                total = result.total,
                outcome = ?result.outcome,
                "quiz finished"
            );
        }

        Ok(AnswerOutcome::Locked { correct, finished })
    }

    /// Unlocks every question and zeroes the counters.
    pub fn reset(&mut self) {
        self.selections.iter_mut().for_each(|s| *s = None);
        self.score = 0;
        self.answered = 0;
        tracing::debug!("quiz reset");
    }

    /// Final result, once every question is answered.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        let total = self.total_questions();
        if self.answered < total {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let percentage = self.score as f64 * 100.0 / total as f64;
        Some(QuizResult {
            score: self.score,
            total,
            percentage,
            outcome: QuizOutcome::classify(percentage),
        })
    }

    /// Title and description for the summary area.
    #[must_use]
    pub fn summary(&self) -> (&'static str, &'static str) {
        self.result().map_or((INITIAL_TITLE, INITIAL_DESCRIPTION), |r| {
            (r.outcome.title(), r.outcome.description())
        })
    }

    /// Marking of `option` in `question`, for display only.
    ///
    /// Once a question is locked its correct option is always marked, and the
    /// selected option too when it was wrong.
    #[must_use]
    pub fn mark(&self, question: usize, option: usize) -> OptionMark {
        let Some(Some(selected)) = self.selections.get(question) else {
            return OptionMark::Unmarked;
        };
        let Some(q) = self.bank.questions().get(question) else {
            return OptionMark::Unmarked;
        };

        if q.options.get(option).is_some_and(|o| o.correct) {
            OptionMark::Correct
        } else if option == *selected {
            OptionMark::Incorrect
        } else {
            OptionMark::Unmarked
        }
    }

    #[must_use]
    pub fn is_locked(&self, question: usize) -> bool {
        self.selections.get(question).is_some_and(Option::is_some)
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn answered_count(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    /// Score label such as `2/3`.
    #[must_use]
    pub fn scoreboard(&self) -> String {
        format!("{}/{}", self.score, self.total_questions())
    }

    #[must_use]
    pub const fn bank(&self) -> &QuestionBank {
        &self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuizOption, QuizQuestion};

    fn correct_of(engine: &QuizEngine, q: usize) -> usize {
        engine.bank().questions()[q].correct_index().unwrap()
    }

    fn wrong_of(engine: &QuizEngine, q: usize) -> usize {
        (correct_of(engine, q) + 1) % engine.bank().questions()[q].options.len()
    }

    fn bank_of(size: usize) -> QuestionBank {
        let questions = (0..size)
            .map(|i| QuizQuestion {
                prompt: format!("q{i}"),
                options: vec![
                    QuizOption { label: "yes".into(), correct: true },
                    QuizOption { label: "no".into(), correct: false },
                ],
            })
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    #[test]
    fn all_correct_is_perfect() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        for q in 0..3 {
            let c = correct_of(&engine, q);
            engine.answer(q, c).unwrap();
        }

        let result = engine.result().unwrap();
        assert_eq!(result.score, 3);
        assert!((result.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.outcome, QuizOutcome::Perfect);
        assert_eq!(engine.summary().0, QuizOutcome::Perfect.title());
    }

    #[test]
    fn none_correct_needs_review() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        for q in 0..3 {
            let w = wrong_of(&engine, q);
            engine.answer(q, w).unwrap();
        }
        assert_eq!(engine.result().unwrap().outcome, QuizOutcome::NeedsReview);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn two_of_three_falls_below_the_good_band() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        let c0 = correct_of(&engine, 0);
        let c1 = correct_of(&engine, 1);
        let w2 = wrong_of(&engine, 2);
        engine.answer(0, c0).unwrap();
        engine.answer(1, c1).unwrap();
        let outcome = engine.answer(2, w2).unwrap();

        let AnswerOutcome::Locked { correct: false, finished: Some(result) } = outcome else {
            panic!("expected the last answer to finish the quiz, got {outcome:?}");
        };
        assert_eq!(result.score, 2);
        assert_eq!(result.outcome, QuizOutcome::NeedsReview);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(QuizOutcome::classify(100.0), QuizOutcome::Perfect);
        assert_eq!(QuizOutcome::classify(99.9), QuizOutcome::Good);
        assert_eq!(QuizOutcome::classify(70.0), QuizOutcome::Good);
        assert_eq!(QuizOutcome::classify(69.9), QuizOutcome::NeedsReview);
        assert_eq!(QuizOutcome::classify(0.0), QuizOutcome::NeedsReview);
    }

    #[test]
    fn seven_of_ten_is_good() {
        let mut engine = QuizEngine::new(bank_of(10));
        for q in 0..10 {
            engine.answer(q, usize::from(q >= 7)).unwrap();
        }
        let result = engine.result().unwrap();
        assert_eq!(result.score, 7);
        assert_eq!(result.outcome, QuizOutcome::Good);
    }

    #[test]
    fn re_answering_is_a_no_op() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        let w = wrong_of(&engine, 0);
        let c = correct_of(&engine, 0);
        engine.answer(0, w).unwrap();

        assert_eq!(engine.answer(0, c).unwrap(), AnswerOutcome::AlreadyAnswered);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.answered_count(), 1);
    }

    #[test]
    fn marks_correct_and_wrong_selection_only() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        let c = correct_of(&engine, 0);
        let w = wrong_of(&engine, 0);
        assert_eq!(engine.mark(0, c), OptionMark::Unmarked);

        engine.answer(0, w).unwrap();
        assert_eq!(engine.mark(0, c), OptionMark::Correct);
        assert_eq!(engine.mark(0, w), OptionMark::Incorrect);
        let other = (0..3).find(|o| *o != c && *o != w).unwrap();
        assert_eq!(engine.mark(0, other), OptionMark::Unmarked);
    }

    #[test]
    fn reset_is_repeatable() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        for _ in 0..3 {
            for q in 0..3 {
                let c = correct_of(&engine, q);
                engine.answer(q, c).unwrap();
            }
            assert!(engine.result().is_some());

            engine.reset();
            assert_eq!(engine.score(), 0);
            assert_eq!(engine.answered_count(), 0);
            assert!((0..3).all(|q| !engine.is_locked(q)));
            assert_eq!(engine.summary(), (INITIAL_TITLE, INITIAL_DESCRIPTION));
            assert_eq!(engine.scoreboard(), "0/3");
        }
    }

    #[test]
    fn out_of_range_answers_are_errors() {
        let mut engine = QuizEngine::new(QuestionBank::default());
        assert!(matches!(engine.answer(3, 0), Err(CipherdeckError::Quiz(_))));
        assert!(matches!(engine.answer(0, 9), Err(CipherdeckError::Quiz(_))));
        assert_eq!(engine.answered_count(), 0);
    }
}
