//! Lifecycle of a transformation request.
//!
//! [`RequestOrchestrator`] validates a submission, builds the request, owns
//! the loading flag and measures how long the service took. It does not
//! perform the call: [`RequestOrchestrator::submit`] hands back a
//! [`Dispatch`] that the event handler turns into a service call action, and
//! the reply is fed back through [`RequestOrchestrator::complete`].
//!
//! # Generations
//!
//! Every dispatch gets a new generation number. Only the reply for the latest
//! generation completes the request; a reply for a superseded submission is
//! dropped, so a quick double submit can never show the older result last.

use crate::domain::error::{CipherdeckError, Result};
use crate::domain::{parse_key_or_default, Algorithm, Operation, TransformRequest, TransformResult};
use std::time::{Duration, Instant};

/// Message shown when the input text is blank.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to process.";

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub generation: u64,
    pub request: TransformRequest,
}

/// Bookkeeping for the request currently awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    started_at: Instant,
    algorithm: Algorithm,
    operation: Operation,
}

/// Statistics shown after a successful transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub processing_time: Duration,
    pub algorithm_name: String,
}

impl Stats {
    /// Processing time formatted like `12.34ms`.
    #[must_use]
    pub fn processing_time_label(&self) -> String {
        format!("{:.2}ms", self.processing_time.as_secs_f64() * 1000.0)
    }
}

/// Result of a completed request, ready to be applied to the display slots.
#[derive(Debug)]
pub struct Completion {
    pub operation: Operation,
    pub outcome: std::result::Result<(String, Stats), CipherdeckError>,
}

/// Validates submissions and tracks the single in-flight transformation.
#[derive(Debug, Clone, Default)]
pub struct RequestOrchestrator {
    loading: bool,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl RequestOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the form and enters the loading state.
    ///
    /// The text is trimmed before use. The key is read with
    /// [`parse_key_or_default`] and is not clamped.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Validation`] if the trimmed text is empty. In
    /// that case the loading state is left untouched.
    pub fn submit(
        &mut self,
        raw_text: &str,
        algorithm: Algorithm,
        operation: Operation,
        raw_key: &str,
        now: Instant,
    ) -> Result<Dispatch> {
        let text = raw_text.trim();
        if text.is_empty() {
            tracing::debug!("rejecting submission with blank text");
            return Err(CipherdeckError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }

        let key = parse_key_or_default(raw_key);

        if let Some(previous) = self.in_flight {
            tracing::debug!(
                superseded_generation = previous.generation,
                "submission supersedes an unanswered request"
            );
        }

        self.generation += 1;
        self.loading = true;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            started_at: now,
            algorithm,
            operation,
        });

        tracing::debug!(
            generation = self.generation,
            algorithm = algorithm.as_str(),
            operation = ?operation,
            key,
            text_len = text.chars().count(),
            "dispatching transformation"
        );

        Ok(Dispatch {
            generation: self.generation,
            request: TransformRequest {
                text: text.to_string(),
                algorithm,
                operation,
                key,
            },
        })
    }

    /// Finishes the in-flight request with the decoded reply.
    ///
    /// Returns `None` and changes nothing when `generation` is not the
    /// in-flight one. Otherwise the loading state is always cleared, whatever
    /// the outcome.
    pub fn complete(
        &mut self,
        generation: u64,
        reply: Result<TransformResult>,
        now: Instant,
    ) -> Option<Completion> {
        let Some(in_flight) = self.in_flight.filter(|f| f.generation == generation) else {
            tracing::debug!(
                generation,
                current = self.generation,
                "ignoring reply for a superseded request"
            );
            return None;
        };

        self.in_flight = None;
        self.loading = false;

        let elapsed = now.saturating_duration_since(in_flight.started_at);

        let outcome = reply.and_then(|result| match result {
            TransformResult { success: true, result: Some(text), .. } => Ok((
                text,
                Stats {
                    processing_time: elapsed,
                    algorithm_name: in_flight.algorithm.display_name().to_string(),
                },
            )),
            TransformResult { error, .. } => Err(CipherdeckError::Service(
                error.unwrap_or_else(|| "unknown service error".to_string()),
            )),
        });

        match &outcome {
            Ok(_) => tracing::info!(generation, elapsed_ms = elapsed.as_millis() as u64, "transformation succeeded"),
            Err(e) => tracing::warn!(generation, error = %e, "transformation failed"),
        }

        Some(Completion {
            operation: in_flight.operation,
            outcome,
        })
    }

    /// Whether a request is awaiting its reply.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Generation of the most recent dispatch (0 before the first one).
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(result: &str) -> Result<TransformResult> {
        Ok(TransformResult {
            success: true,
            result: Some(result.to_string()),
            error: None,
        })
    }

    #[test]
    fn blank_text_is_rejected_without_loading() {
        let mut orchestrator = RequestOrchestrator::new();
        let err = orchestrator
            .submit("  \n\t ", Algorithm::Caesar, Operation::Encrypt, "3", Instant::now())
            .unwrap_err();

        assert!(matches!(err, CipherdeckError::Validation(_)));
        assert!(!orchestrator.is_loading());
        assert_eq!(orchestrator.generation(), 0);
    }

    #[test]
    fn submit_trims_text_and_defaults_key() {
        let mut orchestrator = RequestOrchestrator::new();
        let dispatch = orchestrator
            .submit("  HELLO  ", Algorithm::Caesar, Operation::Encrypt, "x", Instant::now())
            .unwrap();

        assert_eq!(dispatch.request.text, "HELLO");
        assert_eq!(dispatch.request.key, 3);
        assert!(orchestrator.is_loading());
    }

    #[test]
    fn typed_key_is_not_clamped() {
        let mut orchestrator = RequestOrchestrator::new();
        let dispatch = orchestrator
            .submit("abc", Algorithm::Caesar, Operation::Decrypt, "42", Instant::now())
            .unwrap();
        assert_eq!(dispatch.request.key, 42);
    }

    #[test]
    fn success_measures_latency_and_clears_loading() {
        let t0 = Instant::now();
        let mut orchestrator = RequestOrchestrator::new();
        let dispatch = orchestrator
            .submit("HELLO", Algorithm::Caesar, Operation::Encrypt, "3", t0)
            .unwrap();

        let completion = orchestrator
            .complete(dispatch.generation, ok("KHOOR"), t0 + Duration::from_micros(12_340))
            .unwrap();

        assert!(!orchestrator.is_loading());
        let (text, stats) = completion.outcome.unwrap();
        assert_eq!(text, "KHOOR");
        assert_eq!(stats.algorithm_name, "Caesar");
        assert_eq!(stats.processing_time_label(), "12.34ms");
    }

    #[test]
    fn service_and_transport_failures_clear_loading() {
        let t0 = Instant::now();
        let mut orchestrator = RequestOrchestrator::new();

        let first = orchestrator
            .submit("a", Algorithm::Substitution, Operation::Encrypt, "", t0)
            .unwrap();
        let failed = TransformResult {
            success: false,
            result: None,
            error: Some("Invalid algorithm".to_string()),
        };
        let completion = orchestrator.complete(first.generation, Ok(failed), t0).unwrap();
        assert!(!orchestrator.is_loading());
        assert_eq!(completion.outcome.unwrap_err().to_string(), "Invalid algorithm");

        let second = orchestrator
            .submit("a", Algorithm::Substitution, Operation::Encrypt, "", t0)
            .unwrap();
        let completion = orchestrator
            .complete(
                second.generation,
                Err(CipherdeckError::Transport("connection refused".to_string())),
                t0,
            )
            .unwrap();
        assert!(!orchestrator.is_loading());
        assert!(matches!(completion.outcome, Err(CipherdeckError::Transport(_))));
    }

    #[test]
    fn success_without_result_is_a_service_error() {
        let t0 = Instant::now();
        let mut orchestrator = RequestOrchestrator::new();
        let dispatch = orchestrator
            .submit("a", Algorithm::Transposition, Operation::Encrypt, "", t0)
            .unwrap();
        let reply = TransformResult { success: true, result: None, error: None };

        let completion = orchestrator.complete(dispatch.generation, Ok(reply), t0).unwrap();
        assert_eq!(completion.outcome.unwrap_err().to_string(), "unknown service error");
    }

    #[test]
    fn superseded_reply_is_ignored() {
        let t0 = Instant::now();
        let mut orchestrator = RequestOrchestrator::new();
        let first = orchestrator
            .submit("one", Algorithm::Caesar, Operation::Encrypt, "3", t0)
            .unwrap();
        let second = orchestrator
            .submit("two", Algorithm::Caesar, Operation::Encrypt, "3", t0)
            .unwrap();

        assert!(orchestrator.complete(first.generation, ok("late"), t0).is_none());
        assert!(orchestrator.is_loading());

        let completion = orchestrator.complete(second.generation, ok("fresh"), t0).unwrap();
        assert_eq!(completion.outcome.unwrap().0, "fresh");
        assert!(orchestrator.complete(second.generation, ok("again"), t0).is_none());
    }
}
