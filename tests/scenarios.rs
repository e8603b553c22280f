//! End-to-end scenarios driven through `handle_event` with a manual clock.
//!
//! Service calls are turned into HTTP requests and answered by a small
//! in-process stand-in for the cipher service, then decoded the same way the
//! plugin shell decodes `WebRequestResult` events.

use cipherdeck::app::notifications::{DISPLAY_DURATION, ENTER_DURATION, EXIT_DURATION};
use cipherdeck::app::{Focus, NotificationKind, Phase, QuizOutcome, Step};
use cipherdeck::domain::{Algorithm, KeyAction, MAX_KEY, MIN_KEY};
use cipherdeck::infrastructure::{Clock, ManualClock};
use cipherdeck::service::{decode_reply, ServiceCall};
use cipherdeck::{handle_event, initialize, Action, AppState, Config, Event, View};
use std::time::Duration;

const BASE_URL: &str = "http://localhost:5000/";

/// Caesar-only stand-in for the cipher service.
fn serve(call: &ServiceCall) -> (u16, Vec<u8>, std::collections::BTreeMap<String, String>) {
    let http = call.to_http(BASE_URL).unwrap();
    assert!(!http.url.contains("//api"), "base URL slash should be trimmed: {}", http.url);

    if http.url.ends_with("/api/generate-new-keys") {
        return (200, br#"{"success":true,"message":"New keys generated"}"#.to_vec(), http.context);
    }

    let body: serde_json::Value = serde_json::from_slice(&http.body).unwrap();
    let shift = match body["operation"].as_str() {
        Some("decrypt") => 26 - body["key"].as_i64().unwrap().rem_euclid(26),
        _ => body["key"].as_i64().unwrap().rem_euclid(26),
    };
    let result: String = body["text"]
        .as_str()
        .unwrap()
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                (((c as u8 - b'A') as i64 + shift).rem_euclid(26) as u8 + b'A') as char
            } else {
                c
            }
        })
        .collect();

    let reply = serde_json::json!({
        "success": true,
        "result": result,
        "algorithm": body["algorithm"],
        "operation": body["operation"],
    });
    (200, serde_json::to_vec(&reply).unwrap(), http.context)
}

fn reply_event(call: &ServiceCall) -> Event {
    let (status, body, context) = serve(call);
    Event::ServiceReply(decode_reply(status, &body, &context).unwrap())
}

fn service_call(actions: &[Action]) -> ServiceCall {
    actions
        .iter()
        .find_map(|a| match a {
            Action::CallService(call) => Some(call.clone()),
            _ => None,
        })
        .expect("a service call")
}

fn scheduled_tick(actions: &[Action]) -> Option<Duration> {
    actions.iter().find_map(|a| match a {
        Action::ScheduleTick(delay) => Some(*delay),
        _ => None,
    })
}

struct Harness {
    state: AppState,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: initialize(&Config::default()),
            clock: ManualClock::new(),
        }
    }

    fn send(&mut self, event: Event) -> (bool, Vec<Action>) {
        handle_event(&mut self.state, &event, self.clock.now()).unwrap()
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }
}

#[test]
fn encrypts_hello_with_the_default_key() {
    let mut h = Harness::new();
    h.type_text("HELLO");

    let (_, actions) = h.send(Event::Submit);
    let call = service_call(&actions);
    assert!(h.state.is_loading());

    h.clock.advance(Duration::from_millis(12));
    let (render, actions) = h.send(reply_event(&call));

    assert!(render);
    assert!(!h.state.is_loading());
    assert_eq!(h.state.output, "KHOOR");
    assert_eq!(h.state.input_count, 5);
    assert_eq!(h.state.output_count, 5);
    assert_eq!(h.state.processing_time.as_deref(), Some("12.00ms"));
    assert_eq!(h.state.algorithm_used.as_deref(), Some("Caesar"));

    let toast = h.state.notifications.current().unwrap();
    assert_eq!(toast.kind, NotificationKind::Success);
    assert_eq!(toast.message, "Text encrypted successfully!");
    assert_eq!(scheduled_tick(&actions), Some(ENTER_DURATION));
}

#[test]
fn decrypts_back_to_the_plaintext() {
    let mut h = Harness::new();
    h.type_text("KHOOR");
    h.send(Event::ToggleOperation);

    let (_, actions) = h.send(Event::Submit);
    h.send(reply_event(&service_call(&actions)));

    assert_eq!(h.state.output, "HELLO");
    assert_eq!(h.state.notifications.current().unwrap().message, "Text decrypted successfully!");
}

#[test]
fn notification_walks_through_its_phases_on_scheduled_ticks() {
    let mut h = Harness::new();
    let (_, actions) = h.send(Event::Clear);
    assert_eq!(scheduled_tick(&actions), Some(ENTER_DURATION));
    assert_eq!(h.state.notifications.current().unwrap().phase, Phase::Entering);

    h.clock.advance(ENTER_DURATION);
    let (render, actions) = h.send(Event::Tick);
    assert!(render);
    assert_eq!(h.state.notifications.current().unwrap().phase, Phase::Visible);
    assert_eq!(scheduled_tick(&actions), Some(DISPLAY_DURATION - ENTER_DURATION));

    h.clock.advance(DISPLAY_DURATION - ENTER_DURATION);
    let (_, actions) = h.send(Event::Tick);
    assert_eq!(h.state.notifications.current().unwrap().phase, Phase::Exiting);
    assert_eq!(scheduled_tick(&actions), Some(EXIT_DURATION));

    h.clock.advance(EXIT_DURATION);
    let (render, actions) = h.send(Event::Tick);
    assert!(render);
    assert!(h.state.notifications.current().is_none());
    assert!(actions.is_empty());
}

#[test]
fn a_new_notification_replaces_the_visible_one() {
    let mut h = Harness::new();
    h.send(Event::Clear);
    h.clock.advance(Duration::from_millis(1000));

    h.send(Event::Submit);

    assert_eq!(h.state.notifications.mounted_count(), 1);
    let toast = h.state.notifications.current().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(toast.phase, Phase::Entering);

    // The first notification's deadline has no effect on the second.
    h.clock.advance(DISPLAY_DURATION - Duration::from_millis(1000));
    h.send(Event::Tick);
    assert_eq!(h.state.notifications.current().unwrap().phase, Phase::Visible);
}

#[test]
fn resubmitting_supersedes_the_first_request() {
    let mut h = Harness::new();
    h.type_text("HELLO");

    let (_, first) = h.send(Event::Submit);
    let (_, second) = h.send(Event::Submit);
    let (first, second) = (service_call(&first), service_call(&second));
    assert!(second.generation() > first.generation());

    let (render, _) = h.send(reply_event(&first));
    assert!(!render);
    assert!(h.state.is_loading());
    assert!(h.state.output.is_empty());

    h.send(reply_event(&second));
    assert!(!h.state.is_loading());
    assert_eq!(h.state.output, "KHOOR");
}

#[test]
fn transport_failure_clears_loading_and_reports() {
    let mut h = Harness::new();
    h.type_text("HELLO");
    let (_, actions) = h.send(Event::Submit);
    let http = service_call(&actions).to_http(BASE_URL).unwrap();

    let reply = decode_reply(502, b"Bad Gateway", &http.context).unwrap();
    h.send(Event::ServiceReply(reply));

    assert!(!h.state.is_loading());
    assert!(h.state.output.is_empty());
    let toast = h.state.notifications.current().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);
    assert!(toast.message.starts_with("Error: request failed (HTTP 502)"), "{}", toast.message);
}

#[test]
fn regenerating_keys_reports_success() {
    let mut h = Harness::new();
    let (_, actions) = h.send(Event::RegenerateKeys);
    h.send(reply_event(&service_call(&actions)));

    let toast = h.state.notifications.current().unwrap();
    assert_eq!(toast.kind, NotificationKind::Success);
    assert_eq!(toast.message, "New substitution keys generated successfully!");
}

#[test]
fn key_buttons_stay_within_bounds() {
    let mut h = Harness::new();
    for _ in 0..40 {
        h.send(Event::AdjustKey(KeyAction::Increase));
    }
    assert_eq!(h.state.key_text, MAX_KEY.to_string());

    for _ in 0..40 {
        h.send(Event::AdjustKey(KeyAction::Decrease));
    }
    assert_eq!(h.state.key_text, MIN_KEY.to_string());
}

#[test]
fn key_field_is_only_shown_for_caesar() {
    let mut h = Harness::new();
    h.send(Event::FocusNext);
    assert_eq!(h.state.focus, Focus::Key);

    h.send(Event::SelectAlgorithm(Algorithm::Substitution));
    assert!(!h.state.key_visible());
    assert_eq!(h.state.focus, Focus::Text);

    h.send(Event::SelectAlgorithm(Algorithm::Transposition));
    assert!(!h.state.key_visible());

    h.send(Event::SelectAlgorithm(Algorithm::Caesar));
    assert!(h.state.key_visible());
}

#[test]
fn quiz_scores_two_of_three_as_needs_review() {
    let mut h = Harness::new();
    h.send(Event::ShowQuiz);
    assert_eq!(h.state.view, View::Quiz);

    h.send(Event::Answer { question: 0, option: 1 });
    h.send(Event::Answer { question: 1, option: 0 });
    assert!(h.state.quiz.result().is_none());

    h.send(Event::Answer { question: 2, option: 0 });
    let result = h.state.quiz.result().unwrap();
    assert_eq!((result.score, result.total), (2, 3));
    assert_eq!(result.outcome, QuizOutcome::NeedsReview);

    // Locked answers cannot be changed.
    let (render, _) = h.send(Event::Answer { question: 2, option: 2 });
    assert!(!render);
    assert_eq!(h.state.quiz.score(), 2);
}

#[test]
fn quiz_can_be_answered_with_the_cursor_and_reset() {
    let mut h = Harness::new();
    h.send(Event::ShowQuiz);

    // Correct options are 1, 0 and 2; answering moves on to the next question.
    for right_moves in [1, 0, 2] {
        for _ in 0..right_moves {
            h.send(Event::MoveOption(Step::Next));
        }
        h.send(Event::AnswerSelected);
    }

    let result = h.state.quiz.result().unwrap();
    assert_eq!(result.outcome, QuizOutcome::Perfect);
    assert_eq!(h.state.quiz.scoreboard(), "3/3");

    h.send(Event::ResetQuiz);
    assert_eq!(h.state.quiz.answered_count(), 0);
    assert_eq!(h.state.question_cursor, 0);
}

#[test]
fn viewmodel_reflects_the_active_view() {
    let mut h = Harness::new();
    h.type_text("HELLO");
    let vm = h.state.compute_viewmodel(30, 80);
    let cipherdeck::ui::Body::Cipher(panel) = vm.body else {
        panic!("expected the cipher panel");
    };
    assert_eq!(panel.input_lines, vec!["HELLO"]);
    assert_eq!(panel.input_rows + panel.output_rows, 17);
    assert!(panel.key.is_some());

    h.send(Event::ToggleView);
    let vm = h.state.compute_viewmodel(30, 80);
    assert!(matches!(vm.body, cipherdeck::ui::Body::Quiz(_)));
    assert!(vm.header.tabs.iter().any(|t| t.is_active && t.label == View::Quiz.title()));
}
