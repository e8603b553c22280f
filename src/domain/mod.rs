//! Domain layer for the Cipherdeck plugin.
//!
//! Core types and pure rules, independent of Zellij APIs and of any I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`cipher`]: Request/reply model, key parsing and adjustment, key visibility
//! - [`quiz`]: Externally authored quiz questions

pub mod cipher;
pub mod error;
pub mod quiz;

pub use cipher::{
    adjust_key, algorithm_label, parse_key_or_default, should_show_key_input, Algorithm,
    KeyAction, Operation, TransformRequest, TransformResult, DEFAULT_KEY, MAX_KEY, MIN_KEY,
};
pub use error::{CipherdeckError, Result};
pub use quiz::{QuestionBank, QuizOption, QuizQuestion};
