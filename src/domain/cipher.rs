//! Cipher request model and the pure rules around it.
//!
//! The actual ciphers run in a remote service. What lives here is everything
//! the client decides on its own: the algorithm and operation vocabulary, the
//! shape of a transformation request and reply, how the key text is read, how
//! the key buttons step it, and whether the key input is relevant at all.

use serde::{Deserialize, Serialize};

/// Key used when the key field is empty or cannot be parsed.
pub const DEFAULT_KEY: i32 = 3;

/// Smallest key reachable through [`adjust_key`].
pub const MIN_KEY: i32 = 1;

/// Largest key reachable through [`adjust_key`].
pub const MAX_KEY: i32 = 25;

/// Classical cipher selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Shift cipher; the only algorithm that takes a key.
    Caesar,
    /// Character substitution with a server-held random map.
    Substitution,
    /// Four-column transposition.
    Transposition,
}

impl Algorithm {
    /// All algorithms, in the order the selector cycles through them.
    pub const ALL: [Self; 3] = [Self::Caesar, Self::Substitution, Self::Transposition];

    /// Wire name of the algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caesar => "caesar",
            Self::Substitution => "substitution",
            Self::Transposition => "transposition",
        }
    }

    /// Parses a wire name. Returns `None` for anything unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name.trim())
    }

    /// Human-readable name shown in the statistics panel.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        algorithm_label(self.as_str())
    }

    /// Next algorithm in selector order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Caesar => Self::Substitution,
            Self::Substitution => Self::Transposition,
            Self::Transposition => Self::Caesar,
        }
    }
}

/// Maps an algorithm wire name to its display label.
///
/// Unknown names pass through unchanged.
///
/// # Examples
///
/// ```
/// use cipherdeck::domain::algorithm_label;
///
/// assert_eq!(algorithm_label("caesar"), "Caesar");
/// assert_eq!(algorithm_label("vigenere"), "vigenere");
/// ```
#[must_use]
pub fn algorithm_label(name: &str) -> &str {
    match name {
        "caesar" => "Caesar",
        "substitution" => "Substitution",
        "transposition" => "Transposition",
        other => other,
    }
}

/// Direction of the transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    /// The other operation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Encrypt => Self::Decrypt,
            Self::Decrypt => Self::Encrypt,
        }
    }

    /// Label shown next to the operation selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypt",
            Self::Decrypt => "Decrypt",
        }
    }

    /// Success notification wording for a completed transformation.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Encrypt => "Text encrypted successfully!",
            Self::Decrypt => "Text decrypted successfully!",
        }
    }
}

/// Body of a transformation call.
///
/// Built only by the request orchestrator, after the text has been trimmed and
/// found non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub text: String,
    pub algorithm: Algorithm,
    pub operation: Operation,
    pub key: i32,
}

/// Reply of the transformation service.
///
/// `result` is present iff `success`, `error` iff not. The service also echoes
/// a few request fields which are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Direction of a key button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Increase,
    Decrease,
}

/// Reads the key field, falling back to [`DEFAULT_KEY`].
///
/// Surrounding whitespace is ignored. Anything that is not an integer yields
/// the default without signalling an error. The parsed value is not clamped.
///
/// # Examples
///
/// ```
/// use cipherdeck::domain::parse_key_or_default;
///
/// assert_eq!(parse_key_or_default(" 7 "), 7);
/// assert_eq!(parse_key_or_default(""), 3);
/// assert_eq!(parse_key_or_default("seven"), 3);
/// assert_eq!(parse_key_or_default("40"), 40);
/// ```
#[must_use]
pub fn parse_key_or_default(raw: &str) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(DEFAULT_KEY)
}

/// Applies a key button press to the current key text.
///
/// Increase is a no-op once the value has reached [`MAX_KEY`], decrease a
/// no-op once it is at or below [`MIN_KEY`].
///
/// # Examples
///
/// ```
/// use cipherdeck::domain::{adjust_key, KeyAction};
///
/// assert_eq!(adjust_key("25", KeyAction::Increase), 25);
/// assert_eq!(adjust_key("1", KeyAction::Decrease), 1);
/// assert_eq!(adjust_key("", KeyAction::Increase), 4);
/// ```
#[must_use]
pub fn adjust_key(current: &str, action: KeyAction) -> i32 {
    let value = parse_key_or_default(current);
    match action {
        KeyAction::Increase if value < MAX_KEY => value + 1,
        KeyAction::Decrease if value > MIN_KEY => value - 1,
        _ => value,
    }
}

/// Whether the key input is relevant for `algorithm`.
#[must_use]
pub fn should_show_key_input(algorithm: Algorithm) -> bool {
    algorithm == Algorithm::Caesar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_input_only_for_caesar() {
        assert!(should_show_key_input(Algorithm::Caesar));
        assert!(!should_show_key_input(Algorithm::Substitution));
        assert!(!should_show_key_input(Algorithm::Transposition));
    }

    #[test]
    fn adjust_stays_inside_bounds() {
        assert_eq!(adjust_key("25", KeyAction::Increase), 25);
        assert_eq!(adjust_key("24", KeyAction::Increase), 25);
        assert_eq!(adjust_key("1", KeyAction::Decrease), 1);
        assert_eq!(adjust_key("2", KeyAction::Decrease), 1);
        assert_eq!(adjust_key("", KeyAction::Increase), 4);
        assert_eq!(adjust_key("abc", KeyAction::Decrease), 2);
    }

    #[test]
    fn adjust_leaves_typed_out_of_range_values_alone_upwards() {
        assert_eq!(adjust_key("40", KeyAction::Increase), 40);
        assert_eq!(adjust_key("40", KeyAction::Decrease), 39);
        assert_eq!(adjust_key("-2", KeyAction::Decrease), -2);
    }

    #[test]
    fn labels_pass_unknown_names_through() {
        assert_eq!(Algorithm::Substitution.display_name(), "Substitution");
        assert_eq!(Algorithm::Transposition.display_name(), "Transposition");
        assert_eq!(algorithm_label("rot13"), "rot13");
    }

    #[test]
    fn algorithm_cycle_visits_every_algorithm() {
        let mut seen = vec![Algorithm::Caesar];
        let mut current = Algorithm::Caesar.next();
        while current != Algorithm::Caesar {
            seen.push(current);
            current = current.next();
        }
        assert_eq!(seen, Algorithm::ALL.to_vec());
        assert_eq!(Algorithm::from_name(" transposition"), Some(Algorithm::Transposition));
        assert_eq!(Algorithm::from_name("cesar"), None);
    }

    #[test]
    fn request_serializes_with_lowercase_names() {
        let request = TransformRequest {
            text: "HELLO".to_string(),
            algorithm: Algorithm::Caesar,
            operation: Operation::Encrypt,
            key: 3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "HELLO", "algorithm": "caesar", "operation": "encrypt", "key": 3})
        );
    }

    #[test]
    fn result_tolerates_echoed_fields() {
        let reply: TransformResult = serde_json::from_str(
            r#"{"success": true, "result": "KHOOR", "algorithm": "caesar", "operation": "encrypt"}"#,
        )
        .unwrap();
        assert!(reply.success);
        assert_eq!(reply.result.as_deref(), Some("KHOOR"));
        assert!(reply.error.is_none());
    }
}
