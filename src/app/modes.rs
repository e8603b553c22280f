//! View and focus state types.
//!
//! These enums decide which key map is active and which part of the screen
//! receives typed characters.

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The cipher tool: input, key, algorithm, operation and result.
    Cipher,

    /// The cryptography quiz.
    Quiz,
}

impl View {
    /// Parses a view name, as used by the `start_view` option.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cipher" => Some(Self::Cipher),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cipher => Self::Quiz,
            Self::Quiz => Self::Cipher,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Cipher => "Cipher",
            Self::Quiz => "Quiz",
        }
    }
}

/// Field of the cipher form receiving typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The multi-line input text.
    Text,

    /// The numeric key field. Only reachable while it is visible.
    Key,
}

/// Cursor movement direction in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

impl Step {
    /// Moves `index` one step within `0..len`, wrapping at both ends.
    #[must_use]
    pub const fn apply(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            Self::Next => (index + 1) % len,
            Self::Prev => {
                if index == 0 {
                    len - 1
                } else {
                    index - 1
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_wrap_around() {
        assert_eq!(Step::Next.apply(2, 3), 0);
        assert_eq!(Step::Prev.apply(0, 3), 2);
        assert_eq!(Step::Next.apply(0, 0), 0);
    }

    #[test]
    fn view_names() {
        assert_eq!(View::from_name("Quiz"), Some(View::Quiz));
        assert_eq!(View::from_name(" cipher "), Some(View::Cipher));
        assert_eq!(View::from_name("settings"), None);
        assert_eq!(View::Cipher.toggled(), View::Quiz);
    }
}
