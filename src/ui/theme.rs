//! Colour themes and ANSI escape sequences.
//!
//! Two Catppuccin variants are built in (`catppuccin-mocha`, the default, and
//! `catppuccin-latte`). Custom themes are TOML files:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! focus_border = "#cba6f7"
//! success = "#a6e3a1"
//! error = "#f38ba8"
//! info = "#89b4fa"
//! warning = "#f9e2af"
//! correct = "#a6e3a1"
//! incorrect = "#f38ba8"
//! loading = "#fab387"
//! ```

use crate::app::notifications::NotificationKind;
use crate::domain::{CipherdeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MOCHA: &str = include_str!("../../themes/catppuccin-mocha.toml");
const LATTE: &str = include_str!("../../themes/catppuccin-latte.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colour strings (`"#rrggbb"`) for every styled element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub tab_active_fg: String,
    pub tab_active_bg: String,

    pub text_normal: String,
    /// Labels, placeholders and the footer.
    pub text_dim: String,

    pub border: String,
    /// Border of the field that receives typed characters.
    pub focus_border: String,

    pub success: String,
    pub error: String,
    pub info: String,
    pub warning: String,

    /// Quiz option marks.
    pub correct: String,
    pub incorrect: String,

    pub loading: String,
}

impl Theme {
    /// Looks up a built-in theme.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => MOCHA,
            "catppuccin-latte" => LATTE,
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Io`] if the file cannot be read and
    /// [`CipherdeckError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| CipherdeckError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Colour of a notification of the given kind.
    #[must_use]
    pub fn notification_color(&self, kind: NotificationKind) -> &str {
        match kind {
            NotificationKind::Success => &self.colors.success,
            NotificationKind::Error => &self.colors.error,
            NotificationKind::Info => &self.colors.info,
            NotificationKind::Warning => &self.colors.warning,
        }
    }

    /// Parses `#rrggbb`; anything else renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        toml::from_str(MOCHA).unwrap_or_else(|_| Self {
            name: "catppuccin-mocha".to_string(),
            colors: ThemeColors::fallback(),
        })
    }
}

impl ThemeColors {
    /// Mocha palette, used only if the bundled file fails to parse.
    fn fallback() -> Self {
        let hex = |s: &str| s.to_string();
        Self {
            header_fg: hex("#cdd6f4"),
            header_bg: None,
            tab_active_fg: hex("#1e1e2e"),
            tab_active_bg: hex("#cba6f7"),
            text_normal: hex("#cdd6f4"),
            text_dim: hex("#6c7086"),
            border: hex("#45475a"),
            focus_border: hex("#cba6f7"),
            success: hex("#a6e3a1"),
            error: hex("#f38ba8"),
            info: hex("#89b4fa"),
            warning: hex("#f9e2af"),
            correct: hex("#a6e3a1"),
            incorrect: hex("#f38ba8"),
            loading: hex("#fab387"),
        }
    }
}
