//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, so
//! user-supplied paths (theme and quiz files) need their `~` rewritten before
//! they can be opened.

use std::path::PathBuf;

/// Returns the data directory used for trace files.
///
/// Resolves to `~/.local/share/zellij/cipherdeck` on the host when Zellij is
/// started from the home directory.
///
/// # Examples
///
/// ```
/// use cipherdeck::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/cipherdeck");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cipherdeck")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use cipherdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/quiz.toml"), "/host/quiz.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
