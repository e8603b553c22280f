//! Shared rendering utilities.
//!
//! Widths are counted in characters, not bytes.

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, ending in `…` when shortened.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Spaces needed after `text` to fill `width` columns.
#[must_use]
pub fn fill(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}

/// Left and right padding that centres `len` characters in `width`.
#[must_use]
pub const fn centre(len: usize, width: usize) -> (usize, usize) {
    let left = width.saturating_sub(len) / 2;
    (left, width.saturating_sub(left + len))
}
