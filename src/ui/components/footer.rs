//! Footer help bar.

use crate::ui::helpers::{centre, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centred and dimmed, truncated to `cols`.
///
/// Returns the next free row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let (left, right) = centre(help_text.chars().count(), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}{help_text}{}", " ".repeat(left), " ".repeat(right));
    print!("{}", Theme::reset());
    row + 1
}
