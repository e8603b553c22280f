//! Title bar with view tabs.

use crate::ui::helpers::{centre, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centred title followed by one tab per view.
///
/// The active tab is drawn in the theme's tab colours; inactive tabs are dim.
/// Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let tab_width: usize = header.tabs.iter().map(|t| t.label.chars().count() + 3).sum();
    let line_len = header.title.chars().count() + tab_width;
    let (left, right) = centre(line_len, cols);

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(left));
    print!("{}{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), header.title);
    print!("{}", Theme::reset());

    for tab in &header.tabs {
        print!(" ");
        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!(" {} ", tab.label);
        print!("{}", Theme::reset());
    }

    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
    row + 1
}
