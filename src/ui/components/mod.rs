//! Composable UI component renderers.
//!
//! - [`header`]: title and view tabs
//! - [`cipher`]: cipher form, input and output boxes
//! - [`quiz`]: quiz questions and summary
//! - [`toast`]: notification line
//! - [`footer`]: keybinding hints
//!
//! Both views share the same frame:
//!
//! ```text
//! [blank line]
//! [Header + tabs]
//! [Border]
//! [Cipher panel | Quiz panel]
//! [Notification]
//! [Border]
//! [Footer]
//! ```

mod cipher;
mod footer;
mod header;
mod quiz;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use cipher::render_cipher_panel;
use footer::render_footer;
use header::render_header;
use quiz::render_quiz_panel;
use toast::render_toast;

/// Draws a horizontal rule and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole frame.
///
/// The footer sits on `rows - 1`, its border above it and the notification
/// line above that; the active panel fills the space in between.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let toast_row = border_row.saturating_sub(1);

    match &vm.body {
        Body::Cipher(panel) => {
            render_cipher_panel(current_row, panel, theme, cols);
        }
        Body::Quiz(panel) => {
            render_quiz_panel(current_row, toast_row.saturating_sub(2), panel, theme, cols);
        }
    }

    render_toast(toast_row, vm.toast.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
