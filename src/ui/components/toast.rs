//! Notification line.

use crate::app::notifications::Phase;
use crate::ui::helpers::{fill, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Renders the mounted notification on `row`, or clears the row.
///
/// Entering and exiting notifications are dimmed so the transition is
/// visible between timer ticks.
pub fn render_toast(row: usize, toast: Option<&ToastInfo>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    let Some(toast) = toast else {
        print!("{}", " ".repeat(cols));
        return;
    };

    let text = truncate(&format!(" {} {}", toast.icon, toast.message), cols);
    match toast.phase {
        Phase::Visible => print!("{}", Theme::bold()),
        Phase::Entering | Phase::Exiting => print!("{}", Theme::dim()),
    }
    print!("{}", Theme::fg(theme.notification_color(toast.kind)));
    print!("{text}{}", fill(&text, cols));
    print!("{}", Theme::reset());
}
