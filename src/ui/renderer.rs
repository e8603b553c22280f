//! Top-level rendering entry point.
//!
//! Rendering is two steps: [`AppState::compute_viewmodel`] turns state into a
//! display-ready [`UIViewModel`](crate::ui::UIViewModel), then the components
//! print it with ANSI styling.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; every row of the frame is overwritten instead.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, &state.theme, cols, rows);
}
