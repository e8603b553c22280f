//! Cipher form: settings, input box, output box and stats line.

use crate::ui::helpers::{fill, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CipherPanel;

/// Renders the cipher panel from `row` and returns the next free row.
///
/// Takes `5 + input_rows + output_rows` rows.
pub fn render_cipher_panel(row: usize, panel: &CipherPanel, theme: &Theme, cols: usize) -> usize {
    let mut row = render_settings(row, panel, theme, cols);
    row = render_key(row, panel, theme, cols);

    let input_label = format!("Input · {} chars", panel.input_count);
    let input_color = if panel.input_focused {
        &theme.colors.focus_border
    } else {
        &theme.colors.border
    };
    row = render_label(row, &input_label, input_color, cols);
    row = render_box(row, &panel.input_lines, panel.input_rows, theme, cols);

    let mut output_label = format!("Output · {} chars", panel.output_count);
    if panel.loading {
        output_label.push_str(" · processing…");
    }
    let output_color = if panel.loading {
        &theme.colors.loading
    } else {
        &theme.colors.border
    };
    row = render_label(row, &output_label, output_color, cols);
    row = render_box(row, &panel.output_lines, panel.output_rows, theme, cols);

    render_stats(row, panel, theme, cols)
}

fn render_settings(row: usize, panel: &CipherPanel, theme: &Theme, cols: usize) -> usize {
    let line = truncate(
        &format!(" Algorithm ‹{}›   Operation ‹{}›", panel.algorithm, panel.operation),
        cols,
    );

    position_cursor(row, 1);
    print!("{}{line}{}", Theme::fg(&theme.colors.text_normal), fill(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_key(row: usize, panel: &CipherPanel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match &panel.key {
        Some(key) => {
            let line = truncate(&format!(" Key [{}]", key.value), cols);
            if key.focused {
                print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.focus_border));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("{line}{}", fill(&line, cols));
        }
        None => print!("{}", " ".repeat(cols)),
    }
    print!("{}", Theme::reset());
    row + 1
}

fn render_label(row: usize, label: &str, color: &str, cols: usize) -> usize {
    let head = format!("── {label} ");
    let head = truncate(&head, cols);

    position_cursor(row, 1);
    print!("{}{head}{}", Theme::fg(color), "─".repeat(cols.saturating_sub(head.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws `lines` indented by two columns and blanks the rest of `height`.
fn render_box(row: usize, lines: &[String], height: usize, theme: &Theme, cols: usize) -> usize {
    for offset in 0..height {
        position_cursor(row + offset, 1);
        let text = lines.get(offset).map_or("", String::as_str);
        let line = truncate(&format!("  {text}"), cols);
        print!("{}{line}{}", Theme::fg(&theme.colors.text_normal), fill(&line, cols));
        print!("{}", Theme::reset());
    }
    row + height
}

fn render_stats(row: usize, panel: &CipherPanel, theme: &Theme, cols: usize) -> usize {
    let line = truncate(
        &format!(" Time {}   Algorithm {}", panel.processing_time, panel.algorithm_used),
        cols,
    );

    position_cursor(row, 1);
    print!("{}{line}{}", Theme::fg(&theme.colors.text_dim), fill(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}
