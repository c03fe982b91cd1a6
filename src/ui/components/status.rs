//! Status line and notice renderers.
//!
//! Both draw a single centered line; they differ only in where the line sits
//! and which color it takes.

use crate::ui::helpers::{char_len, position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the loader or banner under the search bar, or a blank line.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    match status {
        Some(StatusLine::Loading(text)) => {
            render_centered(row, text, &theme.colors.loading_fg, cols);
        }
        Some(StatusLine::Message { text, is_error }) => {
            let color = if *is_error {
                &theme.colors.error_fg
            } else {
                &theme.colors.banner_fg
            };
            render_centered(row, text, color, cols);
        }
        None => {
            position_cursor(row, 1);
            print!("{}", " ".repeat(cols));
        }
    }
    row + 1
}

/// Renders the transient notice, if any, on `row`.
pub fn render_notice(row: usize, notice: Option<&str>, theme: &Theme, cols: usize) {
    if let Some(text) = notice {
        render_centered(row, text, &theme.colors.notice_fg, cols);
    }
}

fn render_centered(row: usize, text: &str, color: &str, cols: usize) {
    let text = truncate_chars(text, cols);
    let text_len = char_len(&text);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}
