//! Enlarged-image overlay renderer.
//!
//! A terminal cannot show the picture itself, so the overlay shows what the
//! modal holds: the description, the full-size URL and how to open it.
//!
//! ```text
//! ╭─ Image ──────────────────────────────╮
//! │                                      │
//! │  brown mountain under a cloudy sky   │
//! │                                      │
//! │  https://images.unsplash.com/photo-… │
//! │                                      │
//! │  o: open in browser   Esc: close     │
//! ╰──────────────────────────────────────╯
//! ```

use crate::ui::helpers::{char_len, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const MAX_MODAL_WIDTH: usize = 76;
const MAX_ALT_LINES: usize = 4;
const MAX_URL_LINES: usize = 3;
const INNER_MARGIN: usize = 2;
const HINT: &str = "o: open in browser   Esc: close";

/// Draws the overlay centered in a `rows` x `cols` pane.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH);
    if width < INNER_MARGIN * 2 + 6 {
        return;
    }
    let text_width = width - 2 - INNER_MARGIN * 2;

    let alt = if modal.alt.trim().is_empty() {
        vec!["(no description)".to_string()]
    } else {
        wrap_text(&modal.alt, text_width, MAX_ALT_LINES)
    };
    let url = wrap_text(&modal.src, text_width, MAX_URL_LINES);

    let mut body: Vec<(String, &str)> = Vec::new();
    body.push((String::new(), theme.colors.text_normal.as_str()));
    body.extend(alt.into_iter().map(|line| (line, theme.colors.text_normal.as_str())));
    body.push((String::new(), theme.colors.text_normal.as_str()));
    body.extend(url.into_iter().map(|line| (line, theme.colors.banner_fg.as_str())));
    body.push((String::new(), theme.colors.text_normal.as_str()));
    body.push((HINT.to_string(), theme.colors.text_dim.as_str()));

    let height = body.len() + 2;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;

    let title = " Image ";
    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.modal_border));
    print!(
        "╭─{title}{}╮",
        "─".repeat(width.saturating_sub(3 + char_len(title)))
    );

    for (offset, (line, color)) in body.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{}", Theme::fg(&theme.colors.modal_border));
        print!("│{}", " ".repeat(INNER_MARGIN));
        print!("{}", Theme::fg(color));
        print!("{line}");
        print!("{}", " ".repeat(text_width.saturating_sub(char_len(line)) + INNER_MARGIN));
        print!("{}", Theme::fg(&theme.colors.modal_border));
        print!("│");
    }

    position_cursor(top + height - 1, left);
    print!("╰{}╯", "─".repeat(width - 2));
    print!("{}", Theme::reset());
}
