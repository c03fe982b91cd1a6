//! Shared rendering utilities.
//!
//! Text shaping (truncation, wrapping, highlighting) returns strings so it
//! can be tested; only [`position_cursor`] writes to stdout. All widths are
//! counted in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col` with `\u{1b}[{row};{col}H`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// # Example
///
/// ```rust
/// use zgallery::ui::helpers::truncate_chars;
///
/// assert_eq!(truncate_chars("mountain lake", 20), "mountain lake");
/// assert_eq!(truncate_chars("mountain lake", 8), "mount...");
/// ```
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut truncated: String = text.chars().take(max - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
///
/// Words longer than `width` are split. When text remains after the last
/// allowed line, that line is truncated with `...`.
#[must_use]
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        loop {
            let needed = if current.is_empty() {
                char_len(&word)
            } else {
                char_len(&current) + 1 + char_len(&word)
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }

            if current.is_empty() {
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
                if word.is_empty() {
                    break;
                }
            } else {
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let base = truncate_chars(last, width.saturating_sub(3));
            *last = format!("{}...", base.trim_end_matches("..."));
        }
    }
    lines
}

/// Wraps the characters in `ranges` with the theme's match highlight.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Out-of-bounds ranges are clamped. Selected rows are left
/// plain so the selection background stays readable.
#[must_use]
pub fn highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) -> String {
    if ranges.is_empty() || is_selected {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 2);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);
        if start < end {
            out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
            out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
            out.extend(&chars[start..end]);
            out.push_str(Theme::reset());
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}
