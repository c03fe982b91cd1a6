//! Search bar component renderer.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PROMPT: &str = " Search images: ";

/// Renders the 3-line search box starting at `row`.
///
/// ```text
/// [margin] ┌──────────────────────────┐ [margin]
/// [margin] │ Search images: mountains▏│ [margin]
/// [margin] └──────────────────────────┘ [margin]
/// ```
///
/// A focused bar uses the `search_bar_border` color and shows a cursor after
/// the query. An unfocused bar is drawn with the plain border color. When the
/// query is wider than the box, its tail stays visible.
///
/// # Returns
///
/// The next available row position (row + 3)
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_focused { "▏" } else { "" };
    let room = inner_width.saturating_sub(char_len(PROMPT) + char_len(cursor));
    let query_len = char_len(&search.query);
    let visible_query: String = search
        .query
        .chars()
        .skip(query_len.saturating_sub(room))
        .collect();
    let text_len = char_len(PROMPT) + char_len(&visible_query) + char_len(cursor);
    let padding = inner_width.saturating_sub(text_len);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{PROMPT}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{visible_query}");
    if search.is_focused {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("{cursor}");
    }
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
