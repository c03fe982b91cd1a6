//! Gallery table renderer.
//!
//! One row per image: number, description, photographer, size. Rows are
//! padded to the full pane width so the selection background spans the row.

use crate::ui::helpers::{char_len, highlighted_text, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    GalleryRow, LoadMoreInfo, AUTHOR_COLUMN_WIDTH, NUMBER_COLUMN_WIDTH, SIZE_COLUMN_WIDTH,
};

/// Width of the description column for a pane of `cols` columns.
fn label_column_width(cols: usize) -> usize {
    cols.saturating_sub(NUMBER_COLUMN_WIDTH + AUTHOR_COLUMN_WIDTH + SIZE_COLUMN_WIDTH)
        .max(8)
}

/// Renders the bold column headers.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_gallery_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let label_width = label_column_width(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(
        "{:>3}  {:<label_width$}{:<AUTHOR_COLUMN_WIDTH$}{:<SIZE_COLUMN_WIDTH$}",
        "#", "DESCRIPTION", "PHOTOGRAPHER", "SIZE"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row of the visible window.
///
/// # Returns
///
/// The next available row position (row + number of rows)
pub fn render_gallery_rows(row: usize, rows: &[GalleryRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for gallery_row in rows {
        current_row = render_gallery_row(current_row, gallery_row, theme, cols);
    }
    current_row
}

/// Renders one image row.
///
/// Styling precedence: selection background, then query highlights (never
/// on the selected row), then the normal text color.
fn render_gallery_row(row: usize, item: &GalleryRow, theme: &Theme, cols: usize) -> usize {
    let label_width = label_column_width(cols);

    position_cursor(row, 1);
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{:>3}  ", item.number);
    print!(
        "{}",
        highlighted_text(&item.label, &item.highlight_ranges, theme, item.is_selected)
    );
    print!("{}", " ".repeat(label_width.saturating_sub(char_len(&item.label))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{:<AUTHOR_COLUMN_WIDTH$}", item.author);
    print!("{:<SIZE_COLUMN_WIDTH$}", item.dimensions);

    let line_len = NUMBER_COLUMN_WIDTH + label_width + AUTHOR_COLUMN_WIDTH + SIZE_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the load-more control centered on `row`; blank when hidden.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_load_more(row: usize, load_more: Option<&LoadMoreInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(info) = load_more else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let label_len = char_len(&info.label);
    let padding = cols.saturating_sub(label_len) / 2;

    if info.enabled {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", info.label);
    print!("{}", " ".repeat(cols.saturating_sub(padding + label_len)));
    print!("{}", Theme::reset());
    row + 1
}
