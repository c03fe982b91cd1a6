//! Composable UI component renderers.
//!
//! Each component draws one part of the pane and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box
//! - [`status`]: Loader, banners, and the transient notice
//! - [`gallery`]: Image table and the load-more control
//! - [`modal`]: Enlarged image overlay
//! - [`footer`]: Keybinding hints

mod footer;
mod gallery;
mod header;
mod modal;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use gallery::{render_gallery_headers, render_gallery_rows, render_load_more};
use header::render_header;
use modal::render_modal;
use search::render_search_bar;
use status::{render_notice, render_status};

/// Renders a horizontal border line at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full pane.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status: loader or banner]
/// [Column Headers]
/// [Gallery Rows]
/// [Load more]
/// [Blank padding to fill screen]
/// [Notice]
/// [Border]
/// [Footer]
/// ```
///
/// The modal, when open, is drawn last on top of everything else.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);

    if !vm.gallery.is_empty() {
        current_row = render_gallery_headers(current_row, theme, cols);
        current_row = render_gallery_rows(current_row, &vm.gallery, theme, cols);
        render_load_more(current_row, vm.load_more.as_ref(), theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let notice_row = border_row.saturating_sub(1);

    render_notice(notice_row, vm.notice.as_deref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
}
