//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: truncated labels,
//! highlight ranges, resolved messages.

/// Rows used by everything except gallery rows: blank line, header, border,
/// search box (3), status line, column headers, load-more row, notice line,
/// border, footer, and the trailing blank line.
pub const CHROME_ROWS: usize = 13;

/// Width of the `#` column, including its trailing gap.
pub const NUMBER_COLUMN_WIDTH: usize = 5;

/// Width of the photographer column, including its trailing gap.
pub const AUTHOR_COLUMN_WIDTH: usize = 24;

/// Width of the size column.
pub const SIZE_COLUMN_WIDTH: usize = 11;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Loading indicator or banner message, if any.
    pub status: Option<StatusLine>,

    /// Visible window of gallery rows.
    pub gallery: Vec<GalleryRow>,

    /// Index of the selected row within `gallery`.
    pub selected_index: usize,

    /// Load-more control; `None` when hidden.
    pub load_more: Option<LoadMoreInfo>,

    /// Modal overlay; `None` when closed.
    pub modal: Option<ModalInfo>,

    /// Transient toast-like message.
    pub notice: Option<String>,

    pub footer: FooterInfo,
}

/// One image in the gallery table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryRow {
    /// 1-based position in the full result list.
    pub number: usize,

    /// Alt text, already truncated to the column width.
    pub label: String,

    pub author: String,

    /// `WxH`, or empty when unknown.
    pub dimensions: String,

    pub is_selected: bool,

    /// Character ranges of `label` matching the query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Text currently in the bar.
    pub query: String,

    /// Whether keystrokes go to the bar (draws a cursor).
    pub is_focused: bool,
}

/// Content of the single status line under the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// A fetch is running.
    Loading(String),

    /// Ready prompt, no-results message, or the generic failure message.
    Message {
        text: String,
        /// Rendered with the error color.
        is_error: bool,
    },
}

/// Load-more control display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreInfo {
    pub label: String,

    /// `false` while a page is loading.
    pub enabled: bool,
}

/// Enlarged image overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub alt: String,
    pub src: String,
}
