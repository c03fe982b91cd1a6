//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of all transient plugin state: the
//! search orchestrator, the modal, the query being typed, the gallery cursor
//! and the transient notice line. It also holds the settings the handler needs
//! to turn fetch commands into host requests.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`UIViewModel`]. That covers windowing the gallery around the cursor,
//! truncating labels to the pane width, fuzzy-highlighting the query, and
//! applying the display-priority policy from [`display`](super::display).

use super::display::{self, Banner};
use super::modal::ModalState;
use super::modes::InputMode;
use super::search::SearchState;
use crate::api::ImageApi;
use crate::domain::ImageItem;
use crate::ui::helpers::truncate_chars;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    FooterInfo, GalleryRow, HeaderInfo, LoadMoreInfo, ModalInfo, SearchBarInfo, StatusLine,
    UIViewModel, AUTHOR_COLUMN_WIDTH, CHROME_ROWS, NUMBER_COLUMN_WIDTH, SIZE_COLUMN_WIDTH,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::VecDeque;

/// Default deadline for a single page fetch.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 15;

/// Default program used to open an image outside the terminal.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query, pages, items and loading/empty/error/has-more flags.
    pub search: SearchState,

    /// Enlarged image overlay.
    pub modal: ModalState,

    /// Whether keys edit the query or navigate the gallery.
    pub input_mode: InputMode,

    /// Text in the search bar. Submitted on Enter; kept afterwards so the
    /// bar keeps showing what was searched.
    pub input: String,

    /// Zero-based cursor within `search.items()`.
    pub selected_index: usize,

    /// One-line transient message, cleared on the next key press.
    pub notice: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Search endpoint; `None` when the configuration is unusable.
    pub api: Option<ImageApi>,

    pub request_timeout_secs: u32,

    pub opener: String,

    /// Generations with an armed timer, oldest first.
    ///
    /// Zellij timers carry no identity, and all of them use the same delay,
    /// so each `Timer` event belongs to the front of this queue.
    pub pending_timeouts: VecDeque<u64>,
}

impl AppState {
    /// Creates a fresh state with no search, no API and the typing cursor in
    /// the search bar.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zgallery::{AppState, InputMode, Theme};
    ///
    /// let state = AppState::new(Theme::default());
    /// assert_eq!(state.input_mode, InputMode::Typing);
    /// assert!(state.search.items().is_empty());
    /// ```
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            search: SearchState::new(),
            modal: ModalState::default(),
            input_mode: InputMode::Typing,
            input: String::new(),
            selected_index: 0,
            notice: None,
            theme,
            api: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            opener: DEFAULT_OPENER.to_string(),
            pending_timeouts: VecDeque::new(),
        }
    }

    /// Moves the gallery cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.search.items().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the gallery cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.search.items().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the cursor inside the item list after it shrank.
    pub fn clamp_selection(&mut self) {
        let len = self.search.items().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&ImageItem> {
        self.search.items().get(self.selected_index)
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Rows left for the gallery = `rows - CHROME_ROWS` (at least one)
    /// 2. Center the window on the cursor
    /// 3. Slide the window back when it would run past the last item
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let items = self.search.items();
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let centered_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (centered_start + available_rows).min(items.len());
        let mut visible_start = centered_start.min(visible_end);
        if visible_end - visible_start < available_rows && items.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let query = self.search.query();
        let matcher = (!query.is_empty()).then(SkimMatcherV2::default);

        let gallery = items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, item)| {
                self.compute_gallery_row(item, visible_start + relative_idx, cols, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            gallery,
            selected_index: self.selected_index.saturating_sub(visible_start),
            load_more: self.compute_load_more(),
            modal: self.compute_modal(),
            notice: self.notice.clone(),
            footer: self.compute_footer(),
        }
    }

    fn compute_gallery_row(
        &self,
        item: &ImageItem,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> GalleryRow {
        let label_width = cols
            .saturating_sub(NUMBER_COLUMN_WIDTH + AUTHOR_COLUMN_WIDTH + SIZE_COLUMN_WIDTH)
            .max(8);

        let label = truncate_chars(item.label(), label_width.saturating_sub(1));
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&label, m));

        GalleryRow {
            number: absolute_idx + 1,
            label,
            author: truncate_chars(
                item.author.as_deref().unwrap_or("unknown"),
                AUTHOR_COLUMN_WIDTH.saturating_sub(1),
            ),
            dimensions: item.dimensions().unwrap_or_default(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Character ranges of `text` matched by the current query, coalesced
    /// into contiguous `(start, end)` runs.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.search.query()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.search.has_searched() {
            format!(
                " Images for \"{}\" ({} loaded, page {}) ",
                self.search.query(),
                self.search.items().len(),
                self.search.page()
            )
        } else {
            " Image Search ".to_string()
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.input.clone(),
            is_focused: self.input_mode == InputMode::Typing && !self.modal.is_open(),
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if self.search.is_loading() {
            return Some(StatusLine::Loading(format!(
                "Loading page {}...",
                self.search.page()
            )));
        }

        display::banner(&self.search).map(|banner: Banner| StatusLine::Message {
            text: banner.message().to_string(),
            is_error: banner.is_error(),
        })
    }

    fn compute_load_more(&self) -> Option<LoadMoreInfo> {
        if !display::shows_load_more(&self.search) {
            return None;
        }

        let enabled = !self.search.is_loading();
        let label = if enabled {
            format!("[ Load more ] page {}", self.search.page() + 1)
        } else {
            "[ Loading... ]".to_string()
        };
        Some(LoadMoreInfo { label, enabled })
    }

    fn compute_modal(&self) -> Option<ModalInfo> {
        self.modal.is_open().then(|| ModalInfo {
            alt: self.modal.alt().to_string(),
            src: self.modal.src().to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.modal.is_open() {
            "o: open in browser  Esc/Enter/q: close"
        } else {
            match self.input_mode {
                InputMode::Typing => "Enter: search  Esc: back to results  Type to edit query",
                InputMode::Browsing => {
                    "j/k or Ctrl+n/p: navigate  Enter: view  m: load more  /: search  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, SearchPage};

    fn state_with_items(count: usize, total_pages: u32) -> AppState {
        let mut state = AppState::new(Theme::default());
        let command = state.search.submit_search("cat").unwrap();
        let images = (0..count)
            .map(|n| ImageItem::new(format!("t{n}"), format!("f{n}"), format!("cat number {n}")))
            .collect();
        state.search.settle(command.generation, Ok(SearchPage { images, total_pages }));
        state.input_mode = InputMode::Browsing;
        state
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with_items(3, 1);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_noop_without_items() {
        let mut state = AppState::new(Theme::default());
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn fresh_viewmodel_shows_ready_prompt() {
        let vm = AppState::new(Theme::default()).compute_viewmodel(24, 80);

        assert!(vm.gallery.is_empty());
        assert!(vm.load_more.is_none());
        assert!(vm.search_bar.is_focused);
        assert_eq!(
            vm.status,
            Some(StatusLine::Message {
                text: display::READY_MESSAGE.to_string(),
                is_error: false,
            })
        );
    }

    #[test]
    fn loading_keeps_items_and_disables_load_more() {
        let mut state = state_with_items(2, 3);
        let _command = state.search.load_more();
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.gallery.len(), 2);
        assert!(matches!(vm.status, Some(StatusLine::Loading(_))));
        assert_eq!(vm.load_more.map(|l| l.enabled), Some(false));
    }

    #[test]
    fn error_banner_is_flagged() {
        let mut state = AppState::new(Theme::default());
        let command = state.search.submit_search("cat").unwrap();
        state.search.settle(command.generation, Err(FetchError::Timeout));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.status,
            Some(StatusLine::Message {
                text: display::FAILURE_MESSAGE.to_string(),
                is_error: true,
            })
        );
    }

    #[test]
    fn window_follows_the_cursor() {
        let mut state = state_with_items(50, 5);
        state.selected_index = 40;
        let vm = state.compute_viewmodel(CHROME_ROWS + 10, 100);

        assert_eq!(vm.gallery.len(), 10);
        assert!(vm.gallery[vm.selected_index].is_selected);
        assert_eq!(vm.gallery[vm.selected_index].number, 41);
    }

    #[test]
    fn window_sticks_to_the_end() {
        let mut state = state_with_items(20, 1);
        state.selected_index = 19;
        let vm = state.compute_viewmodel(CHROME_ROWS + 6, 100);

        assert_eq!(vm.gallery.len(), 6);
        assert_eq!(vm.gallery.last().map(|row| row.number), Some(20));
    }

    #[test]
    fn query_matches_are_highlighted() {
        let state = state_with_items(1, 1);
        let vm = state.compute_viewmodel(24, 100);

        assert_eq!(vm.gallery[0].highlight_ranges, vec![(0, 3)]);
    }

    #[test]
    fn header_reports_progress() {
        let state = state_with_items(4, 2);
        let vm = state.compute_viewmodel(24, 100);
        assert!(vm.header.title.contains("\"cat\""));
        assert!(vm.header.title.contains("4 loaded"));
    }

    #[test]
    fn open_modal_swaps_footer_and_unfocuses_bar() {
        let mut state = AppState::new(Theme::default());
        state.modal.open("https://img/full", "a cat");
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(
            vm.modal,
            Some(ModalInfo {
                alt: "a cat".to_string(),
                src: "https://img/full".to_string(),
            })
        );
        assert!(!vm.search_bar.is_focused);
        assert!(vm.footer.keybindings.starts_with("o: open"));
    }
}
