//! Display-priority policy derived from the search state.
//!
//! Nothing here is stored; every answer is recomputed from a
//! [`SearchState`] snapshot. The loading indicator is independent of the
//! banner and may coexist with items that are already rendered.

use super::search::SearchState;

/// Prompt shown before anything has been found.
pub const READY_MESSAGE: &str = "Everything is ready to start image search";

/// Generic message for every kind of fetch failure.
pub const FAILURE_MESSAGE: &str =
    "Oops, it looks like we have a problem! But we're already solving it...";

/// Message for a search that returned no images.
pub const NO_RESULTS_MESSAGE: &str = "Sorry, no images were found for your request";

/// Which single message line the status area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Neutral "ready to search" prompt.
    Ready,
    /// A fetch failed.
    Failed,
    /// The API returned an empty page.
    NoResults,
}

impl Banner {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Ready => READY_MESSAGE,
            Self::Failed => FAILURE_MESSAGE,
            Self::NoResults => NO_RESULTS_MESSAGE,
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Chooses the banner for the current state.
///
/// An error wins over the no-results message. The ready prompt only appears
/// while there is nothing else to show: no error, no empty result, no items
/// and no fetch running.
#[must_use]
pub fn banner(search: &SearchState) -> Option<Banner> {
    if search.error().is_some() {
        Some(Banner::Failed)
    } else if search.is_empty() {
        Some(Banner::NoResults)
    } else if search.items().is_empty() && !search.is_loading() {
        Some(Banner::Ready)
    } else {
        None
    }
}

/// Whether the load-more control is visible at all.
///
/// It is disabled, not hidden, while a page is loading; see
/// [`SearchState::is_loading`].
#[must_use]
pub fn shows_load_more(search: &SearchState) -> bool {
    search.has_more() && !search.items().is_empty()
}
