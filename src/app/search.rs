//! Search orchestration: query, pagination and fetch bookkeeping.
//!
//! [`SearchState`] owns everything about the current search. It is mutated
//! only through named transitions, and every transition that changes the
//! query or the page returns the asynchronous work to schedule as a
//! [`FetchCommand`]. The caller executes the command and later hands the
//! outcome back through [`SearchState::settle`].
//!
//! ```text
//! submit_search / load_more ──► FetchCommand ──► (host fetch) ──► settle
//! ```
//!
//! Each command carries a generation number. Only the most recently issued
//! generation may settle; anything older is discarded, so a slow page from a
//! previous query can never be appended after a reset.

use crate::domain::{FetchError, ImageItem, SearchPage};

/// A fetch the runtime must perform on behalf of the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    /// Non-empty search term.
    pub query: String,
    /// 1-based page to request.
    pub page: u32,
    /// Token identifying this fetch when it settles.
    pub generation: u64,
}

/// State of the current image search.
///
/// Created empty at startup and never persisted.
///
/// # Example
///
/// ```
/// use zgallery::app::SearchState;
/// use zgallery::{ImageItem, SearchPage};
///
/// let mut search = SearchState::new();
/// let command = search.submit_search("cats").expect("non-empty query fetches");
/// assert!(search.is_loading());
///
/// let page = SearchPage {
///     images: vec![ImageItem::new("t1", "f1", "cat")],
///     total_pages: 3,
/// };
/// assert!(search.settle(command.generation, Ok(page)));
/// assert_eq!(search.items().len(), 1);
/// assert!(search.has_more());
/// ```
#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    page: u32,
    items: Vec<ImageItem>,
    is_loading: bool,
    is_empty: bool,
    has_more: bool,
    error: Option<FetchError>,
    next_generation: u64,
    in_flight: Option<u64>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            items: Vec::new(),
            is_loading: false,
            is_empty: false,
            has_more: false,
            error: None,
            next_generation: 0,
            in_flight: None,
        }
    }

    /// Starts a new search, discarding everything from the previous one.
    ///
    /// Items, error, empty and has-more flags are cleared and the page goes
    /// back to 1 in one step. Any fetch still in flight becomes stale.
    ///
    /// Returns the fetch to perform, or `None` for an empty query: an empty
    /// query resets state but never reaches the API.
    pub fn submit_search(&mut self, query: impl Into<String>) -> Option<FetchCommand> {
        let query = query.into();
        tracing::debug!(query = %query, previous = %self.query, "search submitted");

        self.items.clear();
        self.query = query;
        self.error = None;
        self.page = 1;
        self.is_empty = false;
        self.has_more = false;
        self.in_flight = None;
        self.is_loading = false;

        self.react()
    }

    /// Advances to the next page and returns the fetch for it.
    ///
    /// There is no guard here; callers check [`can_load_more`](Self::can_load_more)
    /// first, the same way a disabled button would.
    pub fn load_more(&mut self) -> Option<FetchCommand> {
        self.page += 1;
        tracing::debug!(query = %self.query, page = self.page, "loading next page");
        self.react()
    }

    /// Whether a load-more request makes sense right now.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading && !self.items.is_empty()
    }

    /// Applies the outcome of the fetch identified by `generation`.
    ///
    /// Returns `false` when the outcome is stale (a newer fetch was issued or
    /// the search was reset) and was ignored.
    pub fn settle(&mut self, generation: u64, outcome: Result<SearchPage, FetchError>) -> bool {
        if self.in_flight != Some(generation) {
            tracing::debug!(
                generation,
                in_flight = ?self.in_flight,
                "discarding stale fetch outcome"
            );
            return false;
        }

        self.in_flight = None;
        self.is_loading = false;

        match outcome {
            Ok(page) if page.images.is_empty() => {
                tracing::debug!(query = %self.query, page = self.page, "search returned no images");
                self.is_empty = true;
                self.has_more = false;
            }
            Ok(page) => {
                tracing::debug!(
                    query = %self.query,
                    page = self.page,
                    received = page.images.len(),
                    total_pages = page.total_pages,
                    "search page received"
                );
                self.items.extend(page.images);
                self.has_more = self.page < page.total_pages;
            }
            Err(error) => {
                tracing::warn!(query = %self.query, page = self.page, error = %error, "image fetch failed");
                self.error = Some(error);
                self.has_more = false;
            }
        }

        true
    }

    /// Runs the fetch reaction after the query or page changed.
    fn react(&mut self) -> Option<FetchCommand> {
        if self.query.is_empty() {
            return None;
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        self.in_flight = Some(generation);
        self.is_loading = true;

        Some(FetchCommand {
            query: self.query.clone(),
            page: self.page,
            generation,
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_empty
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Generation of the fetch currently awaiting an outcome.
    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Whether a non-empty query has been submitted.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        !self.query.is_empty()
    }
}
