//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where events turn into state changes.
//! It returns whether a re-render is needed plus the side effects to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`
//! - **Input**: `FocusSearch`, `Char`, `Backspace`, `SubmitQuery`, `CancelInput`
//! - **Pagination**: `LoadMore`
//! - **Modal**: `CloseModal`, `OpenExternal`
//! - **Host**: `FetchSettled`, `TimerFired`, `PermissionsResult`, `CloseFocus`
//!
//! Every fetch the orchestrator asks for becomes two actions: the
//! [`Action::Fetch`] itself and an [`Action::ScheduleTimeout`] bounding it.
//!
//! # Example
//!
//! ```rust
//! use zgallery::{handle_event, AppState, Event, Theme};
//!
//! let mut state = AppState::new(Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Char('c'))?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), zgallery::GalleryError>(())
//! ```

use crate::app::modes::InputMode;
use crate::app::search::FetchCommand;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{FetchError, SearchPage};

/// Notice shown when Enter is pressed on a blank search bar.
pub const EMPTY_QUERY_NOTICE: &str = "Please enter a search term";

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the gallery cursor down (wraps to top).
    KeyDown,
    /// Moves the gallery cursor up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Moves focus to the search bar.
    FocusSearch,
    /// Appends a character to the query being typed.
    Char(char),
    /// Removes the last character of the query being typed.
    Backspace,
    /// Submits the typed query as a new search.
    SubmitQuery,
    /// Leaves the search bar without searching.
    CancelInput,
    /// Requests the next result page.
    LoadMore,
    /// Opens the selected gallery item in the modal.
    OpenSelected,
    /// Closes the modal.
    CloseModal,
    /// Opens the modal's image with the external opener.
    OpenExternal,

    /// A fetch finished, successfully or not.
    FetchSettled {
        /// Generation from the request context.
        generation: u64,
        /// Decoded page or classified failure.
        outcome: std::result::Result<SearchPage, FetchError>,
    },

    /// A host timer armed by [`Action::ScheduleTimeout`] fired.
    TimerFired,

    /// The user answered the permission prompt.
    PermissionsResult {
        /// Whether the requested permissions were granted.
        granted: bool,
    },
}

impl Event {
    /// Whether the event comes from the keyboard.
    const fn is_key_input(&self) -> bool {
        !matches!(
            self,
            Self::FetchSettled { .. } | Self::TimerFired | Self::PermissionsResult { .. }
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Currently every transition is total; the `Result` keeps the shim's error
/// path in place for transitions that may fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let cleared_notice = event.is_key_input() && state.notice.take().is_some();

    let (should_render, actions) = match event {
        Event::KeyDown => {
            if state.modal.is_open() {
                return Ok((cleared_notice, vec![]));
            }
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            if state.modal.is_open() {
                return Ok((cleared_notice, vec![]));
            }
            state.move_selection_up();
            (true, vec![])
        }
        Event::CloseFocus => (cleared_notice, vec![Action::CloseFocus]),
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            (true, vec![])
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((cleared_notice, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, char = %c, "search input updated");
            (true, vec![])
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((cleared_notice, vec![]));
            }
            state.input.pop();
            (true, vec![])
        }
        Event::CancelInput => {
            state.input_mode = InputMode::Browsing;
            state.input = state.search.query().to_string();
            (true, vec![])
        }
        Event::SubmitQuery => submit_query(state),
        Event::LoadMore => {
            if !state.search.can_load_more() {
                tracing::debug!(
                    has_more = state.search.has_more(),
                    is_loading = state.search.is_loading(),
                    "load more ignored"
                );
                return Ok((cleared_notice, vec![]));
            }
            let command = state.search.load_more();
            (true, fetch_actions(state, command))
        }
        Event::OpenSelected => {
            let Some(item) = state.selected_item() else {
                tracing::debug!("no image selected");
                return Ok((cleared_notice, vec![]));
            };
            let (src, alt) = (item.full_url.clone(), item.alt_text.clone());
            state.modal.open(src, alt);
            (true, vec![])
        }
        Event::CloseModal => {
            let was_open = state.modal.is_open();
            state.modal.close();
            (was_open, vec![])
        }
        Event::OpenExternal => {
            if !state.modal.is_open() {
                return Ok((cleared_notice, vec![]));
            }
            tracing::debug!(program = %state.opener, url = %state.modal.src(), "opening image externally");
            (
                false,
                vec![Action::OpenExternal {
                    program: state.opener.clone(),
                    url: state.modal.src().to_string(),
                }],
            )
        }
        Event::FetchSettled { generation, outcome } => {
            let applied = state.search.settle(*generation, outcome.clone());
            if applied {
                state.clamp_selection();
            }
            (applied, vec![])
        }
        Event::TimerFired => {
            let Some(generation) = state.pending_timeouts.pop_front() else {
                return Ok((false, vec![]));
            };
            if state.search.in_flight() == Some(generation) {
                tracing::warn!(generation, "fetch deadline passed");
                state.search.settle(generation, Err(FetchError::Timeout));
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                (false, vec![])
            } else {
                state.notice = Some("Web access was denied; image search is unavailable".to_string());
                (true, vec![])
            }
        }
    };

    Ok((should_render || cleared_notice, actions))
}

/// Submits the typed query, or explains why nothing happened.
fn submit_query(state: &mut AppState) -> (bool, Vec<Action>) {
    let query = state.input.trim().to_string();

    if query.is_empty() {
        state.notice = Some(EMPTY_QUERY_NOTICE.to_string());
        return (true, vec![]);
    }

    if state.api.is_none() {
        state.notice = Some("Set api_key in the plugin configuration to search".to_string());
        return (true, vec![]);
    }

    tracing::debug!(query = %query, "submitting search");
    state.input.clone_from(&query);
    state.input_mode = InputMode::Browsing;
    state.selected_index = 0;

    let command = state.search.submit_search(query);
    (true, fetch_actions(state, command))
}

/// Turns a fetch command into host actions and arms its timeout.
fn fetch_actions(state: &mut AppState, command: Option<FetchCommand>) -> Vec<Action> {
    let (Some(command), Some(api)) = (command, state.api.as_ref()) else {
        return vec![];
    };

    let request = api.request(&command);
    tracing::debug!(
        generation = command.generation,
        page = command.page,
        "dispatching fetch"
    );

    state.pending_timeouts.push_back(command.generation);
    vec![
        Action::Fetch(request),
        Action::ScheduleTimeout {
            generation: command.generation,
            seconds: state.request_timeout_secs,
        },
    ]
}
