//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a
//! `Vec<Action>` and the shim in `main.rs` turns each action into a host call.
//!
//! # Example
//!
//! ```rust
//! use zgallery::Action;
//!
//! let actions = vec![
//!     Action::ScheduleTimeout { generation: 0, seconds: 15 },
//!     Action::CloseFocus,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Performs an HTTP GET through the host.
    ///
    /// The result comes back later as a `WebRequestResult` event carrying the
    /// request's context map.
    Fetch(FetchRequest),

    /// Arms a host timer that bounds how long the fetch `generation` may run.
    ScheduleTimeout {
        /// Fetch the timer belongs to.
        generation: u64,
        /// Delay before the timer fires.
        seconds: u32,
    },

    /// Launches an external program with a URL, e.g. to view the full image.
    OpenExternal {
        /// Program to run (`xdg-open`, `open`, ...).
        program: String,
        /// URL passed as the only argument.
        url: String,
    },
}
