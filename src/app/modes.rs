//! Input mode state for the application.
//!
//! The plugin is either collecting a query in the search bar or browsing the
//! gallery. The modal, when open, captures input regardless of mode; see
//! [`ModalState`](super::ModalState).

/// Current input handling mode.
///
/// Controls which keybindings are active and what the footer advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing into the search bar.
    ///
    /// Characters edit the query, Enter submits, Esc returns to the gallery.
    Typing,

    /// Navigating the gallery.
    ///
    /// Available keybindings: j/k (navigate), enter (view), m (load more),
    /// / (new search), q (quit).
    Browsing,
}
