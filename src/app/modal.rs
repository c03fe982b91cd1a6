//! Enlarged single-image view state.
//!
//! Independent of the search: opening or closing the modal never touches
//! [`SearchState`](super::SearchState), and a new search leaves an open modal
//! as it is.

/// Which image, if any, is shown enlarged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    is_open: bool,
    src: String,
    alt: String,
}

impl ModalState {
    /// Shows `src` enlarged with `alt` as its caption. No validation of `src`.
    pub fn open(&mut self, src: impl Into<String>, alt: impl Into<String>) {
        self.is_open = true;
        self.src = src.into();
        self.alt = alt.into();
        tracing::debug!(src = %self.src, "modal opened");
    }

    /// Hides the modal and forgets the image. Closing twice is a no-op.
    pub fn close(&mut self) {
        self.is_open = false;
        self.src.clear();
        self.alt.clear();
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_clears_fields() {
        let mut modal = ModalState::default();
        modal.open("url1", "cat");
        assert!(modal.is_open());
        assert_eq!(modal.src(), "url1");
        assert_eq!(modal.alt(), "cat");

        modal.close();
        assert!(!modal.is_open());
        assert_eq!(modal.src(), "");
        assert_eq!(modal.alt(), "");
    }

    #[test]
    fn close_is_idempotent() {
        let mut modal = ModalState::default();
        modal.close();
        assert_eq!(modal, ModalState::default());
        modal.close();
        assert_eq!(modal, ModalState::default());
    }

    #[test]
    fn reopening_replaces_the_image() {
        let mut modal = ModalState::default();
        modal.open("a", "first");
        modal.open("b", "second");
        assert_eq!(modal.src(), "b");
        assert_eq!(modal.alt(), "second");
    }
}
