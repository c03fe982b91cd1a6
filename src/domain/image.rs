//! Image result model.
//!
//! [`ImageItem`] is what the gallery shows and the modal enlarges. The search
//! orchestrator treats it as opaque: items are only appended and passed
//! through. [`SearchPage`] is one page of results as reported by the API.

use serde::{Deserialize, Serialize};

/// A single image returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Provider identifier for the photo.
    pub id: String,
    /// Small rendition shown in the gallery.
    pub thumbnail_url: String,
    /// Large rendition shown in the modal and opened externally.
    pub full_url: String,
    /// Accessible description; may be empty.
    pub alt_text: String,
    /// Photographer name, when the API provides one.
    pub author: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl ImageItem {
    /// Creates an item with only the fields the orchestrator cares about.
    ///
    /// # Examples
    ///
    /// ```
    /// use zgallery::ImageItem;
    ///
    /// let item = ImageItem::new("thumb.jpg", "full.jpg", "a cat");
    /// assert_eq!(item.alt_text, "a cat");
    /// assert!(item.author.is_none());
    /// ```
    #[must_use]
    pub fn new(
        thumbnail_url: impl Into<String>,
        full_url: impl Into<String>,
        alt_text: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            thumbnail_url: thumbnail_url.into(),
            full_url: full_url.into(),
            alt_text: alt_text.into(),
            author: None,
            width: 0,
            height: 0,
        }
    }

    /// Label used in lists: the alt text, or a placeholder when it is blank.
    #[must_use]
    pub fn label(&self) -> &str {
        let trimmed = self.alt_text.trim();
        if trimmed.is_empty() {
            "(untitled)"
        } else {
            trimmed
        }
    }

    /// Pixel dimensions as `WxH`, or `None` when the API did not report them.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        (self.width > 0 && self.height > 0).then(|| format!("{}x{}", self.width, self.height))
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Images on this page, in API order.
    pub images: Vec<ImageItem>,
    /// Total number of pages the API reports for the query.
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_for_blank_alt_text() {
        assert_eq!(ImageItem::new("t", "f", "  ").label(), "(untitled)");
        assert_eq!(ImageItem::new("t", "f", " red fox ").label(), "red fox");
    }

    #[test]
    fn dimensions_require_both_sides() {
        let mut item = ImageItem::new("t", "f", "x");
        assert_eq!(item.dimensions(), None);
        item.width = 4000;
        assert_eq!(item.dimensions(), None);
        item.height = 3000;
        assert_eq!(item.dimensions().as_deref(), Some("4000x3000"));
    }
}
