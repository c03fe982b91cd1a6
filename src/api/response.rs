//! Decoding search responses from the image API.

use crate::domain::{FetchError, ImageItem, SearchPage};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    alt_description: Option<String>,
    description: Option<String>,
    urls: PhotoUrls,
    user: Option<PhotoUser>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: Option<String>,
}

impl From<Photo> for ImageItem {
    fn from(photo: Photo) -> Self {
        let alt_text = photo
            .alt_description
            .filter(|alt| !alt.trim().is_empty())
            .or(photo.description)
            .unwrap_or_default();

        Self {
            id: photo.id,
            thumbnail_url: photo.urls.small,
            full_url: photo.urls.regular,
            alt_text,
            author: photo.user.and_then(|user| user.name),
            width: photo.width,
            height: photo.height,
        }
    }
}

/// Turns a host-reported HTTP result into a page of images.
///
/// # Errors
///
/// - [`FetchError::Status`] for any status outside `200..300`
/// - [`FetchError::Decode`] when the body is not a search result document
///
/// # Example
///
/// ```
/// use zgallery::api::decode_response;
///
/// let body = br#"{"total": 0, "total_pages": 0, "results": []}"#;
/// let page = decode_response(200, body).unwrap();
/// assert!(page.images.is_empty());
/// ```
pub fn decode_response(status: u16, body: &[u8]) -> Result<SearchPage, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { status });
    }

    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(SearchPage {
        images: response.results.into_iter().map(ImageItem::from).collect(),
        total_pages: response.total_pages,
    })
}
