//! Error types for the zgallery plugin.
//!
//! Two error families live here:
//!
//! - [`GalleryError`]: failures of the plugin itself (configuration, themes,
//!   I/O, building requests). These propagate with `?` through [`Result`].
//! - [`FetchError`]: the outcome of a failed image fetch. These never
//!   propagate; the search orchestrator turns them into UI state.

use thiserror::Error;

/// The main error type for zgallery plugin operations.
///
/// # Examples
///
/// ```
/// use zgallery::GalleryError;
///
/// fn require_key(key: &str) -> Result<(), GalleryError> {
///     if key.is_empty() {
///         return Err(GalleryError::Config("api_key is not set".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(require_key("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem, e.g. a
    /// missing `api_key`.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The search request could not be built (bad base URL, etc.).
    #[error("Request error: {0}")]
    Request(String),
}

/// Why a fetch for one result page failed.
///
/// The user only ever sees one generic message for all variants; the kind is
/// kept for logging and for tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The image API answered with a non-success HTTP status.
    #[error("image API returned HTTP {status}")]
    Status {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The response body was not a valid search result document.
    #[error("malformed search response: {0}")]
    Decode(String),

    /// No response arrived before the configured deadline.
    #[error("image request timed out")]
    Timeout,
}

/// A specialized `Result` type for zgallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages_name_the_cause() {
        assert_eq!(
            FetchError::Status { status: 503 }.to_string(),
            "image API returned HTTP 503"
        );
        assert_eq!(FetchError::Timeout.to_string(), "image request timed out");
    }

    #[test]
    fn io_errors_convert_into_gallery_errors() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(open(), Err(GalleryError::Io(_))));
    }
}
