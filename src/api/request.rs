//! Building search requests for the image API.
//!
//! The plugin cannot open sockets itself; it describes a request and the
//! Zellij host performs it with `web_request`. The description carries a
//! context map that the host echoes back with the result, which is how a
//! response finds its way back to the fetch generation that asked for it.

use crate::app::FetchCommand;
use crate::domain::{GalleryError, Result};
use crate::Config;
use std::collections::BTreeMap;
use url::Url;

/// Context key holding the fetch generation.
pub const CONTEXT_GENERATION: &str = "generation";
/// Context key holding the query, kept for logging.
pub const CONTEXT_QUERY: &str = "query";
/// Context key holding the page number, kept for logging.
pub const CONTEXT_PAGE: &str = "page";

/// A fully described HTTP GET for one result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Echoed back unchanged by the host alongside the response.
    pub context: BTreeMap<String, String>,
}

/// Connection settings for the Unsplash search endpoint.
#[derive(Clone)]
pub struct ImageApi {
    base_url: Url,
    access_key: String,
    per_page: u32,
}

impl ImageApi {
    /// Validates the configuration and prepares the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Config`] when `api_key` is missing or
    /// `api_url` is not an absolute URL.
    ///
    /// # Example
    ///
    /// ```
    /// use zgallery::{api::ImageApi, Config};
    ///
    /// let config = Config {
    ///     api_key: Some("abc".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(ImageApi::from_config(&config).is_ok());
    /// assert!(ImageApi::from_config(&Config::default()).is_err());
    /// ```
    pub fn from_config(config: &Config) -> Result<Self> {
        let access_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GalleryError::Config("api_key is not set in the plugin configuration".to_string())
            })?
            .to_string();

        let base_url = Url::parse(&config.api_url)
            .map_err(|e| GalleryError::Config(format!("invalid api_url '{}': {e}", config.api_url)))?;

        Ok(Self {
            base_url,
            access_key,
            per_page: config.per_page,
        })
    }

    /// Describes the GET request for the page named by `command`.
    #[must_use]
    pub fn request(&self, command: &FetchCommand) -> FetchRequest {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("query", &command.query)
            .append_pair("page", &command.page.to_string())
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("orientation", "landscape");

        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Client-ID {}", self.access_key),
        );
        headers.insert("Accept-Version".to_string(), "v1".to_string());

        let mut context = BTreeMap::new();
        context.insert(CONTEXT_GENERATION.to_string(), command.generation.to_string());
        context.insert(CONTEXT_QUERY.to_string(), command.query.clone());
        context.insert(CONTEXT_PAGE.to_string(), command.page.to_string());

        FetchRequest {
            url: url.into(),
            headers,
            context,
        }
    }
}

impl std::fmt::Debug for ImageApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageApi")
            .field("base_url", &self.base_url.as_str())
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

/// Recovers the fetch generation from a context map echoed by the host.
#[must_use]
pub fn generation_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    context
        .get(CONTEXT_GENERATION)
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ImageApi {
        let config = Config {
            api_key: Some(" secret ".to_string()),
            per_page: 12,
            ..Default::default()
        };
        ImageApi::from_config(&config).unwrap()
    }

    fn command() -> FetchCommand {
        FetchCommand {
            query: "red fox".to_string(),
            page: 2,
            generation: 7,
        }
    }

    #[test]
    fn url_carries_query_and_pagination() {
        let request = api().request(&command());
        let url = Url::parse(&request.url).unwrap();
        let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("api.unsplash.com"));
        assert_eq!(url.path(), "/search/photos");
        assert_eq!(pairs.get("query").map(String::as_str), Some("red fox"));
        assert_eq!(pairs.get("page").map(String::as_str), Some("2"));
        assert_eq!(pairs.get("per_page").map(String::as_str), Some("12"));
    }

    #[test]
    fn access_key_goes_in_the_header_trimmed() {
        let request = api().request(&command());
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Client-ID secret")
        );
        assert!(!request.url.contains("secret"));
    }

    #[test]
    fn context_round_trips_the_generation() {
        let request = api().request(&command());
        assert_eq!(generation_from_context(&request.context), Some(7));
        assert_eq!(request.context.get(CONTEXT_PAGE).map(String::as_str), Some("2"));
    }

    #[test]
    fn garbage_context_has_no_generation() {
        let mut context = BTreeMap::new();
        assert_eq!(generation_from_context(&context), None);
        context.insert(CONTEXT_GENERATION.to_string(), "seven".to_string());
        assert_eq!(generation_from_context(&context), None);
    }

    #[test]
    fn missing_or_blank_key_is_a_config_error() {
        let blank = Config {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(ImageApi::from_config(&blank), Err(GalleryError::Config(_))));
        assert!(matches!(
            ImageApi::from_config(&Config::default()),
            Err(GalleryError::Config(_))
        ));
    }

    #[test]
    fn relative_api_url_is_rejected() {
        let config = Config {
            api_key: Some("k".to_string()),
            api_url: "search/photos".to_string(),
            ..Default::default()
        };
        assert!(matches!(ImageApi::from_config(&config), Err(GalleryError::Config(_))));
    }

    #[test]
    fn debug_output_hides_the_key() {
        assert!(!format!("{:?}", api()).contains("secret"));
    }
}
