//! zgallery: a Zellij plugin for searching and browsing stock photos.
//!
//! Type a query, get a paginated gallery of matching images from the Unsplash
//! search API, load more pages on demand, and open any image in an enlarged
//! view or in the system browser.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, host calls, web_request results     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Search orchestration (query, page, generations)  │
//! │  - Modal state                                      │
//! │  - Event handling → actions                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ API Layer     │
//! │ (ui/)         │                     │ (api/)        │
//! │ - Rendering   │                     │ - Request URL │
//! │ - Theming     │                     │ - JSON decode │
//! └───────────────┘                     └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - ImageItem, SearchPage, errors (domain/)          │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing → OpenTelemetry → JSON-lines span file   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zgallery.wasm" {
//!         api_key "YOUR_UNSPLASH_ACCESS_KEY"
//!         per_page "12"
//!         request_timeout "15"
//!         opener "xdg-open"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use zgallery::{handle_event, initialize, Action, Config, Event};
//!
//! let mut map = BTreeMap::new();
//! map.insert("api_key".to_string(), "demo-key".to_string());
//! let mut state = initialize(&Config::from_zellij(&map));
//!
//! for c in "tigers".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::SubmitQuery)?;
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), zgallery::GalleryError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{FetchError, GalleryError, ImageItem, Result, SearchPage};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default search endpoint.
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com/search/photos";

/// Default page size; the same as the web gallery this plugin mirrors.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Largest page size the search API accepts.
pub const MAX_PER_PAGE: u32 = 30;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Clone)]
pub struct Config {
    /// Unsplash access key. Searching is disabled without it.
    pub api_key: Option<String>,

    /// Search endpoint. Default: [`DEFAULT_API_URL`]
    pub api_url: String,

    /// Images per page, clamped to `1..=30`. Default: 12
    pub per_page: u32,

    /// Seconds before an unanswered fetch is treated as failed. Default: 15
    pub request_timeout_secs: u32,

    /// Program that opens an image URL outside the terminal.
    /// Default: `xdg-open`
    pub opener: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` means the sandbox home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            request_timeout_secs: app::state::DEFAULT_REQUEST_TIMEOUT_SECS,
            opener: app::state::DEFAULT_OPENER.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("per_page", &self.per_page)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("opener", &self.opener)
            .field("theme_name", &self.theme_name)
            .field("theme_file", &self.theme_file)
            .field("trace_level", &self.trace_level)
            .finish()
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparsable numbers fall back to their defaults; blank strings count
    /// as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zgallery::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc".to_string());
    /// map.insert("per_page".to_string(), "100".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc"));
    /// assert_eq!(config.per_page, 30);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let per_page = text("per_page")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.per_page)
            .clamp(1, MAX_PER_PAGE);

        let request_timeout_secs = text("request_timeout")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            api_key: text("api_key"),
            api_url: text("api_url").unwrap_or(defaults.api_url),
            per_page,
            request_timeout_secs,
            opener: text("opener").unwrap_or(defaults.opener),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Checks that searching is possible with this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Config`] when `api_key` is missing or
    /// `api_url` is not a valid URL.
    pub fn validate(&self) -> Result<()> {
        api::ImageApi::from_config(self).map(|_| ())
    }
}

/// Builds the initial application state from configuration.
///
/// Theme resolution: `theme_file`, then `theme`, then the default; a theme
/// that fails to load falls back to the default. An unusable API
/// configuration leaves the plugin running with searching disabled and the
/// reason shown as a notice.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(?config, "initializing zgallery");

    let mut state = AppState::new(load_theme(config));
    state.request_timeout_secs = config.request_timeout_secs;
    state.opener.clone_from(&config.opener);

    match api::ImageApi::from_config(config) {
        Ok(api) => state.api = Some(api),
        Err(e) => {
            tracing::warn!(error = %e, "image search disabled");
            state.notice = Some(e.to_string());
        }
    }

    state
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config
        .theme_name
        .as_deref()
        .map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());

        assert_eq!(config.api_key, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.per_page, 12);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.opener, "xdg-open");
        assert!(config.validate().is_err());
    }

    #[test]
    fn values_are_parsed_and_clamped() {
        let config = Config::from_zellij(&map(&[
            ("api_key", " abc "),
            ("per_page", "0"),
            ("request_timeout", "30"),
            ("opener", "open"),
            ("theme", "catppuccin-latte"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.per_page, 1);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.opener, "open");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("per_page", "lots"),
            ("request_timeout", "0"),
            ("api_key", "   "),
        ]));

        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config::from_zellij(&map(&[("api_key", "super-secret")]));
        let debug = format!("{config:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn initialize_without_key_disables_search() {
        let state = initialize(&Config::default());

        assert!(state.api.is_none());
        assert!(state.notice.as_deref().is_some_and(|n| n.contains("api_key")));
    }

    #[test]
    fn initialize_applies_settings() {
        let state = initialize(&Config::from_zellij(&map(&[
            ("api_key", "abc"),
            ("request_timeout", "7"),
            ("opener", "open"),
            ("theme", "catppuccin-frappe"),
        ])));

        assert!(state.api.is_some());
        assert!(state.notice.is_none());
        assert_eq!(state.request_timeout_secs, 7);
        assert_eq!(state.opener, "open");
        assert_eq!(state.theme.name, "catppuccin-frappe");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let state = initialize(&Config {
            theme_name: Some("neon".to_string()),
            ..Default::default()
        });
        assert_eq!(state.theme, Theme::default());
    }
}
