//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavours, compiled in from
//! `themes/*.toml`. Custom themes use the same TOML layout and are loaded
//! from the path in the `theme_file` configuration key.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! banner_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! loading_fg = "#a6e3a1"
//! notice_fg = "#fab387"
//! modal_border = "#cba6f7"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{GalleryError, Result};

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, column headers, secondary info.
    pub text_dim: String,

    /// Border and separator lines.
    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Ready and no-results banners.
    pub banner_fg: String,
    /// The failure banner.
    pub error_fg: String,
    /// Loading indicator.
    pub loading_fg: String,
    /// Transient notices.
    pub notice_fg: String,
    pub modal_border: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` for an unknown name.
    ///
    /// ```rust
    /// use zgallery::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Theme`] if the file cannot be read or its
    /// content does not parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GalleryError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| GalleryError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Converts a hex color to an RGB tuple; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape, `\x1b[38;2;r;g;bm`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape, `\x1b[48;2;r;g;bm`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Catppuccin Mocha, kept in code so `Default` cannot fail.
    fn mocha() -> Self {
        let hex = |s: &str| s.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: hex("#cdd6f4"),
                header_bg: None,
                selection_fg: hex("#1e1e2e"),
                selection_bg: hex("#f5c2e7"),
                text_normal: hex("#cdd6f4"),
                text_dim: hex("#6c7086"),
                border: hex("#45475a"),
                search_bar_border: hex("#f5c2e7"),
                match_highlight_fg: hex("#1e1e2e"),
                match_highlight_bg: hex("#f9e2af"),
                banner_fg: hex("#89b4fa"),
                error_fg: hex("#f38ba8"),
                loading_fg: hex("#a6e3a1"),
                notice_fg: hex("#fab387"),
                modal_border: hex("#cba6f7"),
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::mocha()
    }
}
