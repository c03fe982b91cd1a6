//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is reachable under `/host`, which
//! Zellij points at the directory it was started from (usually `$HOME`).

use std::path::PathBuf;

/// Sandbox root that stands in for the user's home directory.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's span files.
///
/// ```
/// use zgallery::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/zgallery")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("zgallery")
}

/// Expands a leading `~` to the sandbox root.
///
/// Only `~` and `~/...` are expanded; `~user` forms are returned unchanged
/// because other users' homes are not visible from the sandbox.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host_root() {
        assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
        assert_eq!(expand_tilde("~"), "/host");
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/etc/zgallery.toml"), "/etc/zgallery.toml");
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
        assert_eq!(expand_tilde("~alice/x.toml"), "~alice/x.toml");
    }
}
