//! Paths inside the Zellij plugin sandbox, where the host filesystem is
//! mounted under `/host`.

use std::path::PathBuf;

/// Directory holding the plugin's trace files:
/// `/host/.local/share/zellij/bookdesk`.
///
/// `/host` maps to the directory Zellij was started from, which is usually
/// the user's home.
///
/// ```
/// use bookdesk::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/bookdesk"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookdesk")
}

/// Maps `~` and `~/...` onto the `/host` mount. Other paths pass through.
///
/// ```
/// use bookdesk::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~other/theme.toml"), "~other/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
