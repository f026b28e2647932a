//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, so any
//! path a user writes in their configuration has to be translated first.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// File name of the OTLP trace log inside [`data_dir`].
pub const TRACE_FILE_NAME: &str = "reposcope-otlp.json";

/// Returns the plugin's data directory.
///
/// Resolves to `~/.local/share/zellij/reposcope` on the host when Zellij
/// was started from the home directory.
///
/// ```
/// use reposcope::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/reposcope"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("reposcope")
}

/// Location of the rotating trace file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    data_dir().join(TRACE_FILE_NAME)
}

/// Expands a leading `~` to the sandbox host root.
///
/// ```
/// use reposcope::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~user/x"), "~user/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}
