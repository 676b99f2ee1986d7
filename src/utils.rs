//! Utility functions.

use std::path::PathBuf;

/// Name of the configuration file looked up next to the working directory and executable.
pub const CONFIG_FILE_NAME: &str = "thor.toml";

/// Longest prefix of `s` that fits in `max` bytes without splitting a UTF-8 character.
pub fn truncate_at_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Parse a repeat count typed at a prompt. Only plain decimal digits are accepted.
pub fn parse_count(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Get the default configuration file locations, in lookup order.
///
/// Returns:
/// - `thor.toml` in the current working directory
/// - `thor.toml` next to the executable
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CONFIG_FILE_NAME));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }
    }

    paths
}
