//! Path expansion and escaping for window roots.
//!
//! Config files use `~/` for the home directory, which nothing between us
//! and tmux would expand. Paths handed to tmux also have their spaces
//! escaped for the shell tmux starts in the new pane.
//!
//! # Example
//!
//! ```
//! use muxsmith::path::{escape, expand};
//!
//! let root = expand("~/src/my project", "/home/u/");
//! assert_eq!(root, "/home/u/src/my project");
//! assert_eq!(escape(&root), "/home/u/src/my\\ project");
//! ```

use std::path::Path;

/// Replace a leading `~/` with `home`.
///
/// Anything else, including `~user/` forms, is returned unchanged.
///
/// # Examples
///
/// ```
/// use muxsmith::path::expand;
///
/// assert_eq!(expand("~/x", "/home/u/"), "/home/u/x");
/// assert_eq!(expand("~/x", "/home/u"), "/home/u/x");
/// assert_eq!(expand("/abs/x", "/home/u/"), "/abs/x");
/// ```
pub fn expand(path: &str, home: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) if home.ends_with('/') => format!("{}{}", home, rest),
        Some(rest) => format!("{}/{}", home, rest),
        None => path.to_string(),
    }
}

/// Escape spaces with a backslash.
///
/// No other characters are touched.
///
/// ```
/// use muxsmith::path::escape;
///
/// assert_eq!(escape("a b/c"), "a\\ b/c");
/// ```
pub fn escape(path: &str) -> String {
    path.replace(' ', "\\ ")
}

/// Expand `path` and make it absolute against the current directory.
///
/// Falls back to the expanded path if the current directory is unavailable.
pub fn resolve(path: &str, home: &str) -> String {
    let expanded = expand(path, home);
    if Path::new(&expanded).is_absolute() {
        return expanded;
    }
    match std::path::absolute(&expanded) {
        Ok(abs) => abs.to_string_lossy().into_owned(),
        Err(err) => {
            tracing::debug!(path = %expanded, error = %err, "could not absolutize path");
            expanded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        assert_eq!(expand("~/x", "/home/u/"), "/home/u/x");
        assert_eq!(expand("/abs/x", "/home/u/"), "/abs/x");
        assert_eq!(expand("~other/x", "/home/u/"), "~other/x");
        assert_eq!(expand("a/~/b", "/home/u/"), "a/~/b");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a b/c"), "a\\ b/c");
        assert_eq!(escape("two  spaces"), "two\\ \\ spaces");
        assert_eq!(escape("it's;$x"), "it's;$x");
    }

    #[test]
    fn test_resolve_absolutizes_relative() {
        assert_eq!(resolve("~/proj", "/home/u/"), "/home/u/proj");
        let resolved = resolve("proj", "/home/u/");
        assert!(Path::new(&resolved).is_absolute());
        assert!(resolved.ends_with("proj"));
    }
}
