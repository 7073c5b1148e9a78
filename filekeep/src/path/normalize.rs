//! Virtual path normalization functions.
//!
//! This module provides functionality to normalize user-supplied virtual
//! paths by:
//! - Replacing backslashes with forward slashes
//! - Collapsing repeated separators
//! - Resolving `.` and `..` segments (clamped at the virtual root)
//! - Ensuring exactly one leading `/`
//!
//! Normalization is total: every input string maps to a canonical virtual
//! path, and empty input maps to `/`. Drive-letter-prefixed input
//! (`C:/...`) passes through unchanged; downstream physical resolution
//! re-validates containment, so the passthrough is a compatibility quirk,
//! not a security hole.

/// Returns true when the string carries a Windows drive-letter prefix.
///
/// # Examples
///
/// ```
/// use filekeep::path::normalize::is_drive_prefixed;
///
/// assert!(is_drive_prefixed("C:/Users/me"));
/// assert!(!is_drive_prefixed("/Users/me"));
/// assert!(!is_drive_prefixed("C-drive/notes"));
/// ```
#[must_use]
pub fn is_drive_prefixed(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Normalize an arbitrary path string into canonical virtual form.
///
/// The result always starts with exactly one `/` (drive-prefixed input
/// excepted), contains no `.` or `..` segments, no repeated or trailing
/// separators, and is never empty. `..` segments that would climb above
/// the virtual root are clamped there instead of erroring, so the
/// function is total over all string inputs.
///
/// # Examples
///
/// ```
/// use filekeep::path::normalize::normalize;
///
/// assert_eq!(normalize("projects\\demo"), "/projects/demo");
/// assert_eq!(normalize("//a///b/"), "/a/b");
/// assert_eq!(normalize("/a/./b/../c"), "/a/c");
/// assert_eq!(normalize("/../.."), "/");
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("C:/Users/me"), "C:/Users/me");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let forward = trimmed.replace('\\', "/");
    if is_drive_prefixed(&forward) {
        // Windows passthrough case; re-validated downstream.
        return forward;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in forward.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // Clamp at the virtual root instead of escaping it.
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Strip a normalized root prefix from a normalized path, re-rooting the
/// remainder at `/`.
///
/// Both arguments must already be in canonical virtual form. The match is
/// separator-aware: `/data/root` is not a prefix of `/data/root-evil`.
/// Returns `None` when `path` is not equal to or nested under `prefix`.
/// Stripping the whole path yields `/`.
///
/// # Examples
///
/// ```
/// use filekeep::path::normalize::strip_root_prefix;
///
/// assert_eq!(strip_root_prefix("/data/a/b", "/data"), Some("/a/b".to_string()));
/// assert_eq!(strip_root_prefix("/data", "/data"), Some("/".to_string()));
/// assert_eq!(strip_root_prefix("/database", "/data"), None);
/// assert_eq!(strip_root_prefix("/a/b", "/"), Some("/a/b".to_string()));
/// ```
#[must_use]
pub fn strip_root_prefix(path: &str, prefix: &str) -> Option<String> {
    if prefix == "/" {
        return Some(path.to_string());
    }
    if path == prefix {
        return Some("/".to_string());
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        None
    }
}
