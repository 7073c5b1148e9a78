//! Safe resolution of virtual path suffixes against physical roots.
//!
//! This module is the last line of defense against path traversal. It
//! joins an untrusted suffix onto a configured root and refuses any
//! result that escapes the root. It knows nothing about users or the
//! database; callers re-invoke it even after authorization approved a
//! path, because authorization and physical containment are independent
//! concerns.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{Error, Result};
use crate::path::types::ResolvedPath;

/// Resolve an untrusted suffix under a configured root.
///
/// Leading separators are stripped from the suffix, `.` and `..`
/// segments are resolved lexically, and a `..` chain that would climb
/// past the join point is refused outright rather than partially
/// resolved. When the root or the candidate exists on disk, symlinks are
/// followed before the final containment check, so a link pointing
/// outside the root is also refused.
///
/// # Errors
///
/// Returns [`Error::AccessDenied`] when the suffix contains a NUL byte,
/// climbs out of the root, or resolves (including through symlinks) to a
/// location outside the root. I/O failures other than "not found" during
/// symlink resolution surface as [`Error::Io`].
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use filekeep::path::resolve_under;
///
/// let ok = resolve_under(Path::new("/data/root"), "/projects/a.txt").unwrap();
/// assert_eq!(ok.as_path(), Path::new("/data/root/projects/a.txt"));
///
/// // Sibling escape via a parent chain is refused.
/// assert!(resolve_under(Path::new("/data/root"), "../root-evil/x").is_err());
/// ```
pub fn resolve_under(root: &Path, suffix: &str) -> Result<ResolvedPath> {
    if suffix.contains('\0') {
        return Err(Error::denied(suffix.replace('\0', "\\0"), "path contains a NUL byte"));
    }

    let trimmed = suffix.trim_start_matches(['/', '\\']);

    let mut segments: Vec<&str> = Vec::new();
    for segment in trimmed.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::denied(suffix, "path escapes the configured root"));
                }
            }
            other => segments.push(other),
        }
    }

    let mut candidate = root.to_path_buf();
    for segment in &segments {
        candidate.push(segment);
    }

    let real_root = existing_canonical(root)?.unwrap_or_else(|| root.to_path_buf());
    let real_candidate = existing_canonical(&candidate)?.unwrap_or(candidate);

    if !contains_path(&real_root, &real_candidate) {
        return Err(Error::denied(suffix, "resolved outside the configured root"));
    }

    Ok(ResolvedPath::new(real_candidate, real_root))
}

/// The separator-aware physical containment check.
///
/// The candidate must equal the root exactly or start with the root plus
/// the platform separator. A bare string-prefix comparison without the
/// separator would accept `/data/root-evil` against `/data/root`, which
/// is exactly the bug class this function exists to exclude.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use filekeep::path::contains_path;
///
/// assert!(contains_path(Path::new("/data/root"), Path::new("/data/root/x")));
/// assert!(contains_path(Path::new("/data/root"), Path::new("/data/root")));
/// assert!(!contains_path(Path::new("/data/root"), Path::new("/data/root-evil/x")));
/// ```
#[must_use]
pub fn contains_path(root: &Path, candidate: &Path) -> bool {
    if candidate == root {
        return true;
    }

    let root_str = root.to_string_lossy();
    let candidate_str = candidate.to_string_lossy();

    let with_separator = if root_str.ends_with(MAIN_SEPARATOR) {
        root_str.into_owned()
    } else {
        format!("{root_str}{MAIN_SEPARATOR}")
    };

    candidate_str.starts_with(&with_separator)
}

/// Canonicalize a path when it exists; `Ok(None)` when it does not.
fn existing_canonical(path: &Path) -> Result<Option<PathBuf>> {
    match path.canonicalize() {
        Ok(canonical) => Ok(Some(canonical)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
