//! Core types for virtual and physical path handling.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::path::normalize::{normalize, strip_root_prefix};
use crate::path::relationship::PathRelationship;

/// The virtual path under which every user's trash folder is addressed.
pub const TRASH_ROOT: &str = "/trash";

/// A user-facing path in canonical virtual form.
///
/// A virtual path is rooted (`/a/b`), free of `.`/`..` segments and
/// repeated separators, and never empty. It does not correspond to any
/// physical location until it is authorized and resolved.
///
/// # Examples
///
/// ```
/// use filekeep::path::VirtualPath;
///
/// let path = VirtualPath::parse("projects\\demo\\..\\report.txt");
/// assert_eq!(path.as_str(), "/projects/report.txt");
/// assert_eq!(path.name(), "report.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VirtualPath(String);

impl VirtualPath {
    /// Parse arbitrary user input into a canonical virtual path.
    ///
    /// This is total: every string maps to a valid virtual path, and
    /// empty input maps to the virtual root `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::path::VirtualPath;
    ///
    /// assert_eq!(VirtualPath::parse("").as_str(), "/");
    /// assert_eq!(VirtualPath::parse("//a//b/").as_str(), "/a/b");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the virtual root `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The final segment, or the empty string for the virtual root.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::path::VirtualPath;
    ///
    /// assert_eq!(VirtualPath::parse("/a/b.txt").name(), "b.txt");
    /// assert_eq!(VirtualPath::parse("/").name(), "");
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// The parent path, or `None` for the virtual root.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::path::VirtualPath;
    ///
    /// let path = VirtualPath::parse("/a/b/c");
    /// assert_eq!(path.parent().unwrap().as_str(), "/a/b");
    /// assert!(VirtualPath::parse("/").parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self("/".to_string())),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Join a child segment or relative fragment onto this path.
    ///
    /// The result is re-normalized, so separators and dot segments in the
    /// fragment are handled the same way as in [`VirtualPath::parse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::path::VirtualPath;
    ///
    /// let base = VirtualPath::parse("/docs");
    /// assert_eq!(base.join("a.txt").as_str(), "/docs/a.txt");
    /// assert_eq!(VirtualPath::parse("/").join("x").as_str(), "/x");
    /// ```
    #[must_use]
    pub fn join(&self, fragment: &str) -> Self {
        Self(normalize(&format!("{}/{}", self.0, fragment)))
    }

    /// Whether this path is the trash root or lies beneath it.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::path::VirtualPath;
    ///
    /// assert!(VirtualPath::parse("/trash").in_trash());
    /// assert!(VirtualPath::parse("/trash/old.txt").in_trash());
    /// assert!(!VirtualPath::parse("/trashcan").in_trash());
    /// ```
    #[must_use]
    pub fn in_trash(&self) -> bool {
        PathRelationship::contains(TRASH_ROOT, &self.0)
    }

    /// Strip a prefix path, re-rooting the remainder at `/`.
    ///
    /// Separator-aware; returns `None` when this path is not equal to or
    /// nested under `prefix`. Stripping the whole path yields `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::path::VirtualPath;
    ///
    /// let path = VirtualPath::parse("/data/docs/a.txt");
    /// let prefix = VirtualPath::parse("/data");
    /// assert_eq!(path.strip_prefix(&prefix).unwrap().as_str(), "/docs/a.txt");
    /// ```
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Self) -> Option<Self> {
        strip_root_prefix(&self.0, &prefix.0).map(Self)
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VirtualPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<VirtualPath> for String {
    fn from(path: VirtualPath) -> Self {
        path.0
    }
}

/// An absolute physical path that passed the containment check against
/// its configured root.
///
/// Instances are only produced by [`crate::path::resolve_under`], so
/// holding one proves the path does not escape the root it was resolved
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    physical: PathBuf,
    root: PathBuf,
}

impl ResolvedPath {
    pub(crate) fn new(physical: PathBuf, root: PathBuf) -> Self {
        Self { physical, root }
    }

    /// The validated absolute physical path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.physical
    }

    /// The configured root this path was validated against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The final path component, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.physical.file_name()
    }

    /// Whether the physical path currently exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.physical.exists()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.physical
    }
}
