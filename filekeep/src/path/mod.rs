//! Virtual and physical path handling.
//!
//! This module provides the two halves of path safety in filekeep:
//!
//! # Virtual paths
//!
//! User-facing paths (`/projects/x`) are normalized into a canonical,
//! rooted form by [`VirtualPath::parse`]. Normalization is total over all
//! string input; it replaces backslashes, collapses separators, resolves
//! dot segments, and never fails.
//!
//! # Physical resolution
//!
//! A canonical virtual path only becomes a filesystem location through
//! [`resolve_under`], which joins a suffix onto a configured root and
//! enforces the separator-aware containment check. The resolver is
//! deliberately ignorant of users and the database so that it can act as
//! the final guard even after authorization has approved a path.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use filekeep::path::{resolve_under, VirtualPath};
//!
//! let virtual_path = VirtualPath::parse("docs\\notes.txt");
//! assert_eq!(virtual_path.as_str(), "/docs/notes.txt");
//!
//! let physical = resolve_under(Path::new("/srv/files"), virtual_path.as_str()).unwrap();
//! assert_eq!(physical.as_path(), Path::new("/srv/files/docs/notes.txt"));
//! ```

pub mod normalize;
pub mod relationship;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use relationship::PathRelationship;
pub use resolver::{contains_path, resolve_under};
pub use types::{ResolvedPath, VirtualPath, TRASH_ROOT};
