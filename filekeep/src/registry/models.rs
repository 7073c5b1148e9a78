//! Row types for the registry store.
//!
//! These are plain records mirroring the registry tables. The core never
//! owns them outright; it creates, updates, and deletes rows only as a
//! side effect of a corresponding filesystem action.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An imported root directory a user is authorized to browse.
///
/// `root_path` is stored in canonical virtual form and points at a
/// location under the shared physical storage root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMap {
    /// Row id.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Canonical virtual root path.
    pub root_path: String,
    /// Optional display name.
    pub description: Option<String>,
}

/// A user-defined favorite folder grouping, rooted in the user's
/// internal tree, with nested favorite rows layered beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPath {
    /// Row id.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Canonical virtual root path of the category folder.
    pub root_path: String,
    /// Favorite paths grouped under this category.
    pub favorites: Vec<CategoryFavorite>,
}

/// A favorite path attached beneath a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFavorite {
    /// Row id.
    pub id: i64,
    /// Canonical virtual path of the favorite.
    pub root_path: String,
}

/// A star toggle keyed by the exact virtual path string.
///
/// Stars must be repointed whenever the underlying file is moved or
/// renamed, or they silently orphan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarPath {
    /// Row id.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Canonical virtual path of the starred entry.
    pub root_path: String,
}

/// A share handle pointing at a virtual path; repointed on move exactly
/// like stars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    /// Row id.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Canonical virtual path of the shared entry.
    pub root_path: String,
    /// Opaque share token handed out by the web layer.
    pub token: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A soft-delete schedule row.
///
/// Created atomically with the physical move to trash; the trashed file
/// on disk is renamed `"<item>_id<id>"` so the row id is recoverable
/// from the filename alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrashEntry {
    /// Row id, embedded in the trashed filename.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Original basename of the deleted item.
    pub item: String,
    /// Original physical path, used for restore.
    pub return_path: String,
    /// Instant after which the item is sweep-eligible.
    pub expire_date: DateTime<Utc>,
}

impl TrashEntry {
    /// The on-disk name of the trashed item (`<item>_id<id>`).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use filekeep::registry::TrashEntry;
    ///
    /// let entry = TrashEntry {
    ///     id: 7,
    ///     user_id: "u1".to_string(),
    ///     item: "report.txt".to_string(),
    ///     return_path: "/srv/files/docs/report.txt".to_string(),
    ///     expire_date: Utc::now(),
    /// };
    /// assert_eq!(entry.trashed_name(), "report.txt_id7");
    /// ```
    #[must_use]
    pub fn trashed_name(&self) -> String {
        format!("{}_id{}", self.item, self.id)
    }
}
