//! The narrow store interface consumed by the core components.
//!
//! Components take the registry as an injected dependency so tests can
//! substitute a double instead of a process-wide singleton connection.
//! [`Database`] is the production implementation; every method delegates
//! to the corresponding inherent operation.

use chrono::{DateTime, Utc};

use crate::error::Result;

use super::connection::Database;
use super::models::{CategoryFavorite, CategoryPath, PathMap, ShareLink, StarPath, TrashEntry};

/// The relational-store operations the core depends on.
///
/// "Not found" is a normal, non-exceptional outcome throughout: lookups
/// return `Option` or empty vectors, deletes report affected row counts.
#[cfg_attr(test, mockall::automock)]
pub trait Registry {
    /// All imported roots for a user; empty for new users.
    fn find_path_maps(&self, user_id: &str) -> Result<Vec<PathMap>>;

    /// Create an imported root, returning the stored row.
    fn create_path_map<'a>(
        &mut self,
        user_id: &str,
        root_path: &str,
        description: Option<&'a str>,
    ) -> Result<PathMap>;

    /// Delete the user's imported roots matching an exact stored path.
    fn delete_path_maps_by_root(&mut self, user_id: &str, root_path: &str) -> Result<usize>;

    /// Batch-delete imported roots by id.
    fn delete_path_maps(&mut self, ids: &[i64]) -> Result<usize>;

    /// All favorite categories for a user, with nested favorites.
    fn find_category_paths(&self, user_id: &str) -> Result<Vec<CategoryPath>>;

    /// Create a favorite category.
    fn create_category_path(&mut self, user_id: &str, root_path: &str) -> Result<CategoryPath>;

    /// Attach a favorite beneath an existing category.
    fn create_category_favorite(
        &mut self,
        category_id: i64,
        root_path: &str,
    ) -> Result<CategoryFavorite>;

    /// All stars for a user.
    fn find_star_paths(&self, user_id: &str) -> Result<Vec<StarPath>>;

    /// Look up a star by exact virtual path.
    fn find_star(&self, user_id: &str, root_path: &str) -> Result<Option<StarPath>>;

    /// Create a star.
    fn create_star(&mut self, user_id: &str, root_path: &str) -> Result<StarPath>;

    /// Delete a star by id; false when no row matched.
    fn delete_star(&mut self, id: i64) -> Result<bool>;

    /// Rewrite the user's stars from one path prefix to another.
    fn repoint_stars(&mut self, user_id: &str, old_prefix: &str, new_prefix: &str)
        -> Result<usize>;

    /// All share links for a user.
    fn find_share_links(&self, user_id: &str) -> Result<Vec<ShareLink>>;

    /// Create a share link.
    fn create_share_link(
        &mut self,
        user_id: &str,
        root_path: &str,
        token: &str,
    ) -> Result<ShareLink>;

    /// Rewrite the user's share links from one path prefix to another.
    fn repoint_share_links(
        &mut self,
        user_id: &str,
        old_prefix: &str,
        new_prefix: &str,
    ) -> Result<usize>;

    /// Create a trash schedule row, returning it with its generated id.
    fn create_trash_entry(
        &mut self,
        user_id: &str,
        item: &str,
        return_path: &str,
        expire_date: DateTime<Utc>,
    ) -> Result<TrashEntry>;

    /// Look up a trash entry by id.
    fn find_trash_entry(&self, id: i64) -> Result<Option<TrashEntry>>;

    /// All trash entries for a user.
    fn find_trash_entries(&self, user_id: &str) -> Result<Vec<TrashEntry>>;

    /// The user's trash entries expired as of `now`.
    fn find_expired_trash_entries(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrashEntry>>;

    /// Delete a trash entry by id; false when no row matched.
    fn delete_trash_entry(&mut self, id: i64) -> Result<bool>;

    /// Batch-delete trash entries by id.
    fn delete_trash_entries(&mut self, ids: &[i64]) -> Result<usize>;
}

impl Registry for Database {
    fn find_path_maps(&self, user_id: &str) -> Result<Vec<PathMap>> {
        Self::find_path_maps(self, user_id)
    }

    fn create_path_map(
        &mut self,
        user_id: &str,
        root_path: &str,
        description: Option<&str>,
    ) -> Result<PathMap> {
        Self::create_path_map(self, user_id, root_path, description)
    }

    fn delete_path_maps_by_root(&mut self, user_id: &str, root_path: &str) -> Result<usize> {
        Self::delete_path_maps_by_root(self, user_id, root_path)
    }

    fn delete_path_maps(&mut self, ids: &[i64]) -> Result<usize> {
        Self::delete_path_maps(self, ids)
    }

    fn find_category_paths(&self, user_id: &str) -> Result<Vec<CategoryPath>> {
        Self::find_category_paths(self, user_id)
    }

    fn create_category_path(&mut self, user_id: &str, root_path: &str) -> Result<CategoryPath> {
        Self::create_category_path(self, user_id, root_path)
    }

    fn create_category_favorite(
        &mut self,
        category_id: i64,
        root_path: &str,
    ) -> Result<CategoryFavorite> {
        Self::create_category_favorite(self, category_id, root_path)
    }

    fn find_star_paths(&self, user_id: &str) -> Result<Vec<StarPath>> {
        Self::find_star_paths(self, user_id)
    }

    fn find_star(&self, user_id: &str, root_path: &str) -> Result<Option<StarPath>> {
        Self::find_star(self, user_id, root_path)
    }

    fn create_star(&mut self, user_id: &str, root_path: &str) -> Result<StarPath> {
        Self::create_star(self, user_id, root_path)
    }

    fn delete_star(&mut self, id: i64) -> Result<bool> {
        Self::delete_star(self, id)
    }

    fn repoint_stars(
        &mut self,
        user_id: &str,
        old_prefix: &str,
        new_prefix: &str,
    ) -> Result<usize> {
        Self::repoint_stars(self, user_id, old_prefix, new_prefix)
    }

    fn find_share_links(&self, user_id: &str) -> Result<Vec<ShareLink>> {
        Self::find_share_links(self, user_id)
    }

    fn create_share_link(
        &mut self,
        user_id: &str,
        root_path: &str,
        token: &str,
    ) -> Result<ShareLink> {
        Self::create_share_link(self, user_id, root_path, token)
    }

    fn repoint_share_links(
        &mut self,
        user_id: &str,
        old_prefix: &str,
        new_prefix: &str,
    ) -> Result<usize> {
        Self::repoint_share_links(self, user_id, old_prefix, new_prefix)
    }

    fn create_trash_entry(
        &mut self,
        user_id: &str,
        item: &str,
        return_path: &str,
        expire_date: DateTime<Utc>,
    ) -> Result<TrashEntry> {
        Self::create_trash_entry(self, user_id, item, return_path, expire_date)
    }

    fn find_trash_entry(&self, id: i64) -> Result<Option<TrashEntry>> {
        Self::find_trash_entry(self, id)
    }

    fn find_trash_entries(&self, user_id: &str) -> Result<Vec<TrashEntry>> {
        Self::find_trash_entries(self, user_id)
    }

    fn find_expired_trash_entries(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrashEntry>> {
        Self::find_expired_trash_entries(self, user_id, now)
    }

    fn delete_trash_entry(&mut self, id: i64) -> Result<bool> {
        Self::delete_trash_entry(self, id)
    }

    fn delete_trash_entries(&mut self, ids: &[i64]) -> Result<usize> {
        Self::delete_trash_entries(self, ids)
    }
}
