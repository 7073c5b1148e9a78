//! Registry CRUD operations.
//!
//! This module implements the single-row create, read, and delete
//! operations for path maps, categories, stars, share links, and trash
//! entries. Batch and prefix-rewrite operations live in the transaction
//! module. "Not found" is a normal outcome everywhere: lookups return
//! `Option` or empty vectors, deletes return whether a row was affected.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};

use super::connection::Database;
use super::models::{CategoryFavorite, CategoryPath, PathMap, ShareLink, StarPath, TrashEntry};

/// Converts a `DateTime<Utc>` to Unix epoch seconds for database storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a `DateTime<Utc>`.
///
/// # Errors
///
/// Returns an error if the stored seconds are outside the representable
/// range.
pub(super) fn unix_secs_to_datetime(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::Validation {
        field: "timestamp".into(),
        message: format!("Invalid stored timestamp: {secs}"),
    })
}

/// Deserializes a path map from a row ordered (id, `user_id`, `root_path`, description).
fn row_to_path_map(row: &Row<'_>) -> rusqlite::Result<PathMap> {
    Ok(PathMap {
        id: row.get(0)?,
        user_id: row.get(1)?,
        root_path: row.get(2)?,
        description: row.get(3)?,
    })
}

/// Deserializes a star from a row ordered (id, `user_id`, `root_path`).
fn row_to_star(row: &Row<'_>) -> rusqlite::Result<StarPath> {
    Ok(StarPath {
        id: row.get(0)?,
        user_id: row.get(1)?,
        root_path: row.get(2)?,
    })
}

/// Deserializes a trash entry from a row ordered
/// (id, `user_id`, item, `return_path`, `expire_date`).
fn row_to_trash_entry(row: &Row<'_>) -> rusqlite::Result<TrashEntry> {
    let secs: i64 = row.get(4)?;
    Ok(TrashEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        item: row.get(2)?,
        return_path: row.get(3)?,
        expire_date: unix_secs_to_datetime(secs)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?,
    })
}

// SQL statements for CRUD operations

const SELECT_PATH_MAPS_BY_USER: &str = r"
    SELECT id, user_id, root_path, description
    FROM path_maps
    WHERE user_id = ?
    ORDER BY id
";

const INSERT_PATH_MAP: &str = r"
    INSERT INTO path_maps (user_id, root_path, description)
    VALUES (?, ?, ?)
";

const DELETE_PATH_MAPS_BY_ROOT: &str = r"
    DELETE FROM path_maps
    WHERE user_id = ? AND root_path = ?
";

const SELECT_CATEGORY_PATHS_BY_USER: &str = r"
    SELECT id, user_id, root_path
    FROM category_paths
    WHERE user_id = ?
    ORDER BY id
";

const SELECT_FAVORITES_BY_CATEGORY: &str = r"
    SELECT id, root_path
    FROM category_favorites
    WHERE category_id = ?
    ORDER BY id
";

const INSERT_CATEGORY_PATH: &str = r"
    INSERT INTO category_paths (user_id, root_path)
    VALUES (?, ?)
";

const INSERT_CATEGORY_FAVORITE: &str = r"
    INSERT INTO category_favorites (category_id, root_path)
    VALUES (?, ?)
";

const SELECT_STARS_BY_USER: &str = r"
    SELECT id, user_id, root_path
    FROM star_paths
    WHERE user_id = ?
    ORDER BY id
";

const SELECT_STAR: &str = r"
    SELECT id, user_id, root_path
    FROM star_paths
    WHERE user_id = ? AND root_path = ?
";

const INSERT_STAR: &str = r"
    INSERT INTO star_paths (user_id, root_path)
    VALUES (?, ?)
";

const DELETE_STAR: &str = "DELETE FROM star_paths WHERE id = ?";

const SELECT_SHARE_LINKS_BY_USER: &str = r"
    SELECT id, user_id, root_path, token, created_at
    FROM share_links
    WHERE user_id = ?
    ORDER BY id
";

const INSERT_SHARE_LINK: &str = r"
    INSERT INTO share_links (user_id, root_path, token, created_at)
    VALUES (?, ?, ?, ?)
";

const INSERT_TRASH_ENTRY: &str = r"
    INSERT INTO trash_entries (user_id, item, return_path, expire_date)
    VALUES (?, ?, ?, ?)
";

const SELECT_TRASH_ENTRY: &str = r"
    SELECT id, user_id, item, return_path, expire_date
    FROM trash_entries
    WHERE id = ?
";

const SELECT_TRASH_ENTRIES_BY_USER: &str = r"
    SELECT id, user_id, item, return_path, expire_date
    FROM trash_entries
    WHERE user_id = ?
    ORDER BY id
";

const SELECT_EXPIRED_TRASH_ENTRIES: &str = r"
    SELECT id, user_id, item, return_path, expire_date
    FROM trash_entries
    WHERE user_id = ? AND expire_date <= ?
    ORDER BY expire_date
";

const DELETE_TRASH_ENTRY: &str = "DELETE FROM trash_entries WHERE id = ?";

impl Database {
    /// Returns all imported roots for a user, oldest first.
    ///
    /// An empty list is a normal outcome for new users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_path_maps(&self, user_id: &str) -> Result<Vec<PathMap>> {
        let mut stmt = self.conn.prepare(SELECT_PATH_MAPS_BY_USER)?;
        let rows = stmt.query_map([user_id], row_to_path_map)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Creates an imported root for a user and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_path_map(
        &mut self,
        user_id: &str,
        root_path: &str,
        description: Option<&str>,
    ) -> Result<PathMap> {
        self.conn
            .execute(INSERT_PATH_MAP, params![user_id, root_path, description])?;
        Ok(PathMap {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            root_path: root_path.to_string(),
            description: description.map(str::to_string),
        })
    }

    /// Deletes the user's imported roots matching an exact stored path.
    ///
    /// Returns the number of rows removed; zero is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_path_maps_by_root(&mut self, user_id: &str, root_path: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute(DELETE_PATH_MAPS_BY_ROOT, params![user_id, root_path])?)
    }

    /// Returns all favorite categories for a user, with nested favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn find_category_paths(&self, user_id: &str) -> Result<Vec<CategoryPath>> {
        let mut stmt = self.conn.prepare(SELECT_CATEGORY_PATHS_BY_USER)?;
        let bare: Vec<(i64, String, String)> = stmt
            .query_map([user_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut favorites_stmt = self.conn.prepare(SELECT_FAVORITES_BY_CATEGORY)?;
        let mut categories = Vec::with_capacity(bare.len());
        for (id, owner, root_path) in bare {
            let favorites = favorites_stmt
                .query_map([id], |row| {
                    Ok(CategoryFavorite {
                        id: row.get(0)?,
                        root_path: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            categories.push(CategoryPath {
                id,
                user_id: owner,
                root_path,
                favorites,
            });
        }
        Ok(categories)
    }

    /// Creates a favorite category for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_category_path(&mut self, user_id: &str, root_path: &str) -> Result<CategoryPath> {
        self.conn
            .execute(INSERT_CATEGORY_PATH, params![user_id, root_path])?;
        Ok(CategoryPath {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            root_path: root_path.to_string(),
            favorites: Vec::new(),
        })
    }

    /// Attaches a favorite path beneath an existing category.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a missing parent
    /// category, via the foreign key).
    pub fn create_category_favorite(
        &mut self,
        category_id: i64,
        root_path: &str,
    ) -> Result<CategoryFavorite> {
        self.conn
            .execute(INSERT_CATEGORY_FAVORITE, params![category_id, root_path])?;
        Ok(CategoryFavorite {
            id: self.conn.last_insert_rowid(),
            root_path: root_path.to_string(),
        })
    }

    /// Returns all stars for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_star_paths(&self, user_id: &str) -> Result<Vec<StarPath>> {
        let mut stmt = self.conn.prepare(SELECT_STARS_BY_USER)?;
        let rows = stmt.query_map([user_id], row_to_star)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Looks up a star by its exact virtual path.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_star(&self, user_id: &str, root_path: &str) -> Result<Option<StarPath>> {
        Ok(self
            .conn
            .query_row(SELECT_STAR, params![user_id, root_path], row_to_star)
            .optional()?)
    }

    /// Creates a star on a virtual path.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including the composite
    /// uniqueness constraint when the star already exists).
    pub fn create_star(&mut self, user_id: &str, root_path: &str) -> Result<StarPath> {
        self.conn
            .execute(INSERT_STAR, params![user_id, root_path])?;
        Ok(StarPath {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            root_path: root_path.to_string(),
        })
    }

    /// Deletes a star by id; returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_star(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.execute(DELETE_STAR, [id])? > 0)
    }

    /// Returns all share links for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_share_links(&self, user_id: &str) -> Result<Vec<ShareLink>> {
        let mut stmt = self.conn.prepare(SELECT_SHARE_LINKS_BY_USER)?;
        let rows = stmt.query_map([user_id], |row| {
            let secs: i64 = row.get(4)?;
            Ok(ShareLink {
                id: row.get(0)?,
                user_id: row.get(1)?,
                root_path: row.get(2)?,
                token: row.get(3)?,
                created_at: unix_secs_to_datetime(secs)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Creates a share link for a virtual path.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate token).
    pub fn create_share_link(
        &mut self,
        user_id: &str,
        root_path: &str,
        token: &str,
    ) -> Result<ShareLink> {
        let created_at = Utc::now();
        self.conn.execute(
            INSERT_SHARE_LINK,
            params![user_id, root_path, token, datetime_to_unix_secs(created_at)],
        )?;
        Ok(ShareLink {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            root_path: root_path.to_string(),
            token: token.to_string(),
            created_at,
        })
    }

    /// Creates a trash schedule row and returns it with its generated id.
    ///
    /// The caller renames the physical file to embed the returned id, so
    /// this insert must happen before the filesystem move.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_trash_entry(
        &mut self,
        user_id: &str,
        item: &str,
        return_path: &str,
        expire_date: DateTime<Utc>,
    ) -> Result<TrashEntry> {
        self.conn.execute(
            INSERT_TRASH_ENTRY,
            params![user_id, item, return_path, datetime_to_unix_secs(expire_date)],
        )?;
        Ok(TrashEntry {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            item: item.to_string(),
            return_path: return_path.to_string(),
            expire_date,
        })
    }

    /// Looks up a trash entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_trash_entry(&self, id: i64) -> Result<Option<TrashEntry>> {
        Ok(self
            .conn
            .query_row(SELECT_TRASH_ENTRY, [id], row_to_trash_entry)
            .optional()?)
    }

    /// Returns all trash entries for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_trash_entries(&self, user_id: &str) -> Result<Vec<TrashEntry>> {
        let mut stmt = self.conn.prepare(SELECT_TRASH_ENTRIES_BY_USER)?;
        let rows = stmt.query_map([user_id], row_to_trash_entry)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Returns the user's trash entries whose expiry is at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_expired_trash_entries(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrashEntry>> {
        let mut stmt = self.conn.prepare(SELECT_EXPIRED_TRASH_ENTRIES)?;
        let rows = stmt.query_map(
            params![user_id, datetime_to_unix_secs(now)],
            row_to_trash_entry,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Deletes a trash entry by id; returns whether a row was removed.
    ///
    /// A missing row is a normal outcome (e.g. a trashed file whose
    /// schedule row was already cleaned up).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_trash_entry(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.execute(DELETE_TRASH_ENTRY, [id])? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::test_util::create_test_database;
    use chrono::Duration;

    #[test]
    fn test_path_map_roundtrip() {
        let mut db = create_test_database();

        let created = db
            .create_path_map("u1", "/imported/docs", Some("Docs"))
            .unwrap();
        assert!(created.id > 0);

        let found = db.find_path_maps("u1").unwrap();
        assert_eq!(found, vec![created]);
    }

    #[test]
    fn test_path_maps_scoped_by_user() {
        let mut db = create_test_database();
        db.create_path_map("u1", "/a", None).unwrap();
        db.create_path_map("u2", "/b", None).unwrap();

        let found = db.find_path_maps("u1").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].root_path, "/a");
    }

    #[test]
    fn test_find_path_maps_empty_for_new_user() {
        let db = create_test_database();
        assert!(db.find_path_maps("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_delete_path_maps_by_root() {
        let mut db = create_test_database();
        db.create_path_map("u1", "/stale", None).unwrap();
        db.create_path_map("u1", "/stale", None).unwrap();
        db.create_path_map("u1", "/fresh", None).unwrap();

        let removed = db.delete_path_maps_by_root("u1", "/stale").unwrap();
        assert_eq!(removed, 2);

        let remaining = db.find_path_maps("u1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].root_path, "/fresh");
    }

    #[test]
    fn test_delete_path_maps_by_root_missing_is_zero() {
        let mut db = create_test_database();
        assert_eq!(db.delete_path_maps_by_root("u1", "/none").unwrap(), 0);
    }

    #[test]
    fn test_category_with_favorites() {
        let mut db = create_test_database();
        let category = db.create_category_path("u1", "/projects").unwrap();
        db.create_category_favorite(category.id, "/projects/alpha")
            .unwrap();
        db.create_category_favorite(category.id, "/projects/beta")
            .unwrap();

        let found = db.find_category_paths("u1").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].favorites.len(), 2);
        assert_eq!(found[0].favorites[0].root_path, "/projects/alpha");
    }

    #[test]
    fn test_star_toggle_primitives() {
        let mut db = create_test_database();
        assert!(db.find_star("u1", "/docs/a.txt").unwrap().is_none());

        let star = db.create_star("u1", "/docs/a.txt").unwrap();
        assert_eq!(
            db.find_star("u1", "/docs/a.txt").unwrap().unwrap().id,
            star.id
        );

        assert!(db.delete_star(star.id).unwrap());
        assert!(!db.delete_star(star.id).unwrap());
        assert!(db.find_star("u1", "/docs/a.txt").unwrap().is_none());
    }

    #[test]
    fn test_star_duplicate_rejected() {
        let mut db = create_test_database();
        db.create_star("u1", "/docs/a.txt").unwrap();
        assert!(db.create_star("u1", "/docs/a.txt").is_err());
    }

    #[test]
    fn test_share_link_roundtrip() {
        let mut db = create_test_database();
        let link = db.create_share_link("u1", "/docs/a.txt", "tok123").unwrap();

        let found = db.find_share_links("u1").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, link.id);
        assert_eq!(found[0].token, "tok123");
    }

    #[test]
    fn test_trash_entry_roundtrip() {
        let mut db = create_test_database();
        let expire = Utc::now() + Duration::days(30);
        let entry = db
            .create_trash_entry("u1", "a.txt", "/srv/files/docs/a.txt", expire)
            .unwrap();
        assert!(entry.id > 0);

        let found = db.find_trash_entry(entry.id).unwrap().unwrap();
        assert_eq!(found.item, "a.txt");
        assert_eq!(found.return_path, "/srv/files/docs/a.txt");
        // Stored at second precision
        assert_eq!(found.expire_date.timestamp(), expire.timestamp());
    }

    #[test]
    fn test_find_expired_trash_entries() {
        let mut db = create_test_database();
        let now = Utc::now();
        db.create_trash_entry("u1", "old", "/p/old", now - Duration::days(1))
            .unwrap();
        db.create_trash_entry("u1", "fresh", "/p/fresh", now + Duration::days(29))
            .unwrap();
        db.create_trash_entry("u2", "other", "/p/other", now - Duration::days(2))
            .unwrap();

        let expired = db.find_expired_trash_entries("u1", now).unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].item, "old");
    }

    #[test]
    fn test_delete_trash_entry() {
        let mut db = create_test_database();
        let entry = db
            .create_trash_entry("u1", "x", "/p/x", Utc::now())
            .unwrap();

        assert!(db.delete_trash_entry(entry.id).unwrap());
        assert!(!db.delete_trash_entry(entry.id).unwrap());
        assert!(db.find_trash_entry(entry.id).unwrap().is_none());
    }
}
