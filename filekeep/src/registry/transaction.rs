//! Batch and prefix-rewrite operations.
//!
//! This module provides the registry operations that must be atomic
//! across multiple rows: batch deletes and the metadata repointing that
//! follows a move or rename. Repointing is done row-by-row with the
//! separator-aware prefix test rather than SQL `LIKE` matching, so path
//! strings containing SQL wildcard characters can never corrupt the
//! rewrite.

use rusqlite::{params, Transaction, TransactionBehavior};

use crate::error::Result;
use crate::path::normalize::strip_root_prefix;

use super::connection::Database;

const DELETE_PATH_MAP_BY_ID: &str = "DELETE FROM path_maps WHERE id = ?";

const DELETE_TRASH_ENTRY_BY_ID: &str = "DELETE FROM trash_entries WHERE id = ?";

const SELECT_STARS_FOR_REWRITE: &str = r"
    SELECT id, root_path FROM star_paths WHERE user_id = ?
";

const UPDATE_STAR_ROOT_PATH: &str = "UPDATE star_paths SET root_path = ? WHERE id = ?";

const SELECT_SHARE_LINKS_FOR_REWRITE: &str = r"
    SELECT id, root_path FROM share_links WHERE user_id = ?
";

const UPDATE_SHARE_LINK_ROOT_PATH: &str = "UPDATE share_links SET root_path = ? WHERE id = ?";

/// Rewrites `root_path` values equal to or nested under `old_prefix`.
///
/// Shared by the star and share-link repointing paths; returns the number
/// of rows rewritten.
fn repoint_rows(
    tx: &Transaction<'_>,
    select_sql: &str,
    update_sql: &str,
    user_id: &str,
    old_prefix: &str,
    new_prefix: &str,
) -> Result<usize> {
    let rows: Vec<(i64, String)> = {
        let mut stmt = tx.prepare(select_sql)?;
        let x = stmt
            .query_map([user_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        x
    };

    let mut update = tx.prepare(update_sql)?;
    let mut rewritten = 0;
    for (id, root_path) in rows {
        let Some(rest) = strip_root_prefix(&root_path, old_prefix) else {
            continue;
        };
        let new_path = if rest == "/" {
            new_prefix.to_string()
        } else if new_prefix == "/" {
            rest
        } else {
            format!("{new_prefix}{rest}")
        };
        update.execute(params![new_path, id])?;
        rewritten += 1;
    }
    Ok(rewritten)
}

impl Database {
    /// Deletes multiple imported roots by id in a single transaction.
    ///
    /// This operation is atomic; either all deletes apply or none do.
    /// Returns the number of rows actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started, a delete
    /// fails, or the commit fails.
    pub fn delete_path_maps(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut total_deleted = 0;
        {
            let mut stmt = tx.prepare(DELETE_PATH_MAP_BY_ID)?;
            for id in ids {
                total_deleted += stmt.execute([id])?;
            }
        }

        tx.commit()?;
        Ok(total_deleted)
    }

    /// Deletes multiple trash entries by id in a single transaction.
    ///
    /// Used by the sweep after physical removals succeed; atomic, and
    /// returns the number of rows actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started, a delete
    /// fails, or the commit fails.
    pub fn delete_trash_entries(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut total_deleted = 0;
        {
            let mut stmt = tx.prepare(DELETE_TRASH_ENTRY_BY_ID)?;
            for id in ids {
                total_deleted += stmt.execute([id])?;
            }
        }

        tx.commit()?;
        Ok(total_deleted)
    }

    /// Repoints the user's stars from one virtual path prefix to another.
    ///
    /// The match is separator-aware and includes the exact path itself,
    /// so renaming a file repoints its own star and moving a directory
    /// repoints everything beneath it. Returns the number of rows
    /// rewritten; zero is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filekeep::registry::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
    /// db.repoint_stars("u1", "/docs", "/archive/docs").unwrap();
    /// ```
    pub fn repoint_stars(
        &mut self,
        user_id: &str,
        old_prefix: &str,
        new_prefix: &str,
    ) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let rewritten = repoint_rows(
            &tx,
            SELECT_STARS_FOR_REWRITE,
            UPDATE_STAR_ROOT_PATH,
            user_id,
            old_prefix,
            new_prefix,
        )?;
        tx.commit()?;
        Ok(rewritten)
    }

    /// Repoints the user's share links from one prefix to another.
    ///
    /// Same semantics as [`Database::repoint_stars`].
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn repoint_share_links(
        &mut self,
        user_id: &str,
        old_prefix: &str,
        new_prefix: &str,
    ) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let rewritten = repoint_rows(
            &tx,
            SELECT_SHARE_LINKS_FOR_REWRITE,
            UPDATE_SHARE_LINK_ROOT_PATH,
            user_id,
            old_prefix,
            new_prefix,
        )?;
        tx.commit()?;
        Ok(rewritten)
    }
}
