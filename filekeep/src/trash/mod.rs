//! Soft-delete lifecycle: trash, confirm-required permanent delete,
//! restore, and the expiry sweep.
//!
//! Each item moves through `live → trashed → restored | purged`. A
//! trashed item is tracked by a registry row created **before** the
//! physical move; if the move then fails, the row is deleted again
//! (compensating rollback), so a schedule row without a corresponding
//! trashed file never survives. The trashed file carries the row id in
//! its name (`<item>_id<id>`), making the row recoverable from the
//! filename alone.
//!
//! Requesting deletion of something already under `/trash` is a
//! permanent-delete request and requires explicit confirmation; the
//! confirmation demand is an outcome, not an error, so callers can
//! re-prompt.

mod sweep;

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use crate::authz::{Authorizer, UserContext};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::VirtualPath;
use crate::registry::{Registry, TrashEntry};

pub use sweep::SweepReport;

/// Outcome of a soft-delete request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeleteOutcome {
    /// The item was moved to trash and scheduled for expiry.
    Trashed {
        /// The schedule row, including the generated id.
        entry: TrashEntry,
    },
    /// The target is already in trash; the caller must confirm the
    /// permanent delete and re-invoke.
    ConfirmRequired,
    /// The item was permanently removed from trash.
    Purged {
        /// The removed item's virtual path.
        path: VirtualPath,
    },
}

/// Outcome of a successful restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreOutcome {
    /// The restored schedule row id.
    pub entry_id: i64,
    /// The physical location the item returned to.
    pub restored_to: PathBuf,
}

/// Manages the trash lifecycle for authenticated callers.
///
/// # Examples
///
/// ```no_run
/// use filekeep::authz::{Role, UserContext};
/// use filekeep::config::Settings;
/// use filekeep::registry::{Database, DatabaseConfig};
/// use filekeep::trash::TrashManager;
///
/// let settings = Settings::new("/srv/files", "/srv/internal");
/// let mut db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
/// let mut trash = TrashManager::new(&settings, &mut db);
///
/// let user = UserContext::new("u1", Role::User);
/// trash.soft_delete(&user, "/imported/docs/old.txt", false).unwrap();
/// ```
pub struct TrashManager<'a, R: Registry> {
    pub(crate) settings: &'a Settings,
    pub(crate) registry: &'a mut R,
}

impl<'a, R: Registry> TrashManager<'a, R> {
    /// Creates a manager over the given settings and registry.
    #[must_use]
    pub fn new(settings: &'a Settings, registry: &'a mut R) -> Self {
        Self { settings, registry }
    }

    /// Soft-deletes a live item, or permanently deletes a trashed one.
    ///
    /// For a live item: the user's expired trash is swept
    /// opportunistically, a schedule row is created first, and only then
    /// is the file renamed and moved under the user's trash directory.
    /// A failure after the row exists triggers the compensating row
    /// delete before the error is returned.
    ///
    /// For an item already under `/trash`: without `confirm` the call
    /// returns [`DeleteOutcome::ConfirmRequired`]; with it, the file is
    /// removed and the matching schedule row is deleted best-effort (a
    /// missing or unparseable row is logged, never blocks the removal).
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] for unauthorized paths or read-only roles
    /// - [`Error::PathNotFound`] when the target does not exist
    /// - Database or I/O errors; state is rolled back as described above
    pub fn soft_delete(
        &mut self,
        user: &UserContext,
        raw_path: &str,
        confirm: bool,
    ) -> Result<DeleteOutcome> {
        user.require_mutation(raw_path)?;

        let path = VirtualPath::parse(raw_path);
        if path.is_root() {
            return Err(Error::Validation {
                field: "path".into(),
                message: "cannot delete a root".into(),
            });
        }

        let grant = Authorizer::new(self.settings, &*self.registry).authorize(&user.id, &path)?;
        let resolved = grant.resolve()?;

        if path.in_trash() {
            return self.purge(user, &path, resolved.as_path(), confirm);
        }

        // Keep the trash bounded before adding to it.
        if let Err(err) = self.sweep_expired(&user.id) {
            log::warn!("opportunistic trash sweep failed for {}: {err}", user.id);
        }

        if !resolved.exists() {
            return Err(Error::not_found(path.as_str()));
        }

        let item = path.name().to_string();
        let expire_date = Utc::now() + self.settings.retention_window();
        let return_path = resolved.as_path().display().to_string();

        // Row first, move second; a failed insert leaves the filesystem
        // untouched.
        let entry = self
            .registry
            .create_trash_entry(&user.id, &item, &return_path, expire_date)?;

        let trash_dir = self.settings.user_trash_dir(&user.id);
        let trashed_path = trash_dir.join(entry.trashed_name());
        let moved = fsops::ensure_dir(&trash_dir)
            .and_then(|()| fsops::move_no_overwrite(resolved.as_path(), &trashed_path));

        if let Err(err) = moved {
            // Compensating rollback: the row must not outlive the failed
            // move.
            if let Err(rollback_err) = self.registry.delete_trash_entry(entry.id) {
                log::error!(
                    "rollback failed for trash entry {}: {rollback_err}",
                    entry.id
                );
            }
            return Err(err);
        }

        Ok(DeleteOutcome::Trashed { entry })
    }

    /// Restores a trashed item back to its original location.
    ///
    /// The schedule row is looked up from the `_id<N>` suffix of the
    /// trashed name; a row owned by another user surfaces as not-found
    /// rather than leaking its existence. The row is deleted after a
    /// successful move; a failed row delete at that point is logged but
    /// does not undo the restore.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] when the name carries no record id
    /// - [`Error::PathNotFound`] for a missing row or missing trashed file
    /// - [`Error::Conflict`] when the original location is occupied again
    pub fn restore(&mut self, user: &UserContext, trashed_name: &str) -> Result<RestoreOutcome> {
        user.require_mutation(trashed_name)?;

        let Some((_, id)) = parse_trash_id(trashed_name) else {
            return Err(Error::InvalidName {
                name: trashed_name.to_string(),
                reason: "missing record id suffix".to_string(),
            });
        };

        let entry = self
            .registry
            .find_trash_entry(id)?
            .filter(|entry| entry.user_id == user.id)
            .ok_or_else(|| Error::not_found(trashed_name))?;

        let source = self.settings.user_trash_dir(&user.id).join(trashed_name);
        let destination = PathBuf::from(&entry.return_path);

        if let Some(parent) = destination.parent() {
            fsops::ensure_dir(parent)?;
        }
        fsops::move_no_overwrite(&source, &destination)?;

        if let Err(err) = self.registry.delete_trash_entry(id) {
            log::error!("restored {trashed_name} but failed to delete its record: {err}");
        }

        Ok(RestoreOutcome {
            entry_id: id,
            restored_to: destination,
        })
    }

    /// Permanent deletion of an already-trashed item.
    fn purge(
        &mut self,
        user: &UserContext,
        path: &VirtualPath,
        physical: &std::path::Path,
        confirm: bool,
    ) -> Result<DeleteOutcome> {
        if !confirm {
            return Ok(DeleteOutcome::ConfirmRequired);
        }

        // The file removal is authoritative; the row cleanup afterwards
        // is best-effort. The row must belong to the caller: the id in a
        // filename is untrusted input, not proof of ownership.
        fsops::remove_recursive(physical)?;

        match parse_trash_id(path.name()) {
            Some((_, id)) => match self.registry.find_trash_entry(id)? {
                Some(entry) if entry.user_id == user.id => {
                    self.registry.delete_trash_entry(id)?;
                }
                Some(_) => {
                    log::warn!("trash record {id} is owned by another user; leaving it");
                }
                None => {
                    log::warn!("no trash record found for id {id}");
                }
            },
            None => {
                log::warn!("trashed item '{}' carries no record id", path.name());
            }
        }

        Ok(DeleteOutcome::Purged { path: path.clone() })
    }
}

/// Splits a trashed filename into its base name and record id.
///
/// The id is parsed from the final `_id<digits>` suffix, so item names
/// that themselves contain `_id` still parse correctly.
///
/// # Examples
///
/// ```
/// use filekeep::trash::parse_trash_id;
///
/// assert_eq!(parse_trash_id("report.txt_id42"), Some(("report.txt", 42)));
/// assert_eq!(parse_trash_id("my_id_cards_id7"), Some(("my_id_cards", 7)));
/// assert_eq!(parse_trash_id("plain.txt"), None);
/// ```
#[must_use]
pub fn parse_trash_id(name: &str) -> Option<(&str, i64)> {
    let split_at = name.rfind("_id")?;
    let digits = &name[split_at + 3..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = digits.parse().ok()?;
    Some((&name[..split_at], id))
}
