//! Expired-trash sweeping.
//!
//! The sweep runs both lazily (on trash listing and before each new
//! soft delete) and from any scheduler the embedder wires up; both call
//! sites share this function, so it is idempotent under overlapping
//! invocation for the same user.

use chrono::Utc;
use serde::Serialize;

use crate::authz::UserContext;
use crate::error::Result;
use crate::fsops;
use crate::registry::{Registry, TrashEntry};

use super::TrashManager;

/// What a sweep pass removed and what it had to leave behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepReport {
    /// Entries whose file and schedule row were both removed.
    pub purged: Vec<TrashEntry>,
    /// Entries whose physical removal failed; their rows are retained
    /// for a later pass.
    pub failed: Vec<TrashEntry>,
}

impl SweepReport {
    /// Number of fully purged entries.
    #[must_use]
    pub fn purged_count(&self) -> usize {
        self.purged.len()
    }

    /// Whether the pass left nothing behind.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<R: Registry> TrashManager<'_, R> {
    /// Purges the user's expired trash entries.
    ///
    /// Entries are processed one by one so a single stuck file cannot
    /// block the rest; each failure is logged and the loop continues.
    /// Schedule rows are deleted only for entries whose physical removal
    /// actually succeeded; a row is never dropped while its file may
    /// still occupy space. An empty expired set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry lookups or the final batch row
    /// delete fail. Per-item filesystem failures are reported in the
    /// [`SweepReport`] instead of failing the pass.
    pub fn sweep_expired(&mut self, user_id: &str) -> Result<SweepReport> {
        let expired = self
            .registry
            .find_expired_trash_entries(user_id, Utc::now())?;
        if expired.is_empty() {
            return Ok(SweepReport::default());
        }

        let trash_dir = self.settings.user_trash_dir(user_id);
        let mut report = SweepReport::default();

        for entry in expired {
            let path = trash_dir.join(entry.trashed_name());
            match fsops::remove_recursive(&path) {
                Ok(()) => report.purged.push(entry),
                Err(err) => {
                    log::warn!("sweep: failed to remove {}: {err}", path.display());
                    report.failed.push(entry);
                }
            }
        }

        if !report.purged.is_empty() {
            let ids: Vec<i64> = report.purged.iter().map(|entry| entry.id).collect();
            self.registry.delete_trash_entries(&ids)?;
        }

        Ok(report)
    }

    /// Sweep entry point for callers holding a full user context.
    ///
    /// # Errors
    ///
    /// Same as [`TrashManager::sweep_expired`].
    pub fn sweep_expired_for(&mut self, user: &UserContext) -> Result<SweepReport> {
        self.sweep_expired(&user.id)
    }
}
