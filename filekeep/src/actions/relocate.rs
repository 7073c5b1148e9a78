//! Move (cut) into a destination directory.

use serde::Serialize;

use crate::actions::ActionEngine;
use crate::authz::{Authorizer, UserContext};
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::{contains_path, PathRelationship, VirtualPath};
use crate::registry::Registry;

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelocateOutcome {
    /// The entry's virtual path after the move.
    pub new_path: VirtualPath,
    /// How many star and share rows were repointed.
    pub repointed: usize,
}

impl<R: Registry> ActionEngine<'_, R> {
    /// Moves an entry into a destination directory.
    ///
    /// Both ends are authorized independently; the destination is never
    /// taken on trust because the source was approved. Moves across the
    /// authorized-root boundary (shared storage vs. a user's internal
    /// tree) are rejected at the resolve step, before any filesystem
    /// change. Stars and share links under the old virtual path are
    /// repointed by prefix, so moving a directory carries everything
    /// beneath it.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when source equals destination, the
    ///   destination is not a directory, or a directory would move into
    ///   itself
    /// - [`Error::AccessDenied`] for unauthorized ends, read-only roles,
    ///   or a cross-root move
    /// - [`Error::PathNotFound`] when the source does not exist
    /// - [`Error::Conflict`] when the destination entry already exists
    pub fn relocate(
        &mut self,
        user: &UserContext,
        raw_src: &str,
        raw_dest: &str,
    ) -> Result<RelocateOutcome> {
        user.require_mutation(raw_src)?;

        let src = VirtualPath::parse(raw_src);
        let dest = VirtualPath::parse(raw_dest);

        if src == dest {
            return Err(Error::Validation {
                field: "destination".into(),
                message: "source and destination are the same".into(),
            });
        }
        if src.is_root() {
            return Err(Error::Validation {
                field: "path".into(),
                message: "cannot move a root".into(),
            });
        }
        if PathRelationship::contains(src.as_str(), dest.as_str()) {
            return Err(Error::Validation {
                field: "destination".into(),
                message: "cannot move a directory into itself".into(),
            });
        }

        let authorizer = Authorizer::new(self.settings, &*self.registry);
        let src_grant = authorizer.authorize(&user.id, &src)?;
        let dest_grant = authorizer.authorize(&user.id, &dest)?;

        if src_grant.physical_root != dest_grant.physical_root {
            return Err(Error::denied(
                dest.as_str(),
                "cannot move across storage roots",
            ));
        }

        let src_resolved = src_grant.resolve()?;
        let dest_resolved = dest_grant.resolve()?;

        if !src_resolved.exists() {
            return Err(Error::not_found(src.as_str()));
        }
        if !dest_resolved.as_path().is_dir() {
            return Err(Error::Validation {
                field: "destination".into(),
                message: "destination is not a directory".into(),
            });
        }

        let name = src.name().to_string();
        let new_virtual = dest.join(&name);
        let final_dest = dest_resolved.as_path().join(&name);

        if !contains_path(dest_resolved.root(), &final_dest) {
            return Err(Error::denied(
                new_virtual.as_str(),
                "destination escapes the storage root",
            ));
        }

        fsops::move_no_overwrite(src_resolved.as_path(), &final_dest)?;

        let mut repointed = self
            .registry
            .repoint_stars(&user.id, src.as_str(), new_virtual.as_str())?;
        repointed += self
            .registry
            .repoint_share_links(&user.id, src.as_str(), new_virtual.as_str())?;

        Ok(RelocateOutcome {
            new_path: new_virtual,
            repointed,
        })
    }
}
