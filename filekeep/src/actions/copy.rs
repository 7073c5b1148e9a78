//! Copy into a destination directory.

use serde::Serialize;

use crate::actions::ActionEngine;
use crate::authz::{Authorizer, UserContext};
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::{contains_path, PathRelationship, VirtualPath};
use crate::registry::Registry;

/// Result of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyOutcome {
    /// The new entry's virtual path.
    pub new_path: VirtualPath,
}

impl<R: Registry> ActionEngine<'_, R> {
    /// Copies an entry into a destination directory.
    ///
    /// Both ends are authorized independently, the same as a move. The
    /// copy never overwrites an existing destination, and no metadata is
    /// rewritten: a copy is a new independent object, so the original's
    /// star and share state is not duplicated.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when the destination is not a directory or
    ///   a directory would copy into itself
    /// - [`Error::AccessDenied`] for unauthorized ends or read-only roles
    /// - [`Error::PathNotFound`] when the source does not exist
    /// - [`Error::Conflict`] when the destination entry already exists
    pub fn copy(
        &mut self,
        user: &UserContext,
        raw_src: &str,
        raw_dest: &str,
    ) -> Result<CopyOutcome> {
        user.require_mutation(raw_src)?;

        let src = VirtualPath::parse(raw_src);
        let dest = VirtualPath::parse(raw_dest);

        if PathRelationship::contains(src.as_str(), dest.as_str()) {
            return Err(Error::Validation {
                field: "destination".into(),
                message: "cannot copy a directory into itself".into(),
            });
        }

        let authorizer = Authorizer::new(self.settings, &*self.registry);
        let src_grant = authorizer.authorize(&user.id, &src)?;
        let dest_grant = authorizer.authorize(&user.id, &dest)?;

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

        fsops::copy_no_overwrite(src_resolved.as_path(), &final_dest)?;

        Ok(CopyOutcome {
            new_path: new_virtual,
        })
    }
}
