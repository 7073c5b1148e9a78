//! Rename within a directory.

use serde::Serialize;

use crate::actions::{validate_entry_name, ActionEngine};
use crate::authz::UserContext;
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::{contains_path, VirtualPath};
use crate::registry::Registry;

/// Result of a successful rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    /// The entry's virtual path after the rename.
    pub new_path: VirtualPath,
    /// How many star and share rows were repointed.
    pub repointed: usize,
}

impl<R: Registry> ActionEngine<'_, R> {
    /// Renames an entry in place.
    ///
    /// The new name must be a single path segment; anything containing a
    /// separator or a parent reference is refused before any filesystem
    /// access. Containment is re-checked on the computed sibling path,
    /// not just the source. Stars and share links pointing at the old
    /// virtual path (or, for directories, anything beneath it) are
    /// repointed to the new one.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] for malformed names
    /// - [`Error::AccessDenied`] for unauthorized paths or read-only roles
    /// - [`Error::PathNotFound`] when the source does not exist
    /// - [`Error::Conflict`] when the new name is already taken
    pub fn rename(
        &mut self,
        user: &UserContext,
        raw_path: &str,
        new_name: &str,
    ) -> Result<RenameOutcome> {
        user.require_mutation(raw_path)?;
        validate_entry_name(new_name)?;

        let (path, resolved) = self.locate(user, raw_path)?;
        let parent = path.parent().ok_or_else(|| Error::Validation {
            field: "path".into(),
            message: "cannot rename a root".into(),
        })?;

        if !resolved.exists() {
            return Err(Error::not_found(path.as_str()));
        }

        let new_physical = resolved
            .as_path()
            .parent()
            .ok_or_else(|| Error::Validation {
                field: "path".into(),
                message: "cannot rename a root".into(),
            })?
            .join(new_name);

        // The destination gets its own containment check.
        if !contains_path(resolved.root(), &new_physical) {
            return Err(Error::denied(new_name, "new name escapes the storage root"));
        }

        if fsops::entry_exists(&new_physical) {
            return Err(Error::conflict(format!(
                "an entry named '{new_name}' already exists"
            )));
        }

        std::fs::rename(resolved.as_path(), &new_physical)?;

        let new_virtual = parent.join(new_name);
        let mut repointed = self
            .registry
            .repoint_stars(&user.id, path.as_str(), new_virtual.as_str())?;
        repointed += self
            .registry
            .repoint_share_links(&user.id, path.as_str(), new_virtual.as_str())?;

        Ok(RenameOutcome {
            new_path: new_virtual,
            repointed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{guest, user, CoreFixture};

    #[test]
    fn test_rename_file() {
        let mut fx = CoreFixture::new();
        fx.grant_all("u1");
        fx.write_storage_file("docs/draft.txt", "body");

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let outcome = engine
            .rename(&user(), "/docs/draft.txt", "final.txt")
            .unwrap();

        assert_eq!(outcome.new_path.as_str(), "/docs/final.txt");
        assert!(fx.storage_path("docs/final.txt").exists());
        assert!(!fx.storage_path("docs/draft.txt").exists());
    }

    #[test]
    fn test_rename_rejects_traversal_without_touching_disk() {
        let mut fx = CoreFixture::new();
        fx.grant_all("u1");
        fx.write_storage_file("docs/a.txt", "body");

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let err = engine
            .rename(&user(), "/docs/a.txt", "../../etc/passwd")
            .unwrap_err();

        assert!(matches!(err, Error::InvalidName { .. }));
        assert!(fx.storage_path("docs/a.txt").exists());
    }

    #[test]
    fn test_rename_missing_source() {
        let mut fx = CoreFixture::new();
        fx.grant_all("u1");
        fx.mkdir_storage("docs");

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let err = engine.rename(&user(), "/docs/ghost.txt", "new.txt").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_rename_existing_target_conflicts() {
        let mut fx = CoreFixture::new();
        fx.grant_all("u1");
        fx.write_storage_file("docs/a.txt", "a");
        fx.write_storage_file("docs/b.txt", "b");

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let err = engine.rename(&user(), "/docs/a.txt", "b.txt").unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            std::fs::read_to_string(fx.storage_path("docs/b.txt")).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_rename_repoints_star_and_share() {
        let mut fx = CoreFixture::new();
        fx.grant_all("u1");
        fx.write_storage_file("docs/a.txt", "a");
        fx.db.create_star("u1", "/docs/a.txt").unwrap();
        fx.db.create_share_link("u1", "/docs/a.txt", "tok").unwrap();

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let outcome = engine.rename(&user(), "/docs/a.txt", "b.txt").unwrap();
        assert_eq!(outcome.repointed, 2);

        assert_eq!(fx.db.find_star_paths("u1").unwrap()[0].root_path, "/docs/b.txt");
        assert_eq!(
            fx.db.find_share_links("u1").unwrap()[0].root_path,
            "/docs/b.txt"
        );
    }

    #[test]
    fn test_rename_directory_repoints_children() {
        let mut fx = CoreFixture::new();
        fx.grant_all("u1");
        fx.write_storage_file("docs/inner/a.txt", "a");
        fx.db.create_star("u1", "/docs/inner/a.txt").unwrap();

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        engine.rename(&user(), "/docs", "papers").unwrap();

        assert_eq!(
            fx.db.find_star_paths("u1").unwrap()[0].root_path,
            "/papers/inner/a.txt"
        );
        assert!(fx.storage_path("papers/inner/a.txt").exists());
    }

    #[test]
    fn test_rename_unauthorized_path_denied() {
        let mut fx = CoreFixture::new();
        // No roots granted.
        fx.write_storage_file("docs/a.txt", "a");

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let err = engine.rename(&user(), "/docs/a.txt", "b.txt").unwrap_err();
        assert!(err.is_access_denied());
    }

    #[test]
    fn test_rename_guest_denied() {
        let mut fx = CoreFixture::new();
        fx.grant_all("g1");
        fx.write_storage_file("docs/a.txt", "a");

        let mut engine = ActionEngine::new(&fx.settings, &mut fx.db);
        let err = engine.rename(&guest(), "/docs/a.txt", "b.txt").unwrap_err();
        assert!(err.is_access_denied());
        assert!(fx.storage_path("docs/a.txt").exists());
    }
}
