//! Imported-root, category, and star management.
//!
//! Imports grant browsing rights to directories under the shared
//! storage root; categories are user-defined favorite folders backed by
//! directories in the user's internal tree; stars toggle per-path flags.
//! All mutations are refused for read-only roles.

use crate::authz::{remove_stale_roots, Authorizer, UserContext};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::{resolve_under, VirtualPath};
use crate::registry::{CategoryFavorite, CategoryPath, PathMap, Registry};

/// Manages the caller's authorized roots and favorites.
///
/// # Examples
///
/// ```no_run
/// use filekeep::authz::{Role, UserContext};
/// use filekeep::config::Settings;
/// use filekeep::registry::{Database, DatabaseConfig};
/// use filekeep::roots::RootManager;
///
/// let settings = Settings::new("/srv/files", "/srv/internal");
/// let mut db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
/// let mut roots = RootManager::new(&settings, &mut db);
///
/// let user = UserContext::new("u1", Role::User);
/// roots.import_root(&user, "/imported/music", Some("Music")).unwrap();
/// ```
pub struct RootManager<'a, R: Registry> {
    settings: &'a Settings,
    registry: &'a mut R,
}

impl<'a, R: Registry> RootManager<'a, R> {
    /// Creates a manager over the given settings and registry.
    #[must_use]
    pub fn new(settings: &'a Settings, registry: &'a mut R) -> Self {
        Self { settings, registry }
    }

    /// Imports a directory under the shared storage root.
    ///
    /// The directory must exist, and the same root (after normalization)
    /// may not be imported twice by one user. The row stores the
    /// canonical virtual form.
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] for read-only roles or a path escaping
    ///   the shared root
    /// - [`Error::PathNotFound`] when the directory does not exist
    /// - [`Error::Conflict`] on a duplicate import
    pub fn import_root(
        &mut self,
        user: &UserContext,
        raw_root: &str,
        description: Option<&str>,
    ) -> Result<PathMap> {
        user.require_mutation(raw_root)?;

        let root = VirtualPath::parse(raw_root);
        if root.is_root() {
            return Err(Error::Validation {
                field: "root_path".into(),
                message: "cannot import the storage root itself".into(),
            });
        }

        let resolved = resolve_under(&self.settings.storage_root, root.as_str())?;
        if !resolved.as_path().is_dir() {
            return Err(Error::not_found(root.as_str()));
        }

        let existing = self.registry.find_path_maps(&user.id)?;
        if existing
            .iter()
            .any(|map| VirtualPath::parse(&map.root_path) == root)
        {
            return Err(Error::conflict(format!(
                "root '{}' is already imported",
                root.as_str()
            )));
        }

        self.registry
            .create_path_map(&user.id, root.as_str(), description)
    }

    /// Removes the user's imported roots matching a path.
    ///
    /// Both the raw and the normalized key forms are cleared, mirroring
    /// the self-healing cleanup. Returns the number of rows removed;
    /// zero is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry deletes fail.
    pub fn remove_root(&mut self, user: &UserContext, raw_root: &str) -> Result<usize> {
        user.require_mutation(raw_root)?;
        remove_stale_roots(self.registry, &user.id, raw_root)
    }

    /// Creates a favorite category backed by a directory in the user's
    /// internal tree.
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] for read-only roles
    /// - [`Error::Conflict`] when the category already exists
    pub fn create_category(&mut self, user: &UserContext, raw_path: &str) -> Result<CategoryPath> {
        user.require_mutation(raw_path)?;

        let path = VirtualPath::parse(raw_path);
        if path.is_root() {
            return Err(Error::Validation {
                field: "path".into(),
                message: "category path must not be the root".into(),
            });
        }

        let existing = self.registry.find_category_paths(&user.id)?;
        if existing
            .iter()
            .any(|category| VirtualPath::parse(&category.root_path) == path)
        {
            return Err(Error::conflict(format!(
                "category '{}' already exists",
                path.as_str()
            )));
        }

        let backing = resolve_under(&self.settings.user_internal_root(&user.id), path.as_str())?;
        fsops::ensure_dir(backing.as_path())?;

        self.registry.create_category_path(&user.id, path.as_str())
    }

    /// Attaches a favorite path beneath an existing category.
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] for read-only roles
    /// - [`Error::PathNotFound`] when the category does not exist
    pub fn add_favorite(
        &mut self,
        user: &UserContext,
        raw_category: &str,
        raw_favorite: &str,
    ) -> Result<CategoryFavorite> {
        user.require_mutation(raw_favorite)?;

        let category_path = VirtualPath::parse(raw_category);
        let favorite = VirtualPath::parse(raw_favorite);

        let category = self
            .registry
            .find_category_paths(&user.id)?
            .into_iter()
            .find(|category| VirtualPath::parse(&category.root_path) == category_path)
            .ok_or_else(|| Error::not_found(category_path.as_str()))?;

        self.registry
            .create_category_favorite(category.id, favorite.as_str())
    }

    /// Toggles a star on an authorized path; returns the new state.
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] when the path is outside the caller's
    ///   roots
    pub fn toggle_star(&mut self, user: &UserContext, raw_path: &str) -> Result<bool> {
        let path = VirtualPath::parse(raw_path);
        Authorizer::new(self.settings, &*self.registry).authorize(&user.id, &path)?;

        match self.registry.find_star(&user.id, path.as_str())? {
            Some(star) => {
                self.registry.delete_star(star.id)?;
                Ok(false)
            }
            None => {
                self.registry.create_star(&user.id, path.as_str())?;
                Ok(true)
            }
        }
    }
}
