//! Per-user path authorization against the dynamic root allow-list.
//!
//! The authorizer decides whether a user may touch a virtual path and,
//! when allowed, which physical root the path resolves against. Three
//! sources are consulted in order, short-circuiting on the first match:
//!
//! 1. The user's internal tree (including the always-allowed `/trash`)
//! 2. Imported roots (path map rows) under the shared storage tree
//! 3. Favorite categories (and their nested favorites) under the
//!    internal tree
//!
//! Authorization and physical containment are independent concerns: a
//! grant still goes through [`crate::path::resolve_under`], which
//! re-validates containment against the granted root.

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::path::{PathRelationship, ResolvedPath, VirtualPath};
use crate::registry::Registry;

/// Which authorization source granted access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantScope {
    /// The user's internal tree (trash included).
    Internal,
    /// An imported root under the shared storage tree.
    Imported {
        /// The matching path map row.
        path_map_id: i64,
    },
    /// A favorite category (or nested favorite) under the internal tree.
    Category {
        /// The matching category row.
        category_id: i64,
    },
}

/// A successful authorization decision.
///
/// Holds the physical root the path is routed to and the virtual suffix
/// to resolve beneath it. The grant proves authorization only; physical
/// containment is re-checked by [`Grant::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    /// The source that granted access.
    pub scope: GrantScope,
    /// The physical root to resolve against.
    pub physical_root: PathBuf,
    /// The virtual suffix to join beneath the root.
    pub suffix: VirtualPath,
}

impl Grant {
    /// Resolve the granted suffix to a contained physical path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] if the suffix escapes the granted
    /// root despite authorization approving it.
    pub fn resolve(&self) -> Result<ResolvedPath> {
        crate::path::resolve_under(&self.physical_root, self.suffix.as_str())
    }
}

/// Decides per-user path authorization.
///
/// # Examples
///
/// ```no_run
/// use filekeep::authz::Authorizer;
/// use filekeep::config::Settings;
/// use filekeep::path::VirtualPath;
/// use filekeep::registry::{Database, DatabaseConfig};
///
/// let settings = Settings::new("/srv/files", "/srv/internal");
/// let db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
/// let authorizer = Authorizer::new(&settings, &db);
///
/// let path = VirtualPath::parse("/trash/old.txt");
/// assert!(authorizer.authorize("u1", &path).is_ok());
/// ```
pub struct Authorizer<'a, R: Registry> {
    settings: &'a Settings,
    registry: &'a R,
}

impl<'a, R: Registry> Authorizer<'a, R> {
    /// Creates an authorizer over the given settings and registry.
    #[must_use]
    pub fn new(settings: &'a Settings, registry: &'a R) -> Self {
        Self { settings, registry }
    }

    /// Decide whether `user_id` may act on `path`.
    ///
    /// Sub-paths of an authorized root are always authorized. An empty
    /// path map list (a new user) is a normal case, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] when no source grants the path,
    /// or a database error if the registry lookups fail.
    pub fn authorize(&self, user_id: &str, path: &VirtualPath) -> Result<Grant> {
        // The internal tree is implicitly authorized, trash included.
        if path.in_trash() {
            return Ok(Grant {
                scope: GrantScope::Internal,
                physical_root: self.settings.user_internal_root(user_id),
                suffix: path.clone(),
            });
        }

        let internal_prefix = self.settings.internal_prefix(user_id);
        if let Some(rest) = path.strip_prefix(&internal_prefix) {
            return Ok(Grant {
                scope: GrantScope::Internal,
                physical_root: self.settings.user_internal_root(user_id),
                suffix: rest,
            });
        }

        // Imported roots route into the shared storage tree.
        for map in self.registry.find_path_maps(user_id)? {
            let root = VirtualPath::parse(&map.root_path);
            if PathRelationship::contains(root.as_str(), path.as_str()) {
                return Ok(Grant {
                    scope: GrantScope::Imported {
                        path_map_id: map.id,
                    },
                    physical_root: self.settings.storage_root.clone(),
                    suffix: path.clone(),
                });
            }
        }

        // Favorite categories route into the user's internal tree.
        for category in self.registry.find_category_paths(user_id)? {
            let root = VirtualPath::parse(&category.root_path);
            if PathRelationship::contains(root.as_str(), path.as_str()) {
                return Ok(Grant {
                    scope: GrantScope::Category {
                        category_id: category.id,
                    },
                    physical_root: self.settings.user_internal_root(user_id),
                    suffix: path.clone(),
                });
            }
            for favorite in &category.favorites {
                let favorite_root = VirtualPath::parse(&favorite.root_path);
                if PathRelationship::contains(favorite_root.as_str(), path.as_str()) {
                    return Ok(Grant {
                        scope: GrantScope::Category {
                            category_id: category.id,
                        },
                        physical_root: self.settings.user_internal_root(user_id),
                        suffix: path.clone(),
                    });
                }
            }
        }

        Err(Error::denied(
            path.as_str(),
            "path is outside the caller's authorized roots",
        ))
    }

    /// Convenience wrapper returning a boolean decision.
    ///
    /// Database failures surface as a denial here; use
    /// [`Authorizer::authorize`] when the distinction matters.
    #[must_use]
    pub fn is_authorized(&self, user_id: &str, path: &VirtualPath) -> bool {
        self.authorize(user_id, path).is_ok()
    }
}

/// Self-healing cleanup of stale imported roots.
///
/// Deletes the user's path map rows stored under both the raw and the
/// normalized key forms of `raw_path`. Invoked when a listing hits an
/// authorized path that turns out to be missing on disk, so future
/// requests fail fast instead of repeatedly resolving a dead directory.
/// The user re-imports to recreate the root.
///
/// # Errors
///
/// Returns an error if the registry deletes fail.
pub fn remove_stale_roots<R: Registry>(
    registry: &mut R,
    user_id: &str,
    raw_path: &str,
) -> Result<usize> {
    let mut removed = registry.delete_path_maps_by_root(user_id, raw_path)?;
    let normalized = VirtualPath::parse(raw_path);
    if normalized.as_str() != raw_path {
        removed += registry.delete_path_maps_by_root(user_id, normalized.as_str())?;
    }
    if removed > 0 {
        log::warn!("removed {removed} stale imported root(s) for '{raw_path}'");
    }
    Ok(removed)
}
