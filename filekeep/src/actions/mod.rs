//! Filesystem actions against authorized, resolved paths.
//!
//! [`ActionEngine`] exposes one operation per verb: rename, relocate
//! (move/cut), copy, and place. Every verb follows the same shape:
//!
//! 1. refuse read-only roles,
//! 2. normalize the virtual path(s),
//! 3. authorize against the caller's roots,
//! 4. resolve to contained physical paths,
//! 5. re-check containment on any newly computed destination,
//! 6. perform the mutation,
//! 7. repoint dependent metadata rows where the verb requires it.
//!
//! No verb ever accepts a caller-supplied absolute physical path.

use crate::authz::{Authorizer, UserContext};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::path::{ResolvedPath, VirtualPath};
use crate::registry::Registry;

mod copy;
mod place;
mod relocate;
mod rename;

pub use copy::CopyOutcome;
pub use place::{PlaceKind, PlaceOptions, PlaceOutcome};
pub use relocate::RelocateOutcome;
pub use rename::RenameOutcome;

/// Executes filesystem verbs for authenticated callers.
///
/// The engine borrows the registry mutably because several verbs update
/// metadata rows (stars, share links) as part of the same operation.
///
/// # Examples
///
/// ```no_run
/// use filekeep::actions::ActionEngine;
/// use filekeep::authz::{Role, UserContext};
/// use filekeep::config::Settings;
/// use filekeep::registry::{Database, DatabaseConfig};
///
/// let settings = Settings::new("/srv/files", "/srv/internal");
/// let mut db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
/// let mut engine = ActionEngine::new(&settings, &mut db);
///
/// let user = UserContext::new("u1", Role::User);
/// engine.rename(&user, "/imported/docs/draft.txt", "final.txt").unwrap();
/// ```
pub struct ActionEngine<'a, R: Registry> {
    pub(crate) settings: &'a Settings,
    pub(crate) registry: &'a mut R,
}

impl<'a, R: Registry> ActionEngine<'a, R> {
    /// Creates an engine over the given settings and registry.
    #[must_use]
    pub fn new(settings: &'a Settings, registry: &'a mut R) -> Self {
        Self { settings, registry }
    }

    /// Normalize, authorize, and resolve a caller-supplied path.
    pub(crate) fn locate(
        &self,
        user: &UserContext,
        raw_path: &str,
    ) -> Result<(VirtualPath, ResolvedPath)> {
        let path = VirtualPath::parse(raw_path);
        let grant = Authorizer::new(self.settings, &*self.registry).authorize(&user.id, &path)?;
        let resolved = grant.resolve()?;
        Ok((path, resolved))
    }
}

/// Rejects entry names that could change directories.
///
/// A valid name is a single non-empty path segment: no separators, no
/// `..`, not `.`.
pub(crate) fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "must not contain path separators".to_string(),
        });
    }
    if name.contains("..") {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "must not contain parent references".to_string(),
        });
    }
    if name == "." {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "must be a real entry name".to_string(),
        });
    }
    if name.contains('\0') {
        return Err(Error::InvalidName {
            name: name.replace('\0', "\\0"),
            reason: "must not contain NUL bytes".to_string(),
        });
    }
    Ok(())
}
