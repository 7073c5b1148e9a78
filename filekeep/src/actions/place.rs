//! Creation of new files and folders.

use serde::Serialize;

use crate::actions::ActionEngine;
use crate::authz::UserContext;
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::VirtualPath;
use crate::registry::Registry;

/// What kind of entry to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaceKind {
    /// A regular file with text content.
    File,
    /// A directory.
    Folder,
}

/// Options for a place operation.
///
/// File creation fails closed on an existing file unless the caller
/// explicitly opted into overwriting, keeping the contract auditable.
///
/// # Examples
///
/// ```
/// use filekeep::actions::PlaceOptions;
///
/// let folder = PlaceOptions::folder();
/// let file = PlaceOptions::file("hello").with_overwrite();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOptions {
    /// Entry kind to create.
    pub kind: PlaceKind,
    /// File content; ignored for folders.
    pub content: String,
    /// Whether an existing file may be replaced.
    pub overwrite: bool,
}

impl PlaceOptions {
    /// Options for creating a directory.
    #[must_use]
    pub fn folder() -> Self {
        Self {
            kind: PlaceKind::Folder,
            content: String::new(),
            overwrite: false,
        }
    }

    /// Options for creating a file with the given content.
    #[must_use]
    pub fn file(content: impl Into<String>) -> Self {
        Self {
            kind: PlaceKind::File,
            content: content.into(),
            overwrite: false,
        }
    }

    /// Allow replacing an existing file.
    #[must_use]
    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}

/// Result of a successful place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceOutcome {
    /// The created entry's virtual path.
    pub path: VirtualPath,
    /// False when an ensure-dir call found the folder already present.
    pub created: bool,
}

impl<R: Registry> ActionEngine<'_, R> {
    /// Creates an empty directory or a file with text content.
    ///
    /// Folder creation has ensure-dir semantics and is idempotent. File
    /// creation refuses to touch an existing file unless
    /// [`PlaceOptions::overwrite`] is set.
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] for unauthorized paths or read-only roles
    /// - [`Error::Conflict`] when a file exists and overwrite is off, or
    ///   a non-directory occupies a folder path
    pub fn place(
        &mut self,
        user: &UserContext,
        raw_path: &str,
        options: &PlaceOptions,
    ) -> Result<PlaceOutcome> {
        user.require_mutation(raw_path)?;

        let (path, resolved) = self.locate(user, raw_path)?;
        if path.is_root() {
            return Err(Error::Validation {
                field: "path".into(),
                message: "cannot place at a root".into(),
            });
        }

        match options.kind {
            PlaceKind::Folder => {
                if resolved.as_path().is_dir() {
                    return Ok(PlaceOutcome {
                        path,
                        created: false,
                    });
                }
                if fsops::entry_exists(resolved.as_path()) {
                    return Err(Error::conflict(format!(
                        "a file already occupies '{}'",
                        path.as_str()
                    )));
                }
                fsops::ensure_dir(resolved.as_path())?;
                Ok(PlaceOutcome {
                    path,
                    created: true,
                })
            }
            PlaceKind::File => {
                let existed = fsops::entry_exists(resolved.as_path());
                fsops::write_file(resolved.as_path(), &options.content, options.overwrite)?;
                Ok(PlaceOutcome {
                    path,
                    created: !existed,
                })
            }
        }
    }
}
