//! Filesystem primitives shared by every mutating verb.
//!
//! Thin wrappers over `std::fs` with the failure semantics the action
//! engine and trash lifecycle rely on: destination-exists cases fail
//! closed as [`Error::Conflict`], missing sources surface as
//! [`Error::PathNotFound`], and directory copies traverse with
//! `walkdir`. Callers pass only paths that already went through
//! authorization and containment; nothing here re-checks them.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Creates a directory and any missing parents; idempotent.
///
/// # Errors
///
/// Returns an error if creation fails (including when a non-directory
/// already occupies the path).
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Whether a path exists without following a trailing symlink.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Moves a file or directory, never overwriting the destination.
///
/// A plain rename is attempted first; when the destination sits on a
/// different filesystem the move degrades to a recursive copy followed
/// by removal of the source.
///
/// # Errors
///
/// - [`Error::PathNotFound`] when the source does not exist
/// - [`Error::Conflict`] when the destination already exists
/// - [`Error::Io`] for other filesystem failures
pub fn move_no_overwrite(src: &Path, dest: &Path) -> Result<()> {
    if !entry_exists(src) {
        return Err(Error::not_found(src.display().to_string()));
    }
    if entry_exists(dest) {
        return Err(Error::conflict(format!(
            "destination already exists: {}",
            dest.display()
        )));
    }

    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            copy_tree(src, dest)?;
            remove_recursive(src)
        }
        Err(err) => Err(err.into()),
    }
}

/// Copies a file or directory recursively, never overwriting.
///
/// # Errors
///
/// - [`Error::PathNotFound`] when the source does not exist
/// - [`Error::Conflict`] when the destination already exists
/// - [`Error::Io`] for other filesystem failures
pub fn copy_no_overwrite(src: &Path, dest: &Path) -> Result<()> {
    if !entry_exists(src) {
        return Err(Error::not_found(src.display().to_string()));
    }
    if entry_exists(dest) {
        return Err(Error::conflict(format!(
            "destination already exists: {}",
            dest.display()
        )));
    }
    copy_tree(src, dest)
}

/// Removes a file or directory tree.
///
/// # Errors
///
/// - [`Error::PathNotFound`] when the path does not exist
/// - [`Error::Io`] for other filesystem failures
pub fn remove_recursive(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            Error::not_found(path.display().to_string())
        } else {
            err.into()
        }
    })?;

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Writes text content to a file, creating parent directories.
///
/// # Errors
///
/// Returns [`Error::Conflict`] when the file exists and `overwrite` is
/// false, or an I/O error on write failure.
pub fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if !overwrite && entry_exists(path) {
        return Err(Error::conflict(format!(
            "file already exists: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Recursive copy without overwrite semantics of its own; callers check
/// the destination first.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(src)?;
    if !metadata.is_dir() {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest)?;
        return Ok(());
    }

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|err| Error::Internal {
            details: format!("walk failed under {}: {err}", src.display()),
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| Error::Internal {
                details: format!("walk escaped {}: {err}", src.display()),
            })?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
