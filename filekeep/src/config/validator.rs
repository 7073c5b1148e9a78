//! Configuration validation.
//!
//! Validates fully-merged [`Settings`] before any component consumes
//! them. The storage and internal roots are required to be absolute and
//! disjoint; a nested pair would let an imported root reach into
//! per-user internal trees.

use crate::config::schema::Settings;
use crate::error::{Error, Result};
use crate::path::contains_path;

/// Validates merged settings.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate settings, returning the first violation found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when:
    /// - either root is not an absolute path
    /// - the roots are equal or one contains the other
    /// - the retention window is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::config::{ConfigValidator, Settings};
    ///
    /// let settings = Settings::new("/srv/files", "/srv/internal");
    /// ConfigValidator::validate(&settings).unwrap();
    ///
    /// let nested = Settings::new("/srv/files", "/srv/files/internal");
    /// assert!(ConfigValidator::validate(&nested).is_err());
    /// ```
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.storage_root.is_absolute() {
            return Err(Error::Validation {
                field: "storage.root".into(),
                message: "must be an absolute path".into(),
            });
        }

        if !settings.internal_root.is_absolute() {
            return Err(Error::Validation {
                field: "storage.internal_root".into(),
                message: "must be an absolute path".into(),
            });
        }

        if contains_path(&settings.storage_root, &settings.internal_root)
            || contains_path(&settings.internal_root, &settings.storage_root)
        {
            return Err(Error::Validation {
                field: "storage".into(),
                message: "storage root and internal root must be disjoint trees".into(),
            });
        }

        if settings.trash_retention_days == 0 {
            return Err(Error::Validation {
                field: "trash.retention_days".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(())
    }
}
