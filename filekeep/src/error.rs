//! Error types for the filekeep library.
//!
//! This module provides the error hierarchy for all operations in the
//! filekeep core, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a filekeep error.
///
/// # Examples
///
/// ```
/// use filekeep::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the filekeep library.
///
/// This enum encompasses all failure conditions surfaced by path
/// resolution, authorization, filesystem actions, and the trash lifecycle.
#[derive(Debug, Error)]
pub enum Error {
    /// A path resolved outside an authorized root, or the caller is not
    /// permitted to act on it. The operation never partially executes.
    #[error("access denied for '{path}': {reason}")]
    AccessDenied {
        /// The offending path as the caller supplied it.
        path: String,
        /// Why access was refused.
        reason: String,
    },

    /// A target path or record does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The missing path.
        path: String,
    },

    /// The destination already exists, or a duplicate record was imported.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflicting state.
        details: String,
    },

    /// A malformed entry name was supplied (separators, traversal, empty).
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// The reason the name is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unexpected internal failure; compensating rollback has already
    /// run where a prior step mutated state.
    #[error("internal error: {details}")]
    Internal {
        /// Details about the failure.
        details: String,
    },
}

impl Error {
    /// Builds an [`Error::AccessDenied`] from anything path-like.
    pub(crate) fn denied(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Builds an [`Error::PathNotFound`] from anything path-like.
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Builds an [`Error::Conflict`].
    pub(crate) fn conflict(details: impl Into<String>) -> Self {
        Self::Conflict {
            details: details.into(),
        }
    }

    /// Check if the error is an authorization or containment refusal.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::Error;
    ///
    /// let err = Error::AccessDenied {
    ///     path: "/secret".to_string(),
    ///     reason: "outside authorized roots".to_string(),
    /// };
    /// assert!(err.is_access_denied());
    /// ```
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Check if the error indicates a missing path or record.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::Error;
    ///
    /// let err = Error::PathNotFound { path: "/gone".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if the error is a conflict with existing state.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_display() {
        let err = Error::AccessDenied {
            path: "/data/../evil".to_string(),
            reason: "escapes the configured root".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("access denied"));
        assert!(display.contains("/data/../evil"));
        assert!(display.contains("escapes"));
    }

    #[test]
    fn test_path_not_found_display() {
        let err = Error::PathNotFound {
            path: "/projects/missing.txt".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("path not found"));
        assert!(display.contains("/projects/missing.txt"));
    }

    #[test]
    fn test_conflict_display() {
        let err = Error::Conflict {
            details: "destination already exists".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("conflict"));
        assert!(display.contains("already exists"));
    }

    #[test]
    fn test_invalid_name_display() {
        let err = Error::InvalidName {
            name: "../../etc/passwd".to_string(),
            reason: "must not contain path separators".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid name"));
        assert!(display.contains("../../etc/passwd"));
    }

    #[test]
    fn test_validation_display() {
        let err = Error::Validation {
            field: "storage.root".to_string(),
            message: "must be an absolute path".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("storage.root"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_classification_helpers() {
        assert!(Error::denied("/x", "nope").is_access_denied());
        assert!(!Error::denied("/x", "nope").is_not_found());
        assert!(Error::not_found("/x").is_not_found());
        assert!(Error::conflict("dup").is_conflict());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<()> {
            Err(Error::not_found("/missing"))
        }

        assert!(returns_result().is_err());
    }
}
