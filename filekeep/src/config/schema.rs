//! Configuration schema definitions.
//!
//! This module defines the validated [`Settings`] consumed by the core
//! components and the raw file-format structs the loader and environment
//! layers merge before validation.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::path::normalize::normalize;
use crate::path::VirtualPath;

/// Default trash retention window in days.
pub const DEFAULT_TRASH_RETENTION_DAYS: u32 = 30;

/// Validated runtime settings for the filekeep core.
///
/// The shared storage root and the internal root are two disjoint trees:
/// imported roots live under the shared tree, while per-user folders
/// (including trash) live under the internal tree.
///
/// # Examples
///
/// ```
/// use filekeep::config::Settings;
///
/// let settings = Settings::new("/srv/files", "/srv/files-internal");
/// assert_eq!(settings.trash_retention_days, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The shared physical storage root; imported roots resolve here.
    pub storage_root: PathBuf,
    /// The internal storage root holding per-user trees and trash.
    pub internal_root: PathBuf,
    /// How many days a soft-deleted item remains recoverable.
    pub trash_retention_days: u32,
    /// Registry database location; resolved from the environment or the
    /// default data directory when absent.
    pub database_path: Option<PathBuf>,
}

impl Settings {
    /// Creates settings with default retention and no explicit database
    /// path.
    #[must_use]
    pub fn new(storage_root: impl AsRef<Path>, internal_root: impl AsRef<Path>) -> Self {
        Self {
            storage_root: storage_root.as_ref().to_path_buf(),
            internal_root: internal_root.as_ref().to_path_buf(),
            trash_retention_days: DEFAULT_TRASH_RETENTION_DAYS,
            database_path: None,
        }
    }

    /// Sets the trash retention window in days.
    #[must_use]
    pub fn with_trash_retention_days(mut self, days: u32) -> Self {
        self.trash_retention_days = days;
        self
    }

    /// Sets an explicit registry database path.
    #[must_use]
    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// The physical root of one user's internal tree.
    ///
    /// The user id is normalized and re-rooted before joining so that a
    /// hostile id cannot step outside the internal root.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use filekeep::config::Settings;
    ///
    /// let settings = Settings::new("/srv/files", "/srv/internal");
    /// assert_eq!(settings.user_internal_root("u1"), PathBuf::from("/srv/internal/u1"));
    /// assert_eq!(settings.user_internal_root("../u1"), PathBuf::from("/srv/internal/u1"));
    /// ```
    #[must_use]
    pub fn user_internal_root(&self, user_id: &str) -> PathBuf {
        let safe_id = normalize(user_id);
        self.internal_root.join(safe_id.trim_start_matches('/'))
    }

    /// The physical trash directory of one user.
    #[must_use]
    pub fn user_trash_dir(&self, user_id: &str) -> PathBuf {
        self.user_internal_root(user_id).join("trash")
    }

    /// The virtual prefix under which one user's internal tree is
    /// addressed, derived from the internal root's path string.
    #[must_use]
    pub fn internal_prefix(&self, user_id: &str) -> VirtualPath {
        VirtualPath::parse(&format!("{}/{}", self.internal_root.display(), user_id))
    }

    /// The configured retention window as a duration.
    #[must_use]
    pub fn retention_window(&self) -> Duration {
        Duration::days(i64::from(self.trash_retention_days))
    }
}

/// Raw configuration file contents before merging and validation.
///
/// # Examples
///
/// ```
/// use filekeep::config::FileConfig;
///
/// let parsed: FileConfig = serde_yaml::from_str(
///     "storage:\n  root: /srv/files\n  internal_root: /srv/internal\n"
/// ).unwrap();
/// assert!(parsed.storage.is_some());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Storage tree locations.
    pub storage: Option<StorageSection>,

    /// Trash lifecycle settings.
    pub trash: Option<TrashSection>,

    /// Registry database settings.
    pub database: Option<DatabaseSection>,
}

/// Storage root locations.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    /// The shared physical storage root.
    pub root: Option<PathBuf>,

    /// The internal storage root.
    pub internal_root: Option<PathBuf>,
}

/// Trash lifecycle settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TrashSection {
    /// Days a soft-deleted item remains recoverable.
    pub retention_days: Option<u32>,
}

/// Registry database settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    /// Path to the registry database file.
    pub path: Option<PathBuf>,
}

impl FileConfig {
    /// Overlays `higher` on top of `self`, field by field.
    #[must_use]
    pub fn merged_with(self, higher: Self) -> Self {
        let storage = match (self.storage, higher.storage) {
            (Some(base), Some(over)) => Some(StorageSection {
                root: over.root.or(base.root),
                internal_root: over.internal_root.or(base.internal_root),
            }),
            (base, over) => over.or(base),
        };
        let trash = match (self.trash, higher.trash) {
            (Some(base), Some(over)) => Some(TrashSection {
                retention_days: over.retention_days.or(base.retention_days),
            }),
            (base, over) => over.or(base),
        };
        let database = match (self.database, higher.database) {
            (Some(base), Some(over)) => Some(DatabaseSection {
                path: over.path.or(base.path),
            }),
            (base, over) => over.or(base),
        };
        Self {
            storage,
            trash,
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new("/srv/files", "/srv/internal");
        assert_eq!(settings.trash_retention_days, DEFAULT_TRASH_RETENTION_DAYS);
        assert!(settings.database_path.is_none());
    }

    #[test]
    fn test_settings_builders() {
        let settings = Settings::new("/srv/files", "/srv/internal")
            .with_trash_retention_days(7)
            .with_database_path("/var/lib/filekeep.db");
        assert_eq!(settings.trash_retention_days, 7);
        assert_eq!(
            settings.database_path,
            Some(PathBuf::from("/var/lib/filekeep.db"))
        );
    }

    #[test]
    fn test_user_internal_root_sanitizes_id() {
        let settings = Settings::new("/srv/files", "/srv/internal");
        assert_eq!(
            settings.user_internal_root("u1"),
            PathBuf::from("/srv/internal/u1")
        );
        assert_eq!(
            settings.user_internal_root("../../etc"),
            PathBuf::from("/srv/internal/etc")
        );
    }

    #[test]
    fn test_user_trash_dir() {
        let settings = Settings::new("/srv/files", "/srv/internal");
        assert_eq!(
            settings.user_trash_dir("u1"),
            PathBuf::from("/srv/internal/u1/trash")
        );
    }

    #[test]
    fn test_internal_prefix() {
        let settings = Settings::new("/srv/files", "/srv/internal");
        assert_eq!(settings.internal_prefix("u1").as_str(), "/srv/internal/u1");
    }

    #[test]
    fn test_retention_window() {
        let settings = Settings::new("/srv/files", "/srv/internal").with_trash_retention_days(3);
        assert_eq!(settings.retention_window(), Duration::days(3));
    }

    #[test]
    fn test_file_config_parse_yaml() {
        let yaml = r"
storage:
  root: /srv/files
  internal_root: /srv/internal
trash:
  retention_days: 14
database:
  path: /var/lib/filekeep/filekeep.db
";
        let parsed: FileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed.storage.as_ref().unwrap().root,
            Some(PathBuf::from("/srv/files"))
        );
        assert_eq!(parsed.trash.as_ref().unwrap().retention_days, Some(14));
    }

    #[test]
    fn test_file_config_rejects_unknown_fields() {
        let yaml = "storage:\n  root: /srv/files\nbogus: true\n";
        assert!(serde_yaml::from_str::<FileConfig>(yaml).is_err());
    }

    #[test]
    fn test_file_config_merge_overlays() {
        let base: FileConfig = serde_yaml::from_str(
            "storage:\n  root: /base\n  internal_root: /base-internal\ntrash:\n  retention_days: 10\n",
        )
        .unwrap();
        let over: FileConfig =
            serde_yaml::from_str("storage:\n  root: /override\n").unwrap();

        let merged = base.merged_with(over);
        let storage = merged.storage.unwrap();
        assert_eq!(storage.root, Some(PathBuf::from("/override")));
        assert_eq!(storage.internal_root, Some(PathBuf::from("/base-internal")));
        assert_eq!(merged.trash.unwrap().retention_days, Some(10));
    }
}
