//! Environment variable handling for configuration overrides.
//!
//! This module provides support for FILEKEEP_* environment variables
//! that override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::{DatabaseSection, FileConfig, StorageSection, TrashSection};
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use filekeep::config::{EnvironmentConfig, FileConfig};
///
/// let mut config = FileConfig::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to a raw config.
    ///
    /// Reads the FILEKEEP_* variables and applies them with higher
    /// precedence than file-based values.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn apply_overrides(config: &mut FileConfig) -> Result<()> {
        // FILEKEEP_STORAGE_ROOT
        if let Ok(root) = env::var("FILEKEEP_STORAGE_ROOT") {
            let storage = config.storage.get_or_insert_with(StorageSection::default);
            storage.root = Some(PathBuf::from(root));
        }

        // FILEKEEP_INTERNAL_ROOT
        if let Ok(root) = env::var("FILEKEEP_INTERNAL_ROOT") {
            let storage = config.storage.get_or_insert_with(StorageSection::default);
            storage.internal_root = Some(PathBuf::from(root));
        }

        // FILEKEEP_TRASH_RETENTION_DAYS
        if let Ok(days) = env::var("FILEKEEP_TRASH_RETENTION_DAYS") {
            let days = days.parse().map_err(|_| Error::Validation {
                field: "FILEKEEP_TRASH_RETENTION_DAYS".into(),
                message: "Must be a positive integer".into(),
            })?;
            let trash = config.trash.get_or_insert_with(TrashSection::default);
            trash.retention_days = Some(days);
        }

        // FILEKEEP_DATABASE_PATH
        if let Ok(path) = env::var("FILEKEEP_DATABASE_PATH") {
            let database = config.database.get_or_insert_with(DatabaseSection::default);
            database.path = Some(PathBuf::from(path));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("FILEKEEP_STORAGE_ROOT");
        env::remove_var("FILEKEEP_INTERNAL_ROOT");
        env::remove_var("FILEKEEP_TRASH_RETENTION_DAYS");
        env::remove_var("FILEKEEP_DATABASE_PATH");
    }

    #[test]
    #[serial]
    fn test_no_env_vars_leaves_config_untouched() {
        clear_env();
        let mut config = FileConfig::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    #[serial]
    fn test_storage_overrides() {
        clear_env();
        env::set_var("FILEKEEP_STORAGE_ROOT", "/env/files");
        env::set_var("FILEKEEP_INTERNAL_ROOT", "/env/internal");

        let mut config = FileConfig::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();

        let storage = config.storage.unwrap();
        assert_eq!(storage.root, Some(PathBuf::from("/env/files")));
        assert_eq!(storage.internal_root, Some(PathBuf::from("/env/internal")));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_retention_override() {
        clear_env();
        env::set_var("FILEKEEP_TRASH_RETENTION_DAYS", "7");

        let mut config = FileConfig::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config.trash.unwrap().retention_days, Some(7));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_retention_errors() {
        clear_env();
        env::set_var("FILEKEEP_TRASH_RETENTION_DAYS", "soon");

        let mut config = FileConfig::default();
        assert!(EnvironmentConfig::apply_overrides(&mut config).is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_wins_over_existing_value() {
        clear_env();
        env::set_var("FILEKEEP_STORAGE_ROOT", "/env/files");

        let mut config: FileConfig =
            serde_yaml::from_str("storage:\n  root: /file/files\n").unwrap();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(
            config.storage.unwrap().root,
            Some(PathBuf::from("/env/files"))
        );
        clear_env();
    }
}
