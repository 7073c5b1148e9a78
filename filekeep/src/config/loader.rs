//! Configuration file loading.
//!
//! Locates and parses YAML configuration files. Two locations are
//! consulted by default, lowest precedence first:
//!
//! 1. User config: `~/.filekeep/config.yaml`
//! 2. An explicit file supplied by the embedder
//!
//! Missing files are a normal outcome; parse failures are not.

use std::path::{Path, PathBuf};

use crate::config::schema::FileConfig;
use crate::error::Result;

/// Loads configuration files into [`FileConfig`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// The default user configuration path (`~/.filekeep/config.yaml`),
    /// or `None` when the home directory cannot be determined.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(".filekeep").join("config.yaml"))
    }

    /// Loads and parses a configuration file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use filekeep::config::ConfigLoader;
    ///
    /// let config = ConfigLoader::load_file(Path::new("/etc/filekeep.yaml")).unwrap();
    /// ```
    pub fn load_file(path: &Path) -> Result<Option<FileConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        let parsed: FileConfig = serde_yaml::from_str(&contents)?;
        Ok(Some(parsed))
    }

    /// Loads the default user configuration if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config() -> Result<Option<FileConfig>> {
        match Self::user_config_path() {
            Some(path) => Self::load_file(&path),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_none() {
        let result = ConfigLoader::load_file(Path::new("/definitely/not/here.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storage:\n  root: /srv/files\n").unwrap();

        let parsed = ConfigLoader::load_file(&path).unwrap().unwrap();
        assert_eq!(
            parsed.storage.unwrap().root,
            Some(PathBuf::from("/srv/files"))
        );
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storage: [not, a, mapping\n").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_load_unknown_field_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "nonsense: 1\n").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_user_config_path_shape() {
        if let Some(path) = ConfigLoader::user_config_path() {
            assert!(path.ends_with(".filekeep/config.yaml"));
        }
    }
}
