//! Configuration builder.
//!
//! Merges configuration sources into validated [`Settings`]. Precedence,
//! highest to lowest:
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (FILEKEEP_*)
//! 3. An explicit configuration file
//! 4. User config (`~/.filekeep/config.yaml`)

use std::path::PathBuf;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::schema::{FileConfig, Settings, DEFAULT_TRASH_RETENTION_DAYS};
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Builds validated [`Settings`] from layered sources.
///
/// # Examples
///
/// ```no_run
/// use filekeep::config::ConfigBuilder;
///
/// let settings = ConfigBuilder::new().build().unwrap();
/// println!("storage root: {}", settings.storage_root.display());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file_path: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<FileConfig>,
}

impl ConfigBuilder {
    /// Creates a builder with default sources enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration file in addition to the user config.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Skip all file-based configuration sources.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skip environment variable overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply programmatic overrides with the highest precedence.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use filekeep::config::{ConfigBuilder, FileConfig, StorageSection};
    ///
    /// let overrides = FileConfig {
    ///     storage: Some(StorageSection {
    ///         root: Some(PathBuf::from("/srv/files")),
    ///         internal_root: Some(PathBuf::from("/srv/internal")),
    ///     }),
    ///     ..Default::default()
    /// };
    ///
    /// let settings = ConfigBuilder::new()
    ///     .skip_files()
    ///     .skip_env()
    ///     .with_config(overrides)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(settings.storage_root, PathBuf::from("/srv/files"));
    /// ```
    #[must_use]
    pub fn with_config(mut self, config: FileConfig) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file fails to parse, an environment value
    /// is malformed, a required field is missing after merging, or
    /// validation fails.
    pub fn build(self) -> Result<Settings> {
        let mut merged = FileConfig::default();

        if !self.skip_files {
            if let Some(user) = ConfigLoader::load_user_config()? {
                merged = merged.merged_with(user);
            }
            if let Some(path) = &self.file_path {
                match ConfigLoader::load_file(path)? {
                    Some(explicit) => merged = merged.merged_with(explicit),
                    None => {
                        return Err(Error::not_found(path.display().to_string()));
                    }
                }
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut merged)?;
        }

        if let Some(overrides) = self.overrides {
            merged = merged.merged_with(overrides);
        }

        let storage = merged.storage.unwrap_or_default();
        let storage_root = storage.root.ok_or_else(|| Error::Validation {
            field: "storage.root".into(),
            message: "is required".into(),
        })?;
        let internal_root = storage.internal_root.ok_or_else(|| Error::Validation {
            field: "storage.internal_root".into(),
            message: "is required".into(),
        })?;

        let settings = Settings {
            storage_root,
            internal_root,
            trash_retention_days: merged
                .trash
                .and_then(|t| t.retention_days)
                .unwrap_or(DEFAULT_TRASH_RETENTION_DAYS),
            database_path: merged.database.and_then(|d| d.path),
        };

        ConfigValidator::validate(&settings)?;
        Ok(settings)
    }
}
