//! Configuration system for filekeep.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files
//! - Environment variable overrides (FILEKEEP_*)
//! - Programmatic configuration via the builder
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (FILEKEEP_*)
//! 3. An explicit configuration file
//! 4. User config (`~/.filekeep/config.yaml`)
//!
//! # Examples
//!
//! Programmatic configuration:
//!
//! ```
//! use std::path::PathBuf;
//! use filekeep::config::{ConfigBuilder, FileConfig, StorageSection};
//!
//! let overrides = FileConfig {
//!     storage: Some(StorageSection {
//!         root: Some(PathBuf::from("/srv/files")),
//!         internal_root: Some(PathBuf::from("/srv/internal")),
//!     }),
//!     ..Default::default()
//! };
//!
//! let settings = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(overrides)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.trash_retention_days, 30);
//! ```
//!
//! Direct construction for embedders and tests:
//!
//! ```
//! use filekeep::config::Settings;
//!
//! let settings = Settings::new("/srv/files", "/srv/internal")
//!     .with_trash_retention_days(7);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use schema::{
    DatabaseSection, FileConfig, Settings, StorageSection, TrashSection,
    DEFAULT_TRASH_RETENTION_DAYS,
};
pub use validator::ConfigValidator;
