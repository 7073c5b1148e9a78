//! Registry database configuration and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for registry database connections.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use filekeep::registry::DatabaseConfig;
///
/// let config = DatabaseConfig::new("/tmp/filekeep.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::registry::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/filekeep.db");
    /// assert!(config.auto_create);
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::registry::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/filekeep.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory for filekeep (`~/.filekeep`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use filekeep::registry::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".filekeep"))
}

/// Resolves the registry database path from the environment or defaults.
///
/// The resolution order is:
/// 1. `$FILEKEEP_DATA_DIR/filekeep.db` if `FILEKEEP_DATA_DIR` is set
/// 2. `~/.filekeep/filekeep.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `FILEKEEP_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("FILEKEEP_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join("filekeep.db"))
    } else {
        Ok(default_data_dir()?.join("filekeep.db"))
    }
}
