//! Shared fixtures for core unit tests.
//!
//! Builds a scratch storage tree, internal tree, and registry database
//! wired into one `Settings` value, so action, browse, and trash tests
//! exercise the real resolver and store end to end.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::authz::{Role, UserContext};
use crate::config::Settings;
use crate::registry::test_util::create_test_database;
use crate::registry::Database;

/// A complete core fixture: settings, registry, and both storage trees.
pub(crate) struct CoreFixture {
    pub settings: Settings,
    pub db: Database,
    _storage: TempDir,
    _internal: TempDir,
}

impl CoreFixture {
    /// Creates fresh scratch trees and an empty registry.
    ///
    /// Roots are canonicalized up front so resolved paths compare
    /// cleanly on platforms where the temp directory is symlinked.
    pub fn new() -> Self {
        let storage = tempfile::tempdir().unwrap();
        let internal = tempfile::tempdir().unwrap();
        let settings = Settings::new(
            storage.path().canonicalize().unwrap(),
            internal.path().canonicalize().unwrap(),
        );
        Self {
            settings,
            db: create_test_database(),
            _storage: storage,
            _internal: internal,
        }
    }

    /// Grants the user every path under the shared storage root.
    pub fn grant_all(&mut self, user_id: &str) {
        self.db.create_path_map(user_id, "/", None).unwrap();
    }

    /// Absolute physical path under the shared storage root.
    pub fn storage_path(&self, rel: &str) -> PathBuf {
        self.settings.storage_root.join(rel)
    }

    /// Creates a file (and parents) under the shared storage root.
    pub fn write_storage_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.storage_path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Creates a directory (and parents) under the shared storage root.
    pub fn mkdir_storage(&self, rel: &str) -> PathBuf {
        let path = self.storage_path(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }
}

/// A standard read/write caller.
pub(crate) fn user() -> UserContext {
    UserContext::new("u1", Role::User)
}

/// A read-only caller.
pub(crate) fn guest() -> UserContext {
    UserContext::new("g1", Role::Guest)
}
