//! Common test utilities for integration tests.
//!
//! This module provides a full environment fixture (scratch storage
//! trees plus a registry database) built purely through the public API.

use std::path::PathBuf;

use filekeep::authz::{Role, UserContext};
use filekeep::registry::{Database, DatabaseConfig};
use filekeep::Settings;
use tempfile::TempDir;

/// A complete environment: settings, registry database, and both
/// physical storage trees.
pub struct TestEnv {
    pub settings: Settings,
    pub db: Database,
    _storage: TempDir,
    _internal: TempDir,
    _data: TempDir,
}

impl TestEnv {
    /// Creates fresh scratch trees and an empty registry database.
    pub fn new() -> Self {
        let storage = tempfile::tempdir().expect("storage tempdir");
        let internal = tempfile::tempdir().expect("internal tempdir");
        let data = tempfile::tempdir().expect("data tempdir");

        let settings = Settings::new(
            storage.path().canonicalize().expect("canonical storage root"),
            internal.path().canonicalize().expect("canonical internal root"),
        );
        let db = Database::open(DatabaseConfig::new(data.path().join("filekeep.db")))
            .expect("open registry database");

        Self {
            settings,
            db,
            _storage: storage,
            _internal: internal,
            _data: data,
        }
    }

    /// Grants the user every path under the shared storage root.
    #[allow(dead_code)]
    pub fn grant_all(&mut self, user_id: &str) {
        self.db
            .create_path_map(user_id, "/", None)
            .expect("create path map");
    }

    /// Absolute physical path under the shared storage root.
    #[allow(dead_code)]
    pub fn storage_path(&self, rel: &str) -> PathBuf {
        self.settings.storage_root.join(rel)
    }

    /// Creates a file (and parents) under the shared storage root.
    #[allow(dead_code)]
    pub fn write_storage_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.storage_path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parents");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Creates a directory (and parents) under the shared storage root.
    #[allow(dead_code)]
    pub fn mkdir_storage(&self, rel: &str) -> PathBuf {
        let path = self.storage_path(rel);
        std::fs::create_dir_all(&path).expect("create dir");
        path
    }

    /// Names under the user's physical trash directory, sorted.
    #[allow(dead_code)]
    pub fn trash_listing(&self, user_id: &str) -> Vec<String> {
        let dir = self.settings.user_trash_dir(user_id);
        if !dir.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("read trash dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// A standard read/write caller.
#[allow(dead_code)]
pub fn user() -> UserContext {
    UserContext::new("u1", Role::User)
}

/// A read-only caller.
#[allow(dead_code)]
pub fn guest() -> UserContext {
    UserContext::new("g1", Role::Guest)
}
