//! Relational store for per-user roots, stars, share links, and trash
//! schedule rows.
//!
//! This module provides the SQLite-backed registry the core reads and
//! writes through the narrow [`Registry`] interface, including connection
//! management, schema versioning, CRUD operations, and the transactional
//! prefix rewrites performed after moves.
//!
//! The registry is the system of record for ownership rows; the core only
//! mutates them as a side effect of a corresponding filesystem action,
//! filesystem-first or with compensating rollback.
//!
//! # Examples
//!
//! ```no_run
//! use filekeep::registry::{Database, DatabaseConfig, Registry};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
//!
//! db.create_path_map("u1", "/imported/music", None).unwrap();
//! let roots = Registry::find_path_maps(&db, "u1").unwrap();
//! assert_eq!(roots.len(), 1);
//! ```

mod config;
mod connection;
pub mod migrations;
mod models;
mod operations;
mod schema;
mod store;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;
pub use models::{CategoryFavorite, CategoryPath, PathMap, ShareLink, StarPath, TrashEntry};
pub use store::Registry;

#[cfg(test)]
pub(crate) use store::MockRegistry;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
