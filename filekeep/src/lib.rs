#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # filekeep
//!
//! The authorization and safe-mutation core of a multi-user personal
//! file manager.
//!
//! Authenticated callers hand the core a `(user id, role)` pair and raw
//! virtual path strings; the core maps those paths to physical locations
//! without ever letting one escape an authorized root, and performs the
//! destructive operations (rename, move, copy, delete-to-trash,
//! permanent delete, scheduled purge, restore) with rollback-safe
//! bookkeeping in a SQLite-backed registry.
//!
//! ## Core Types
//!
//! - [`path::VirtualPath`] and [`path::resolve_under`]: canonical virtual
//!   paths and containment-checked physical resolution
//! - [`authz::Authorizer`] and [`authz::UserContext`]: per-user root
//!   authorization and role capability checks
//! - [`actions::ActionEngine`]: rename / move / copy / place
//! - [`trash::TrashManager`]: soft delete, restore, and the expiry sweep
//! - [`browse::Browser`] and [`roots::RootManager`]: listing and root
//!   management
//! - [`registry::Database`] and [`registry::Registry`]: the relational
//!   store and its injected interface
//!
//! ## Examples
//!
//! ```
//! use filekeep::path::VirtualPath;
//!
//! // Untrusted input becomes a canonical virtual path
//! let path = VirtualPath::parse("projects\\..\\music\\track.mp3");
//! assert_eq!(path.as_str(), "/music/track.mp3");
//! ```

pub mod actions;
pub mod authz;
pub mod browse;
pub mod config;
pub mod error;
pub mod fsops;
pub mod logging;
pub mod path;
pub mod registry;
pub mod roots;
pub mod trash;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience
pub use actions::ActionEngine;
pub use authz::{Authorizer, Role, UserContext};
pub use browse::Browser;
pub use config::{ConfigBuilder, Settings};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{PathRelationship, ResolvedPath, VirtualPath};
pub use registry::{Database, DatabaseConfig, Registry};
pub use roots::RootManager;
pub use trash::{DeleteOutcome, TrashManager};
