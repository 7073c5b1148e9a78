//! Registry schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the relational store backing the filekeep core: imported
//! roots, favorite categories, stars, share links, and trash schedule rows.

/// Current schema version for the registry database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the `path_maps` table.
///
/// Each row grants one user browsing rights to one imported root under
/// the shared storage tree. Per-user uniqueness of `root_path` is an
/// application invariant maintained opportunistically (duplicates are
/// pruned during root listing) rather than a database constraint, because
/// rows are compared in normalized form.
pub const CREATE_PATH_MAPS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS path_maps (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        root_path TEXT NOT NULL,
        description TEXT
    )";

/// SQL statement to create the `category_paths` table.
pub const CREATE_CATEGORY_PATHS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS category_paths (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        root_path TEXT NOT NULL
    )";

/// SQL statement to create the `category_favorites` table.
///
/// Child rows of `category_paths`; removed automatically with their
/// parent category.
pub const CREATE_CATEGORY_FAVORITES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS category_favorites (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL REFERENCES category_paths(id) ON DELETE CASCADE,
        root_path TEXT NOT NULL
    )";

/// SQL statement to create the `star_paths` table.
///
/// A star is keyed by the exact virtual path string; the composite
/// uniqueness constraint makes the toggle race-safe.
pub const CREATE_STAR_PATHS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS star_paths (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        root_path TEXT NOT NULL,
        UNIQUE (user_id, root_path)
    )";

/// SQL statement to create the `share_links` table.
pub const CREATE_SHARE_LINKS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS share_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        root_path TEXT NOT NULL,
        token TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the `trash_entries` table.
///
/// One row per soft-deleted item. The trashed file on disk carries the
/// row id in its name (`<item>_id<id>`), so the schedule row is
/// recoverable from the filename alone.
pub const CREATE_TRASH_ENTRIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS trash_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        item TEXT NOT NULL,
        return_path TEXT NOT NULL,
        expire_date INTEGER NOT NULL
    )";

/// Index for per-user path map lookups, the hot authorization path.
pub const CREATE_PATH_MAPS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_path_maps_user ON path_maps(user_id)";

/// Index for per-user category lookups.
pub const CREATE_CATEGORY_PATHS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_category_paths_user ON category_paths(user_id)";

/// Index for favorite lookups by parent category.
pub const CREATE_CATEGORY_FAVORITES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_category_favorites_category ON category_favorites(category_id)";

/// Index for per-user star lookups.
pub const CREATE_STAR_PATHS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_star_paths_user ON star_paths(user_id)";

/// Index for per-user share link lookups.
pub const CREATE_SHARE_LINKS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_share_links_user ON share_links(user_id)";

/// Index for per-user trash lookups.
pub const CREATE_TRASH_ENTRIES_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_trash_entries_user ON trash_entries(user_id)";

/// Index that speeds up expiry sweeps.
pub const CREATE_TRASH_ENTRIES_EXPIRE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_trash_entries_expire ON trash_entries(expire_date)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
