//! Directory and root listing.
//!
//! Listing is read-only for the filesystem but not for the registry:
//! root listing opportunistically prunes duplicate imported roots,
//! listing `/trash` lazily sweeps expired entries, and a listing that
//! hits a vanished authorized directory removes the stale imported-root
//! rows (self-healing) before surfacing not-found.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::authz::{remove_stale_roots, Authorizer, UserContext};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fsops;
use crate::path::VirtualPath;
use crate::registry::Registry;
use crate::trash::TrashManager;

/// What kind of entry a listing row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// The entry's basename.
    pub name: String,
    /// The entry's virtual path.
    pub path: VirtualPath,
    /// Directory or file.
    pub kind: EntryKind,
    /// Size in bytes; absent for directories.
    pub size: Option<u64>,
    /// Last modification time, when the platform reports one.
    pub modified: Option<DateTime<Utc>>,
    /// Whether the caller starred this exact virtual path.
    pub starred: bool,
}

/// One of the user's imported roots, as shown on the start screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootEntry {
    /// The backing path map row id.
    pub id: i64,
    /// Display name: the stored description, or the basename.
    pub name: String,
    /// The root's canonical virtual path.
    pub path: VirtualPath,
    /// Whether the caller starred the root.
    pub starred: bool,
}

/// Sort key for directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortKey {
    /// Sort by name (default).
    #[default]
    Name,
    /// Sort by size.
    Size,
    /// Sort by modification time.
    Modified,
}

/// Sort direction for directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Options for a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Case-insensitive substring filter on entry names.
    pub search: Option<String>,
    /// Sort key.
    pub sort: SortKey,
    /// Sort direction.
    pub order: SortOrder,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub per_page: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            search: None,
            sort: SortKey::default(),
            order: SortOrder::default(),
            page: 1,
            per_page: 50,
        }
    }
}

/// One page of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    /// The page's entries, sorted and filtered.
    pub entries: Vec<FileEntry>,
    /// Total matching entries across all pages.
    pub total: usize,
    /// The 1-based page number served.
    pub page: usize,
    /// The page size used.
    pub per_page: usize,
}

/// Read-side browsing over authorized paths.
///
/// # Examples
///
/// ```no_run
/// use filekeep::authz::{Role, UserContext};
/// use filekeep::browse::{Browser, ListOptions};
/// use filekeep::config::Settings;
/// use filekeep::registry::{Database, DatabaseConfig};
///
/// let settings = Settings::new("/srv/files", "/srv/internal");
/// let mut db = Database::open(DatabaseConfig::new("/tmp/filekeep.db")).unwrap();
/// let mut browser = Browser::new(&settings, &mut db);
///
/// let user = UserContext::new("u1", Role::User);
/// let page = browser.list_dir(&user, "/imported/docs", &ListOptions::default()).unwrap();
/// println!("{} entries", page.total);
/// ```
pub struct Browser<'a, R: Registry> {
    settings: &'a Settings,
    registry: &'a mut R,
}

impl<'a, R: Registry> Browser<'a, R> {
    /// Creates a browser over the given settings and registry.
    #[must_use]
    pub fn new(settings: &'a Settings, registry: &'a mut R) -> Self {
        Self { settings, registry }
    }

    /// Lists the user's imported roots.
    ///
    /// Duplicate rows (same root after normalization) are pruned as a
    /// side effect, keeping the per-user uniqueness invariant
    /// self-repairing.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry lookups or the duplicate prune
    /// fail.
    pub fn list_roots(&mut self, user: &UserContext) -> Result<Vec<RootEntry>> {
        let maps = self.registry.find_path_maps(&user.id)?;
        let starred: HashSet<String> = self
            .registry
            .find_star_paths(&user.id)?
            .into_iter()
            .map(|star| star.root_path)
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut duplicates: Vec<i64> = Vec::new();
        let mut roots = Vec::new();

        for map in maps {
            let normalized = VirtualPath::parse(&map.root_path);
            if !seen.insert(normalized.as_str().to_string()) {
                duplicates.push(map.id);
                continue;
            }
            let name = map
                .description
                .clone()
                .unwrap_or_else(|| normalized.name().to_string());
            let starred = starred.contains(&map.root_path)
                || starred.contains(normalized.as_str());
            roots.push(RootEntry {
                id: map.id,
                name,
                path: normalized,
                starred,
            });
        }

        if !duplicates.is_empty() {
            log::warn!(
                "pruning {} duplicate imported root(s) for {}",
                duplicates.len(),
                user.id
            );
            self.registry.delete_path_maps(&duplicates)?;
        }

        Ok(roots)
    }

    /// Lists one directory under an authorized root.
    ///
    /// Listing `/trash` first ensures the trash directory exists and
    /// sweeps expired entries. Per-entry stat failures are logged and
    /// skipped. A vanished authorized directory triggers the
    /// self-healing registry cleanup and then surfaces as not-found.
    ///
    /// # Errors
    ///
    /// - [`Error::AccessDenied`] for unauthorized paths
    /// - [`Error::PathNotFound`] when the directory does not exist
    /// - [`Error::Validation`] when the target is not a directory
    pub fn list_dir(
        &mut self,
        user: &UserContext,
        raw_path: &str,
        options: &ListOptions,
    ) -> Result<ListPage> {
        let path = VirtualPath::parse(raw_path);
        let grant = Authorizer::new(self.settings, &*self.registry).authorize(&user.id, &path)?;

        if path.in_trash() {
            fsops::ensure_dir(&self.settings.user_trash_dir(&user.id))?;
            let mut trash = TrashManager::new(self.settings, &mut *self.registry);
            if let Err(err) = trash.sweep_expired(&user.id) {
                log::warn!("lazy trash sweep failed for {}: {err}", user.id);
            }
        }

        let resolved = grant.resolve()?;
        let read_dir = match std::fs::read_dir(resolved.as_path()) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                remove_stale_roots(self.registry, &user.id, raw_path)?;
                return Err(Error::not_found(path.as_str()));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotADirectory => {
                return Err(Error::Validation {
                    field: "path".into(),
                    message: "not a directory".into(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let starred: HashSet<String> = self
            .registry
            .find_star_paths(&user.id)?
            .into_iter()
            .map(|star| star.root_path)
            .collect();

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(dir_entry) => dir_entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry under {}: {err}", path.as_str());
                    continue;
                }
            };
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let metadata = match dir_entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    log::warn!("stat failed for {name}: {err}");
                    continue;
                }
            };

            let child = path.join(&name);
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(FileEntry {
                starred: starred.contains(child.as_str()),
                size: (kind == EntryKind::File).then(|| metadata.len()),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                name,
                path: child,
                kind,
            });
        }

        if let Some(needle) = &options.search {
            let needle = needle.to_lowercase();
            entries.retain(|entry| entry.name.to_lowercase().contains(&needle));
        }

        sort_entries(&mut entries, options.sort, options.order);

        let total = entries.len();
        let page = options.page.max(1);
        let per_page = options.per_page.max(1);
        let entries = entries
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Ok(ListPage {
            entries,
            total,
            page,
            per_page,
        })
    }
}

/// Sorts listing entries; directories and files are interleaved, ties
/// broken by name.
fn sort_entries(entries: &mut [FileEntry], key: SortKey, order: SortOrder) {
    entries.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Size => a.size.cmp(&b.size).then_with(|| a.name.cmp(&b.name)),
            SortKey::Modified => a
                .modified
                .cmp(&b.modified)
                .then_with(|| a.name.cmp(&b.name)),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
