//! Device-local favorite set, kept apart from the application rows.
//!
//! The file is read once when the store is opened and rewritten on every
//! toggle. It is never synchronised anywhere else.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StoreError;

#[derive(Debug)]
pub struct FavoriteStore {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl FavoriteStore {
    /// Loads the set from `path`. A missing or unreadable file yields an
    /// empty set.
    pub fn load(path: &Path) -> Self {
        let ids = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list.into_iter().collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring corrupt favorites file");
                    BTreeSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read favorites file");
                BTreeSet::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            ids,
        }
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flips `id` and persists the set. Returns whether it is now a favorite.
    ///
    /// The in-memory set is only changed once the write succeeded.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut next = self.ids.clone();
        let now_favorite = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };
        write_set(&self.path, &next)?;
        self.ids = next;
        Ok(now_favorite)
    }

    /// Forgets every favorite and removes the backing file.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        remove_file(&self.path)?;
        self.ids.clear();
        Ok(())
    }
}

/// Removes the favorites file at `path`, if any.
pub fn remove_file(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(path, e)),
    }
}

fn write_set(path: &Path, ids: &BTreeSet<String>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let json = serde_json::to_string(ids).map_err(|e| io_error(path, e.into()))?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
