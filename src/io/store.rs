use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::filter::Filter;
use crate::model::item::{TaskItem, normalize_text};

/// Key holding the JSON array of items
pub const ITEMS_KEY: &str = "todo.items.v1";
/// Key holding the selected filter name
pub const FILTER_KEY: &str = "todo.filter.v1";

/// Error type for store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("could not serialize items: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::WriteError {
            path: dir.clone(),
            source: e,
        })?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadError { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        atomic_write(&path, value.as_bytes())
            .map_err(|e| StoreError::WriteError { path, source: e })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Non-durable store, for tests and `--memory` sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Typed access
// ---------------------------------------------------------------------------

/// Items and filter on top of a [`KeyValueStore`].
///
/// Loading never fails: missing, unreadable, or malformed data comes back as
/// an empty list (or the `all` filter) and the problem is logged.
#[derive(Debug, Clone)]
pub struct PersistentStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub fn new(backend: S) -> Self {
        PersistentStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the saved items, or an empty list
    pub fn load(&self) -> Vec<TaskItem> {
        let raw = match self.backend.get(ITEMS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved items, starting empty");
                return Vec::new();
            }
        };
        parse_items(&raw)
    }

    /// Replace the saved items with `items`
    pub fn save(&mut self, items: &[TaskItem]) -> Result<(), StoreError> {
        let content = serde_json::to_string(items)?;
        self.backend.set(ITEMS_KEY, &content)
    }

    /// Read the saved filter; `all` when absent or unrecognized
    pub fn load_filter(&self) -> Filter {
        match self.backend.get(FILTER_KEY) {
            Ok(Some(raw)) => Filter::from_name_or_default(&raw),
            Ok(None) => Filter::All,
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved filter");
                Filter::All
            }
        }
    }

    pub fn save_filter(&mut self, filter: Filter) -> Result<(), StoreError> {
        self.backend.set(FILTER_KEY, filter.name())
    }
}

/// Parse the persisted items value. `null` and malformed input yield `[]`.
///
/// Records that break the item invariants are repaired or dropped: text is
/// trimmed, blank text is dropped, and only the first record with a given id
/// is kept.
pub fn parse_items(raw: &str) -> Vec<TaskItem> {
    match serde_json::from_str::<Option<Vec<TaskItem>>>(raw) {
        Ok(items) => sanitize_items(items.unwrap_or_default()),
        Err(e) => {
            tracing::warn!(error = %e, "saved items are malformed, starting empty");
            Vec::new()
        }
    }
}

fn sanitize_items(items: Vec<TaskItem>) -> Vec<TaskItem> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());
    for mut item in items {
        let Some(text) = normalize_text(&item.text) else {
            tracing::warn!(id = %item.id, "dropping saved item with blank text");
            continue;
        };
        if text.len() != item.text.len() {
            tracing::warn!(id = %item.id, "trimming saved item text");
            item.text = text.to_string();
        }
        if !seen.insert(item.id.clone()) {
            tracing::warn!(id = %item.id, "dropping saved item with duplicate id");
            continue;
        }
        kept.push(item);
    }
    kept
}
