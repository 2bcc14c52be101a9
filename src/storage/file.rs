//! File-backed key-value store
//!
//! One JSON object per save file, loaded whole at open and written through on
//! every mutation. Any I/O or parse failure degrades to an empty working set
//! or a dropped write; persistence is a convenience, never a hard dependency.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::KeyValueStore;

pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. Never fails: unreadable
    /// or malformed files start the session with an empty working set.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self) {
        if let Ok(raw) = serde_json::to_string_pretty(&self.entries) {
            // Write errors leave the previous file contents in place.
            let _ = fs::write(&self.path, raw);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path(tag: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "tui-memory-test-{}-{}-{}.json",
            std::process::id(),
            tag,
            n
        ))
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = FileStore::open(&path);
            store.set("score", "42");
        }
        let store = FileStore::open(&path);
        assert_eq!(store.get("score"), Some("42".to_string()));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_remove_persists() {
        let path = temp_path("remove");
        {
            let mut store = FileStore::open(&path);
            store.set("a", "1");
            store.remove("a");
        }
        let store = FileStore::open(&path);
        assert_eq!(store.get("a"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json {{{").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = FileStore::open(temp_path("missing"));
        assert_eq!(store.get("anything"), None);
    }
}
