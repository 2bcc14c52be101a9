//! Session store capability
//!
//! The engine consumes persistence as an abstract synchronous key-value
//! interface over string keys and JSON string values. Backends are
//! interchangeable: an in-memory map, a single-file JSON store, a no-op
//! store for runtimes without durable storage, and a shared handle so the
//! engine and the frontend can observe one backend. All failures degrade
//! silently to defaults; the game always remains playable from a fresh deck.

pub mod file;
pub mod prefs;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub use file::FileStore;
pub use prefs::{BestScores, SoundSettings};

/// Abstract persistence capability. A dumb serialization sink: it never
/// interprets the values it holds.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Plain in-memory backend. Nothing survives the process; used by tests and
/// as the working set behind `FileStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Backend for runtimes with no storage capability at all: reads find
/// nothing, writes vanish. Preferences and best scores simply do not survive
/// a restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) {}

    fn remove(&mut self, _key: &str) {}
}

/// Cloneable handle sharing one backend between owners (engine + frontend,
/// or two engine instances in restart tests). Single-threaded by design,
/// like the rest of the game.
#[derive(Clone)]
pub struct SharedStore {
    inner: Rc<RefCell<Box<dyn KeyValueStore>>>,
}

impl SharedStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(store))),
        }
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.inner.borrow_mut().set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "1");
        assert_eq!(store.get("a"), Some("1".to_string()));

        store.set("a", "2");
        assert_eq!(store.get("a"), Some("2".to_string()));

        store.remove("a");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_null_store_swallows_everything() {
        let mut store = NullStore;
        store.set("a", "1");
        assert_eq!(store.get("a"), None);
        store.remove("a");
    }

    #[test]
    fn test_shared_store_clones_observe_one_backend() {
        let mut a = SharedStore::new(MemoryStore::new());
        let b = a.clone();

        a.set("k", "v");
        assert_eq!(b.get("k"), Some("v".to_string()));

        let mut c = b.clone();
        c.remove("k");
        assert_eq!(a.get("k"), None);
    }
}
