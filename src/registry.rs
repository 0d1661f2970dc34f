//! Sprite registry: the cache of observable image cells.
//!
//! The registry maps sprite keys to [`ObservableCell`]s, creating empty
//! cells lazily on first access. It is the only shared mutable state between
//! manifest loading and rendering: loaders write values in by key, bindings
//! read cells out and subscribe. Nothing is ever evicted; last write wins.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::cell::ObservableCell;
use crate::manifest::Manifest;

/// Process-lifetime cache of named image values.
///
/// Share it as `Arc<SpriteRegistry>` between loaders and bindings. All
/// operations are infallible; reading an unknown key creates its cell.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    cells: Mutex<HashMap<String, Arc<ObservableCell>>>,
}

impl SpriteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for `key`, created empty if it does not exist yet.
    ///
    /// Repeated calls return the identical cell instance; a cell is never
    /// recreated once handed out.
    pub fn get(&self, key: &str) -> Arc<ObservableCell> {
        let mut cells = self.lock();
        match cells.get(key) {
            Some(cell) => Arc::clone(cell),
            None => {
                let cell = Arc::new(ObservableCell::new());
                cells.insert(key.to_string(), Arc::clone(&cell));
                cell
            }
        }
    }

    /// Write `value` into the cell for `key`, creating the cell if absent.
    ///
    /// Subscribers of that cell are notified on the calling thread, after
    /// the registry lock is released.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        let cell = self.get(key);
        cell.set(value);
    }

    /// Merge a manifest into the registry: union with overwrite.
    ///
    /// Existing keys named by the manifest are replaced; keys the manifest
    /// does not name are untouched.
    pub fn merge(&self, manifest: &Manifest) {
        for (key, value) in manifest {
            self.set(key, value.clone());
        }
    }

    /// Point-in-time view of every key's current value.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock()
            .iter()
            .map(|(key, cell)| (key.clone(), cell.get()))
            .collect()
    }

    /// JSON object of every key's current value, keys in sorted order.
    pub fn dump(&self) -> String {
        let entries: serde_json::Map<String, Value> = self
            .snapshot()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Value::Object(entries).to_string()
    }

    /// Whether a cell exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of cells in the registry.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry has no cells.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<ObservableCell>>> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
