// ============================================================================
// STORAGE - Persisted key/value slots (localStorage in the browser)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Raw string slots. Values are stored verbatim, not JSON-encoded, so a token
/// written by this app reads back exactly the same from devtools.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage, used off-browser and in tests.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// window.localStorage through gloo.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn raw() -> web_sys::Storage {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::raw()
            .get_item(key)
            .map_err(|_| StorageError(format!("could not read '{}' from localStorage", key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::raw()
            .set_item(key, value)
            .map_err(|_| StorageError(format!("could not write '{}' to localStorage", key)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::raw()
            .remove_item(key)
            .map_err(|_| StorageError(format!("could not remove '{}' from localStorage", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("token").unwrap(), None);

        storage.set("token", "abc").unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc"));

        storage.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn clones_share_entries() {
        let storage = MemoryStorage::with_entry("token", "abc");
        let other = storage.clone();
        other.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
    }
}
