//! Key-value preference storage.
//!
//! Mirrors the browser `Storage` API: string keys, string values, one key per
//! write. In the browser this is `localStorage`; tests and native hosts use
//! [`MemoryStorage`].

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },
}

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map, so a clone handed to a new
/// state manager sees what the previous one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}

/// Read a JSON value; missing, unreadable or corrupt keys give `None`.
///
/// Bare tokens written without JSON quotes (`bar` instead of `"bar"`) are
/// accepted as strings.
pub fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("{}", e);
            return None;
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(_) => match serde_json::from_value::<T>(serde_json::Value::String(raw.clone())) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring corrupt value under '{}': {}", key, e);
                None
            }
        },
    }
}

/// Write a JSON value. Failures are logged, never propagated.
pub fn write_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("failed to serialize '{}': {}", key, e);
            return;
        }
    };
    if let Err(e) = store.set_item(key, &json) {
        log::warn!("{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                message: "quota".into(),
            })
        }
        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "quota".into(),
            })
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_clones_share_items() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set_item("k", "v").unwrap();
        assert_eq!(b.get_item("k").unwrap().as_deref(), Some("v"));
        b.remove_item("k").unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_read_json_variants() {
        let store = MemoryStorage::new();
        store.set_item("quoted", "\"bar\"").unwrap();
        store.set_item("bare", "bar").unwrap();
        store.set_item("object", r#"{"a":1}"#).unwrap();
        store.set_item("broken", "{not json").unwrap();

        assert_eq!(read_json::<String>(&store, "quoted").as_deref(), Some("bar"));
        assert_eq!(read_json::<String>(&store, "bare").as_deref(), Some("bar"));
        let map: BTreeMap<String, i32> = read_json(&store, "object").unwrap();
        assert_eq!(map.get("a"), Some(&1));
        assert!(read_json::<BTreeMap<String, i32>>(&store, "broken").is_none());
        assert!(read_json::<String>(&store, "missing").is_none());
    }

    #[test]
    fn test_broken_storage_degrades() {
        assert!(read_json::<String>(&BrokenStorage, "any").is_none());
        write_json(&BrokenStorage, "any", &"value");
    }
}
