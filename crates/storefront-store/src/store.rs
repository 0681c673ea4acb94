//! Document store with automatic JSON serialization.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::RwLock;

/// Separator between a collection name and a document id in storage keys.
const KEY_SEPARATOR: char = ':';

/// Type-safe document store.
///
/// Documents are grouped into named collections and stored as JSON under
/// `"{collection}:{id}"` keys. On `wasm32` the backing store is Spin's
/// Key-Value Store; elsewhere documents live in memory and can be
/// persisted to a JSON snapshot file.
pub struct Store {
    #[cfg(target_arch = "wasm32")]
    kv: spin_sdk::key_value::Store,
    #[cfg(not(target_arch = "wasm32"))]
    docs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl Store {
    /// Open the default Key-Value store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = Store::open_default()?;
    /// ```
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, StoreError> {
        let kv = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StoreError::OpenError(e.to_string()))?;
        Ok(Self { kv })
    }

    /// Open a named Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let kv = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StoreError::OpenError(e.to_string()))?;
        Ok(Self { kv })
    }

    #[cfg(target_arch = "wasm32")]
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.kv
            .get(key)
            .map_err(|e| StoreError::StoreError(e.to_string()))
    }

    #[cfg(target_arch = "wasm32")]
    fn write_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.kv
            .set(key, &bytes)
            .map_err(|e| StoreError::StoreError(e.to_string()))
    }

    #[cfg(target_arch = "wasm32")]
    fn remove_raw(&self, key: &str) -> Result<bool, StoreError> {
        let existed = self
            .kv
            .exists(key)
            .map_err(|e| StoreError::StoreError(e.to_string()))?;
        if existed {
            self.kv
                .delete(key)
                .map_err(|e| StoreError::StoreError(e.to_string()))?;
        }
        Ok(existed)
    }

    #[cfg(target_arch = "wasm32")]
    fn all_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = self
            .kv
            .get_keys()
            .map_err(|e| StoreError::StoreError(e.to_string()))?;
        keys.sort();
        Ok(keys)
    }

    /// Open the default store.
    ///
    /// Outside of Spin this is an empty in-memory store.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::in_memory())
    }

    /// Open a named store (in-memory outside of Spin).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(_name: &str) -> Result<Self, StoreError> {
        Ok(Self::in_memory())
    }

    /// Create an empty in-memory store.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn in_memory() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load a store from a JSON snapshot file.
    ///
    /// A missing file yields an empty store.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::in_memory());
        }

        let content = std::fs::read(path)?;
        let snapshot: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(&content)?;

        let mut docs = BTreeMap::new();
        for (key, value) in snapshot {
            docs.insert(key, serde_json::to_vec(&value)?);
        }

        Ok(Self {
            docs: RwLock::new(docs),
        })
    }

    /// Write every document to a JSON snapshot file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::Poisoned)?;

        let mut snapshot = serde_json::Map::new();
        for (key, bytes) in docs.iter() {
            snapshot.insert(key.clone(), serde_json::from_slice(bytes)?);
        }

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_vec_pretty(&snapshot)?)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.get(key).cloned())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut docs = self.docs.write().map_err(|_| StoreError::Poisoned)?;
        docs.insert(key.to_string(), bytes);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn remove_raw(&self, key: &str) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.remove(key).is_some())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn all_keys(&self) -> Result<Vec<String>, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.keys().cloned().collect())
    }

    /// Get a document from a collection.
    ///
    /// Returns `None` if the document doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let region: Option<Region> = store.get("regions", "r-1")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>, StoreError> {
        match self.read_raw(&doc_key(collection, id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a document.
    pub fn put<T: Serialize>(&self, collection: &str, id: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.write_raw(&doc_key(collection, id), bytes)
    }

    /// Delete a document. Returns whether it existed.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.remove_raw(&doc_key(collection, id))
    }

    /// Check if a document exists.
    pub fn exists(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self.read_raw(&doc_key(collection, id))?.is_some())
    }

    /// List the ids in a collection, in key order.
    pub fn ids(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let prefix = format!("{}{}", collection, KEY_SEPARATOR);
        Ok(self
            .all_keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }

    /// Load every document in a collection, in id order.
    pub fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let mut out = Vec::new();
        for id in self.ids(collection)? {
            if let Some(doc) = self.get(collection, &id)? {
                out.push(doc);
            }
        }
        Ok(out)
    }
}

/// Build the storage key for a document.
pub fn doc_key(collection: &str, id: &str) -> String {
    format!("{}{}{}", collection, KEY_SEPARATOR, id)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        active: bool,
    }

    fn doc(name: &str) -> Doc {
        Doc {
            name: name.to_string(),
            active: true,
        }
    }

    #[test]
    fn test_put_and_get() {
        let store = Store::in_memory();
        store.put("regions", "r1", &doc("North")).unwrap();

        let loaded: Option<Doc> = store.get("regions", "r1").unwrap();
        assert_eq!(loaded, Some(doc("North")));
    }

    #[test]
    fn test_get_missing() {
        let store = Store::in_memory();
        let loaded: Option<Doc> = store.get("regions", "missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_delete_reports_existence() {
        let store = Store::in_memory();
        store.put("regions", "r1", &doc("North")).unwrap();

        assert!(store.delete("regions", "r1").unwrap());
        assert!(!store.delete("regions", "r1").unwrap());
        assert!(!store.exists("regions", "r1").unwrap());
    }

    #[test]
    fn test_collections_are_isolated() {
        let store = Store::in_memory();
        store.put("regions", "a", &doc("North")).unwrap();
        store.put("products", "a", &doc("Honey")).unwrap();
        store.put("regionsx", "b", &doc("Other")).unwrap();

        let regions: Vec<Doc> = store.list("regions").unwrap();
        assert_eq!(regions, vec![doc("North")]);
        assert_eq!(store.ids("products").unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let dir = std::env::temp_dir().join(format!("storefront-store-{}", std::process::id()));
        let path = dir.join("snapshot.json");

        let store = Store::in_memory();
        store.put("regions", "r1", &doc("North")).unwrap();
        store.save_snapshot(&path).unwrap();

        let reloaded = Store::load_snapshot(&path).unwrap();
        let loaded: Option<Doc> = reloaded.get("regions", "r1").unwrap();
        assert_eq!(loaded, Some(doc("North")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let store = Store::load_snapshot("/nonexistent/storefront/snapshot.json").unwrap();
        assert!(store.ids("regions").unwrap().is_empty());
    }

    #[test]
    fn test_doc_key() {
        assert_eq!(doc_key("regions", "r1"), "regions:r1");
    }
}
