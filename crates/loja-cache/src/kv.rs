//! Key-Value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache over a [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap; clones share the
/// same underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Open a file-backed cache rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".lojatech")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::with_store(FileStore::open(dir)?))
    }

    /// Create an empty in-memory cache.
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Wrap an arbitrary store.
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and a `SerializeError` if the
    /// stored bytes do not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartLine>> = cache.get("lojaTechCarrinho")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("lojaTechCarrinho", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Store raw bytes without serialization.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.store.set(key, bytes)
    }

    /// Read raw bytes without deserialization.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: i64,
        qtd: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::in_memory();
        let lines = vec![Line { id: 1, qtd: 2 }];

        cache.set("cart", &lines).unwrap();
        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();

        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Line>> = cache.get("nope").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupted_blob_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", b"{not json").unwrap();

        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_store() {
        let cache = Cache::in_memory();
        let other = cache.clone();

        cache.set("theme", "roxo").unwrap();
        assert_eq!(other.get::<String>("theme").unwrap().as_deref(), Some("roxo"));
        assert_eq!(other.keys().unwrap(), vec!["theme".to_string()]);
    }

    #[test]
    fn test_file_backed_cache_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();

        Cache::open(dir.path()).unwrap().set("country", "eu").unwrap();
        let reopened = Cache::open(dir.path()).unwrap();

        assert_eq!(reopened.get::<String>("country").unwrap().as_deref(), Some("eu"));
    }
}
