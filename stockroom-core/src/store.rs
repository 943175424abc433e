use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::RwLock;

/// A string-keyed store for raw bytes.
///
/// Stores know nothing about items; encoding and decoding is handled by
/// [`crate::persist`]. All methods take `&self` so that backends with
/// internal locking (e.g. Fjall) fit the same shape.
pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the bytes stored under `key`, or None if not present.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stores bytes under `key`, replacing any prior value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: Store> Store for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        (*self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        (*self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (*self).remove(key)
    }
}

/// An in-memory store backed by a HashMap.
///
/// Useful for testing and as a reference implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.data.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_put_get() {
        let store = MemoryStore::new();

        store.put("inventory", b"[]").unwrap();
        let retrieved = store.get("inventory").unwrap();

        assert_eq!(retrieved, Some(b"[]".to_vec()));
    }

    #[test]
    fn memory_store_get_missing() {
        let store = MemoryStore::new();

        assert_eq!(store.get("inventory").unwrap(), None);
    }

    #[test]
    fn memory_store_overwrite() {
        let store = MemoryStore::new();

        store.put("inventory", b"first").unwrap();
        store.put("inventory", b"second").unwrap();

        assert_eq!(store.get("inventory").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn memory_store_remove() {
        let store = MemoryStore::new();

        store.put("inventory", b"[]").unwrap();
        store.remove("inventory").unwrap();
        store.remove("never-written").unwrap();

        assert_eq!(store.get("inventory").unwrap(), None);
    }
}
