//! Directory-backed store: one file per key.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::store::Store;

#[derive(Debug, Error)]
pub enum DirStoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// A persistent store that keeps each key in its own file under a directory.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens a store rooted at `path`, creating the directory if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DirStoreError> {
        let root = path.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DirStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DirStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl Store for DirStore {
    type Error = DirStoreError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        // Atomic replace.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (DirStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn put_get() {
        let (store, _dir) = temp_store();

        store.put("inventory", b"[]").unwrap();

        assert_eq!(store.get("inventory").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn get_missing() {
        let (store, _dir) = temp_store();

        assert_eq!(store.get("inventory").unwrap(), None);
    }

    #[test]
    fn remove_missing_is_ok() {
        let (store, _dir) = temp_store();

        store.remove("inventory").unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let (store, _dir) = temp_store();

        assert!(matches!(
            store.put("../escape", b"x"),
            Err(DirStoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(DirStoreError::InvalidKey(_))));
    }

    #[test]
    fn persistence() {
        let dir = TempDir::new().unwrap();

        {
            let store = DirStore::open(dir.path()).unwrap();
            store.put("inventory", b"data survives restart").unwrap();
        }

        {
            let store = DirStore::open(dir.path()).unwrap();
            assert_eq!(
                store.get("inventory").unwrap(),
                Some(b"data survives restart".to_vec())
            );
        }
    }
}
