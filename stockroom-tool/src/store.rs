use std::path::{Path, PathBuf};

use serde::Deserialize;
use stockroom_core::{DirStore, DirStoreError, Store};
use stockroom_fjall::{FjallError, FjallStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnyStoreError {
    #[error("fjall error: {0}")]
    Fjall(#[from] FjallError),
    #[error("directory store error: {0}")]
    Dir(#[from] DirStoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    #[default]
    Fjall,
    Dir,
}

impl std::str::FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fjall" => Ok(StoreType::Fjall),
            "dir" | "directory" => Ok(StoreType::Dir),
            _ => Err(format!("unknown store type: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::Fjall => write!(f, "fjall"),
            StoreType::Dir => write!(f, "dir"),
        }
    }
}

/// Runtime-dispatched store.
pub enum AnyStore {
    Fjall(FjallStore),
    Dir(DirStore),
}

impl AnyStore {
    pub fn open(store_type: StoreType, path: impl AsRef<Path>) -> Result<Self, AnyStoreError> {
        match store_type {
            StoreType::Fjall => Ok(Self::Fjall(FjallStore::open(path)?)),
            StoreType::Dir => Ok(Self::Dir(DirStore::open(path)?)),
        }
    }
}

impl Store for AnyStore {
    type Error = AnyStoreError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.get(key).map_err(Into::into),
            AnyStore::Dir(s) => s.get(key).map_err(Into::into),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.put(key, value).map_err(Into::into),
            AnyStore::Dir(s) => s.put(key, value).map_err(Into::into),
        }
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match self {
            AnyStore::Fjall(s) => s.remove(key).map_err(Into::into),
            AnyStore::Dir(s) => s.remove(key).map_err(Into::into),
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockroom")
}

pub fn default_store_path() -> PathBuf {
    data_dir().join("store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_store_type() {
        assert_eq!("fjall".parse(), Ok(StoreType::Fjall));
        assert_eq!("DIR".parse(), Ok(StoreType::Dir));
        assert_eq!("directory".parse(), Ok(StoreType::Dir));
        assert!("rocks".parse::<StoreType>().is_err());
    }

    #[test]
    fn both_backends_round_trip() {
        for store_type in [StoreType::Fjall, StoreType::Dir] {
            let dir = TempDir::new().unwrap();
            let store = AnyStore::open(store_type, dir.path()).unwrap();

            store.put("inventory", b"[]").unwrap();
            assert_eq!(store.get("inventory").unwrap(), Some(b"[]".to_vec()), "{}", store_type);

            store.remove("inventory").unwrap();
            assert_eq!(store.get("inventory").unwrap(), None, "{}", store_type);
        }
    }
}
