//! Fjall-backed store for Stockroom.

use std::path::Path;

use fjall::{Database, Keyspace, KeyspaceCreateOptions};
use stockroom_core::Store;
use thiserror::Error;

pub const DEFAULT_KEYSPACE: &str = "stockroom";

#[derive(Debug, Error)]
#[error("Fjall error: {0}")]
pub struct FjallError(#[from] fjall::Error);

/// A persistent store backed by Fjall.
pub struct FjallStore {
    keyspace: Keyspace,
    _database: Database, // Keep keyspace alive
}

impl FjallStore {
    /// Opens a Fjall store at the given path using the default keyspace.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FjallError> {
        Self::open_keyspace(path, DEFAULT_KEYSPACE)
    }

    /// Opens a Fjall store at the given path with a specific keyspace name.
    pub fn open_keyspace(path: impl AsRef<Path>, keyspace: &str) -> Result<Self, FjallError> {
        let database = Database::builder(path).open()?;
        let keyspace = database.keyspace(keyspace, || KeyspaceCreateOptions::default())?;
        Ok(Self {
            keyspace,
            _database: database,
        })
    }
}

impl Store for FjallStore {
    type Error = FjallError;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.keyspace.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.keyspace.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.keyspace.remove(key.as_bytes())?;
        Ok(())
    }
}
