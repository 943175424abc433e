//! Whole-inventory persistence on top of a [`Store`].

use thiserror::Error;
use tracing::{debug, warn};

use crate::item::Item;
use crate::store::Store;

/// Key under which the JSON-encoded inventory lives.
pub const INVENTORY_KEY: &str = "inventory";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to encode inventory: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reads the full inventory.
///
/// Missing, unreadable or corrupt data all yield an empty inventory. A
/// record that does not decode is skipped without losing its neighbours.
pub fn load<S: Store>(store: &S) -> Vec<Item> {
    let bytes = match store.get(INVENTORY_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "could not read inventory; starting empty");
            return Vec::new();
        }
    };

    let records = match serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "stored inventory is corrupt; starting empty");
            return Vec::new();
        }
    };

    let stored = records.len();
    let items: Vec<Item> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable inventory record");
                None
            }
        })
        .collect();
    debug!(count = items.len(), stored, "inventory loaded");
    items
}

/// Serializes the full inventory and replaces whatever was stored before.
pub fn save<S: Store>(store: &S, items: &[Item]) -> Result<(), PersistError> {
    let bytes = serde_json::to_vec(items)?;
    store
        .put(INVENTORY_KEY, &bytes)
        .map_err(|e| PersistError::Store(Box::new(e)))?;
    debug!(count = items.len(), bytes = bytes.len(), "inventory saved");
    Ok(())
}
