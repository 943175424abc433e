use thiserror::Error;

use stockroom_core::{PersistError, SessionError};

use crate::store::AnyStoreError;

#[derive(Debug, Error)]
pub enum StockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] AnyStoreError),

    #[error("{0}")]
    Persist(#[from] PersistError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Failed to start logging: {0}")]
    Logging(String),
}
