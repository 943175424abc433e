use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::StockError;

pub const LOG_ENV: &str = "STOCKROOM_LOG";
pub const LOG_FILE: &str = "stockroom.log";
/// Filter used when `STOCKROOM_LOG` is unset.
pub const DEFAULT_FILTER: &str = "stockroom_core=info,stockroom_fjall=info,stock=info";

/// Sends tracing output to `<dir>/stockroom.log`; the terminal belongs to the UI.
pub fn init(dir: &Path) -> Result<(), StockError> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| StockError::Logging(e.to_string()))
}
