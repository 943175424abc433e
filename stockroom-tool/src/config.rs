use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::store::{default_store_path, StoreType};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub r#type: StoreType,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    /// How long confirmation messages stay on screen
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_secs: default_notice_secs(),
        }
    }
}

impl UiConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }
}

fn default_notice_secs() -> u64 {
    3
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stockroom").join("config.toml"))
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unparsable config");
        Config::default()
    })
}

pub fn resolve_store_config(
    cli_type: Option<StoreType>,
    cli_path: Option<PathBuf>,
    config: &Config,
) -> (StoreType, PathBuf) {
    let store_type = cli_type.unwrap_or(config.store.r#type);
    let store_path = cli_path
        .or_else(|| config.store.path.clone())
        .unwrap_or_else(default_store_path);

    (store_type, store_path)
}
