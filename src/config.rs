//! Server configuration
//!
//! Loaded from a TOML file named by `STOREFRONT_CONFIG`, falling back to
//! defaults when the variable is unset.

use crate::catalog::ingest::PriceParsePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the TOML config file
pub const CONFIG_ENV: &str = "STOREFRONT_CONFIG";
/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "STOREFRONT_PORT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog JSON file; located under `assets/` when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Search coalescing window in milliseconds, used by
    /// `CatalogSession::from_config`. The HTTP query endpoint does not debounce.
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default)]
    pub price_parse: PriceParsePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
            search_debounce_ms: default_debounce_ms(),
            price_parse: PriceParsePolicy::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_debounce_ms() -> u64 {
    300
}

impl Config {
    /// Loads the config file named by `STOREFRONT_CONFIG`, then applies
    /// `STOREFRONT_PORT`.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port.parse()?;
        }

        Ok(config)
    }

    pub fn search_window(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolves the catalog file, searching `./assets` then `../assets`.
    pub fn resolve_catalog_path(&self) -> PathBuf {
        if let Some(path) = &self.catalog_path {
            return path.clone();
        }

        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        locate_assets_directory(&current_dir).join("products.json")
    }
}

fn locate_assets_directory(current_dir: &Path) -> PathBuf {
    if current_dir.join("assets").exists() {
        return current_dir.join("assets");
    }

    if let Some(parent) = current_dir.parent() {
        if parent.join("assets").exists() {
            return parent.join("assets");
        }
    }

    PathBuf::from("assets")
}
