use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShopError};
use crate::storage::ensure_dir;

const CONFIG_FILE: &str = "config.json";

pub const CATALOG_FILE: &str = "catalog.csv";
pub const STOCK_FILE: &str = "stock.csv";
pub const SALES_FILE: &str = "sales.csv";
pub const PURCHASES_FILE: &str = "purchases.csv";

/// Environment variable overriding the base data directory.
pub const DATA_DIR_ENV: &str = "SHOP_CORE_DATA_DIR";

/// Persisted settings. Store file names can be overridden so an existing
/// installation with legacy file names keeps working.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchases_file: Option<String>,
}

/// Resolves the base data directory and the four store paths inside it.
pub struct PathResolver;

impl PathResolver {
    /// Base directory precedence: `SHOP_CORE_DATA_DIR`, the platform data
    /// dir, then a dotted folder in the working directory.
    pub fn base_dir() -> PathBuf {
        Self::resolve_base(None)
    }

    pub fn resolve_base(explicit: Option<PathBuf>) -> PathBuf {
        if let Some(base) = explicit {
            return base;
        }
        if let Some(base) = env::var_os(DATA_DIR_ENV) {
            return PathBuf::from(base);
        }
        dirs::data_dir()
            .map(|dir| dir.join("shop_core"))
            .unwrap_or_else(|| PathBuf::from(".shop_core"))
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Loads and saves the JSON config file under a base directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)
                .map_err(|err| ShopError::Storage(format!("invalid config file: {err}")))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ShopError::Storage(format!("config serialization failed: {err}")))?;
        crate::storage::write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolved locations of the four persisted stores.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub catalog: PathBuf,
    pub stock: PathBuf,
    pub sales: PathBuf,
    pub purchases: PathBuf,
}

impl StorePaths {
    pub fn in_dir(base: &Path, config: &Config) -> Self {
        Self {
            catalog: base.join(config.catalog_file.as_deref().unwrap_or(CATALOG_FILE)),
            stock: base.join(config.stock_file.as_deref().unwrap_or(STOCK_FILE)),
            sales: base.join(config.sales_file.as_deref().unwrap_or(SALES_FILE)),
            purchases: base.join(config.purchases_file.as_deref().unwrap_or(PURCHASES_FILE)),
        }
    }
}
