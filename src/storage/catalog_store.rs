use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::errors::{Result, ShopError};
use crate::ledger::CatalogItem;

use super::{ensure_dir, read_records};

/// Catalog of sellable items, one `name,price` line per item in insertion
/// order. Names are unique under case-insensitive comparison; items are
/// immutable once added, so commits are plain appends.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All catalog items in insertion (file) order.
    pub fn items(&self) -> Result<Vec<CatalogItem>> {
        read_records(&self.path, "catalog", CatalogItem::decode_line)
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Result<Option<CatalogItem>> {
        Ok(self.items()?.into_iter().find(|item| item.matches(name)))
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.find(name)?.is_some())
    }

    /// Validates and commits a new item. Fails with `DuplicateItem` when the
    /// name collides case-insensitively with an existing entry.
    pub fn add_item(&self, name: &str, unit_price: f64) -> Result<CatalogItem> {
        let item = CatalogItem::new(name, unit_price)?;
        if let Some(existing) = self.find(&item.name)? {
            return Err(ShopError::DuplicateItem(existing.name));
        }
        self.append(&item)?;
        info!(item = %item.name, price = item.unit_price, "catalog item added");
        Ok(item)
    }

    fn append(&self, item: &CatalogItem) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", item.encode_line())?;
        file.flush()?;
        Ok(())
    }
}
