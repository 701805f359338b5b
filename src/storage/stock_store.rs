use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{Result, ShopError};
use crate::ledger::StockEntry;

use super::{read_records, write_atomic};

/// On-hand quantities, one `name,quantity` line per item. The store is
/// key-addressed: adjustments target the single canonical entry for an item
/// and commit through an atomic rewrite, so repeated purchases merge instead
/// of stacking duplicate records.
pub struct StockStore {
    path: PathBuf,
}

impl StockStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> Result<Vec<StockEntry>> {
        read_records(&self.path, "stock", StockEntry::decode_line)
    }

    /// Current quantity for `name`, or `ItemNotInStock`.
    pub fn quantity(&self, name: &str) -> Result<u32> {
        self.entries()?
            .iter()
            .find(|entry| entry.matches(name))
            .map(|entry| entry.quantity)
            .ok_or_else(|| ShopError::ItemNotInStock(name.trim().to_string()))
    }

    /// Applies `delta` to the entry for `name`, creating it when absent and
    /// `delta` is positive. The resulting quantity is validated before
    /// anything is written, so the on-disk store never goes negative.
    pub fn adjust(&self, name: &str, delta: i64) -> Result<u32> {
        let mut entries = self.entries()?;
        let position = entries.iter().position(|entry| entry.matches(name));

        let new_quantity = match position {
            Some(index) => {
                let current = i64::from(entries[index].quantity);
                let updated = current + delta;
                if updated < 0 {
                    return Err(ShopError::InsufficientStock {
                        item: entries[index].name.clone(),
                        requested: delta.unsigned_abs() as u32,
                        available: entries[index].quantity,
                    });
                }
                let updated = checked_level(&entries[index].name, updated)?;
                entries[index].quantity = updated;
                updated
            }
            None if delta > 0 => {
                let quantity = checked_level(name.trim(), delta)?;
                entries.push(StockEntry::new(name.trim(), quantity));
                quantity
            }
            None => return Err(ShopError::ItemNotInStock(name.trim().to_string())),
        };

        self.rewrite(&entries)?;
        info!(item = %name.trim(), delta, quantity = new_quantity, "stock adjusted");
        Ok(new_quantity)
    }

    /// Deletes the entry for `name`, returning it. `ItemNotFound` when absent.
    pub fn remove(&self, name: &str) -> Result<StockEntry> {
        let mut entries = self.entries()?;
        let position = entries
            .iter()
            .position(|entry| entry.matches(name))
            .ok_or_else(|| ShopError::ItemNotFound(name.trim().to_string()))?;
        let removed = entries.remove(position);
        self.rewrite(&entries)?;
        info!(item = %removed.name, "stock entry removed");
        Ok(removed)
    }

    /// Replaces the quantity of an existing entry, used by reconciliation.
    pub fn set_quantity(&self, name: &str, quantity: u32) -> Result<()> {
        let mut entries = self.entries()?;
        let entry = entries
            .iter_mut()
            .find(|entry| entry.matches(name))
            .ok_or_else(|| ShopError::ItemNotFound(name.trim().to_string()))?;
        entry.quantity = quantity;
        self.rewrite(&entries)
    }

    fn rewrite(&self, entries: &[StockEntry]) -> Result<()> {
        let mut data = String::new();
        for entry in entries {
            data.push_str(&entry.encode_line());
            data.push('\n');
        }
        write_atomic(&self.path, &data)
    }
}

fn checked_level(item: &str, quantity: i64) -> Result<u32> {
    u32::try_from(quantity).map_err(|_| ShopError::QuantityOverflow {
        item: item.to_string(),
        quantity,
    })
}
