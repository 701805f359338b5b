//! Ledger domain models and their line-oriented wire codecs.

pub mod catalog;
pub mod journal;
pub mod stock;

pub use catalog::CatalogItem;
pub use journal::{JournalRecord, PurchaseEvent, SaleEvent};
pub use stock::StockEntry;

use crate::errors::{Result, ShopError};

/// Date format shared by both journals.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates a free-text field against the line-oriented store format.
///
/// Records are one-per-line with comma-separated fields, so names must be
/// non-empty and free of commas and line breaks. The trimmed value is
/// returned for storage.
pub fn checked_field(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains(',') || trimmed.contains('\n') || trimmed.contains('\r')
    {
        return Err(ShopError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
