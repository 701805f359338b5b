use crate::errors::{Result, ShopError};

use super::checked_field;

/// A sellable item in the catalog: a case-insensitively unique name and a
/// selling price. Immutable once added.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub unit_price: f64,
}

impl CatalogItem {
    /// Builds a validated catalog item. The name must fit the line format
    /// and the price must be positive and finite.
    pub fn new(name: &str, unit_price: f64) -> Result<Self> {
        let name = checked_field("item name", name)?;
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(ShopError::InvalidPrice(unit_price));
        }
        Ok(Self { name, unit_price })
    }

    /// Case-insensitive name match used for catalog uniqueness and lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub fn encode_line(&self) -> String {
        format!("{},{:.2}", self.name, self.unit_price)
    }

    pub fn decode_line(line: &str) -> Option<Self> {
        let (name, price) = line.split_once(',')?;
        let unit_price: f64 = price.trim().parse().ok()?;
        if name.trim().is_empty() || !unit_price.is_finite() || unit_price <= 0.0 {
            return None;
        }
        Some(Self {
            name: name.trim().to_string(),
            unit_price,
        })
    }
}
