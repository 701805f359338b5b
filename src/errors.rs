use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures ledger failures across catalog, stock, and
/// journal operations.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Invalid price: {0} (must be greater than 0)")]
    InvalidPrice(f64),
    #[error("Invalid quantity: {0} (must be greater than 0)")]
    InvalidQuantity(i64),
    #[error("Invalid report mode: `{0}` (expected `day` or `month`)")]
    InvalidReportMode(String),
    #[error("Invalid {field}: `{value}` (must be non-empty, without commas or line breaks)")]
    InvalidField { field: &'static str, value: String },
    #[error("Item not in catalog: {0}")]
    ItemNotInCatalog(String),
    #[error("Item not in stock: {0}")]
    ItemNotInStock(String),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Duplicate item: {0}")]
    DuplicateItem(String),
    #[error("Quantity overflow for {item}: {quantity} exceeds the maximum stock level")]
    QuantityOverflow { item: String, quantity: i64 },
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u32,
        available: u32,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Partial failure for {item}: {committed} committed but {failed} failed ({source})")]
    PartialFailure {
        item: String,
        committed: &'static str,
        failed: &'static str,
        #[source]
        source: Box<ShopError>,
    },
}

pub type Result<T> = StdResult<T, ShopError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ShopError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}
