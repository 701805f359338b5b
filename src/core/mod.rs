//! Business logic over the persisted stores: the ledger engine and the
//! profit/loss aggregation.

pub mod engine;
pub mod report;

pub use engine::{
    Clock, FixedPricer, LedgerEngine, NewItemPricer, PurchaseOutcome, Receipt, RemoveOutcome,
    StockCorrection, SystemClock,
};
pub use report::{report, ProfitLoss, ReportMode};
