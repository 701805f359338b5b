use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::errors::{Result, ShopError};
use crate::ledger::{JournalRecord, PurchaseEvent, SaleEvent};
use crate::storage::Journal;

/// Reporting period: a single calendar day or a whole calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Day,
    Month,
}

impl ReportMode {
    fn covers(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            ReportMode::Day => date == reference,
            ReportMode::Month => {
                date.year() == reference.year() && date.month() == reference.month()
            }
        }
    }
}

impl FromStr for ReportMode {
    type Err = ShopError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "day" | "d" | "daily" => Ok(ReportMode::Day),
            "month" | "m" | "monthly" => Ok(ReportMode::Month),
            other => Err(ShopError::InvalidReportMode(other.to_string())),
        }
    }
}

/// Period totals from both journals. Net at or above zero is a profit,
/// below zero a loss of the absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfitLoss {
    pub total_sales: f64,
    pub total_purchases: f64,
}

impl ProfitLoss {
    pub fn net(&self) -> f64 {
        self.total_sales - self.total_purchases
    }

    pub fn is_profit(&self) -> bool {
        self.net() >= 0.0
    }
}

/// Scans both journals and sums amounts falling inside the period around
/// `reference`. Empty or missing journals contribute zero; that is a valid
/// result, not an error.
pub fn report(
    sales: &Journal<SaleEvent>,
    purchases: &Journal<PurchaseEvent>,
    mode: ReportMode,
    reference: NaiveDate,
) -> Result<ProfitLoss> {
    Ok(ProfitLoss {
        total_sales: sum_in_period(&sales.scan()?, mode, reference),
        total_purchases: sum_in_period(&purchases.scan()?, mode, reference),
    })
}

fn sum_in_period<R: JournalRecord>(records: &[R], mode: ReportMode, reference: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|record| mode.covers(record.date(), reference))
        .map(|record| record.amount())
        .sum()
}
