use chrono::NaiveDate;
use tempfile::TempDir;

use shop_core::config::{Config, StorePaths};
use shop_core::core::{Clock, LedgerEngine};

/// Deterministic clock so committed journal dates are stable in assertions.
pub struct PinnedClock(pub NaiveDate);

impl Clock for PinnedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn pinned_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

/// Builds an engine over stores in an isolated temp directory. The guard is
/// returned so the directory outlives the test body.
pub fn setup_engine() -> (TempDir, LedgerEngine<PinnedClock>) {
    let temp = TempDir::new().expect("create temp dir");
    let paths = StorePaths::in_dir(temp.path(), &Config::default());
    let engine = LedgerEngine::with_clock(&paths, PinnedClock(pinned_date()));
    (temp, engine)
}
