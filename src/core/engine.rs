use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::StorePaths;
use crate::errors::{Result, ShopError};
use crate::ledger::{checked_field, PurchaseEvent, SaleEvent};
use crate::storage::{CatalogStore, Journal, StockStore};

/// Supplies "today" for journal records. Swappable in tests so committed
/// dates are deterministic.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the local system date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Capability consulted when a purchase names an item missing from the
/// catalog: the caller supplies a selling price to onboard it, or `None` to
/// abort the purchase before any write happens.
pub trait NewItemPricer {
    fn selling_price_for(&mut self, item: &str) -> Option<f64>;
}

/// A pre-decided pricing answer, for non-interactive callers and tests.
pub struct FixedPricer(pub Option<f64>);

impl NewItemPricer for FixedPricer {
    fn selling_price_for(&mut self, _item: &str) -> Option<f64> {
        self.0
    }
}

/// Outcome of a committed sell or purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receipt {
    pub total: f64,
    pub new_quantity: u32,
}

/// A purchase either commits with a receipt or is cancelled by the caller
/// declining to onboard a new item. Cancellation is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseOutcome {
    Committed(Receipt),
    Cancelled,
}

/// A removal either deletes the stock entry or is declined by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed { quantity: u32 },
    Declined,
}

/// One stock fix applied by [`LedgerEngine::reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct StockCorrection {
    pub item: String,
    pub recorded: u32,
    pub expected: u32,
}

/// Orchestrates sell, purchase, and removal across the catalog, the stock
/// store, and the two journals.
///
/// Every mutating operation takes `&mut self`, which is the single-user
/// critical section: the read-validate-write sequence inside one call can
/// never interleave with another. The persisted files are the sole source of
/// truth; nothing is cached across calls.
///
/// Transactions commit journal-first: the append-only journal is the durable,
/// recoverable half, so a failure on the following stock write surfaces as
/// [`ShopError::PartialFailure`] and [`LedgerEngine::reconcile`] can repair
/// the stock store from the journals afterwards.
///
/// Removal deliberately touches only stock, so an item can remain in the
/// catalog with no stock on hand. A catalog-removal operation is a possible
/// extension, not part of this engine.
pub struct LedgerEngine<C: Clock = SystemClock> {
    catalog: CatalogStore,
    stock: StockStore,
    sales: Journal<SaleEvent>,
    purchases: Journal<PurchaseEvent>,
    clock: C,
}

impl LedgerEngine<SystemClock> {
    pub fn new(paths: &StorePaths) -> Self {
        Self::with_clock(paths, SystemClock)
    }
}

impl<C: Clock> LedgerEngine<C> {
    pub fn with_clock(paths: &StorePaths, clock: C) -> Self {
        Self {
            catalog: CatalogStore::new(&paths.catalog),
            stock: StockStore::new(&paths.stock),
            sales: Journal::new(&paths.sales),
            purchases: Journal::new(&paths.purchases),
            clock,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn stock(&self) -> &StockStore {
        &self.stock
    }

    pub fn sales(&self) -> &Journal<SaleEvent> {
        &self.sales
    }

    pub fn purchases(&self) -> &Journal<PurchaseEvent> {
        &self.purchases
    }

    /// Adds a new catalog item with a selling price.
    pub fn add_item(&mut self, name: &str, price: f64) -> Result<crate::ledger::CatalogItem> {
        self.catalog.add_item(name, price)
    }

    /// Sells `quantity` of `item` to `customer`.
    ///
    /// Validation: the item must exist in the catalog, a stock entry must
    /// exist, and the requested quantity must not exceed what is available.
    /// All checks run before the first write, so a rejected sale leaves every
    /// store untouched. On success the sale is journaled first, then stock is
    /// decremented.
    pub fn sell(&mut self, customer: &str, item: &str, quantity: u32) -> Result<Receipt> {
        let customer = checked_field("customer", customer)?;
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity(0));
        }

        let catalog_item = self
            .catalog
            .find(item)?
            .ok_or_else(|| ShopError::ItemNotInCatalog(item.trim().to_string()))?;
        let available = self.stock.quantity(&catalog_item.name)?;
        if quantity > available {
            return Err(ShopError::InsufficientStock {
                item: catalog_item.name,
                requested: quantity,
                available,
            });
        }

        let total = f64::from(quantity) * catalog_item.unit_price;
        let event = SaleEvent {
            customer: customer.clone(),
            item: catalog_item.name.clone(),
            amount: total,
            date: self.clock.today(),
        };
        self.sales.append(&event)?;

        let new_quantity = self
            .stock
            .adjust(&catalog_item.name, -i64::from(quantity))
            .map_err(|err| partial_failure(&catalog_item.name, "sale journal append", "stock decrement", err))?;

        info!(
            item = %catalog_item.name,
            customer = %customer,
            quantity,
            total,
            "sale committed"
        );
        Ok(Receipt { total, new_quantity })
    }

    /// Purchases `quantity` of `item` from `supplier` at `unit_price` each.
    ///
    /// An item missing from the catalog is onboarded through `pricer` before
    /// anything is written; a declined onboarding cancels the purchase with
    /// zero side effects. On success the purchase is journaled first, then
    /// merged into the single canonical stock entry for the item.
    pub fn purchase(
        &mut self,
        supplier: &str,
        item: &str,
        quantity: u32,
        unit_price: f64,
        pricer: &mut dyn NewItemPricer,
    ) -> Result<PurchaseOutcome> {
        let supplier = checked_field("supplier", supplier)?;
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity(0));
        }
        if !unit_price.is_finite() || unit_price <= 0.0 {
            return Err(ShopError::InvalidPrice(unit_price));
        }

        let catalog_item = match self.catalog.find(item)? {
            Some(existing) => existing,
            None => {
                let item = checked_field("item name", item)?;
                match pricer.selling_price_for(&item) {
                    Some(selling_price) => self.catalog.add_item(&item, selling_price)?,
                    None => {
                        info!(item = %item, "purchase cancelled: item not onboarded");
                        return Ok(PurchaseOutcome::Cancelled);
                    }
                }
            }
        };

        let total = f64::from(quantity) * unit_price;
        let event = PurchaseEvent {
            supplier: supplier.clone(),
            item: catalog_item.name.clone(),
            quantity,
            amount: total,
            date: self.clock.today(),
        };
        self.purchases.append(&event)?;

        let new_quantity = self
            .stock
            .adjust(&catalog_item.name, i64::from(quantity))
            .map_err(|err| {
                partial_failure(&catalog_item.name, "purchase journal append", "stock merge", err)
            })?;

        info!(
            item = %catalog_item.name,
            supplier = %supplier,
            quantity,
            total,
            "purchase committed"
        );
        Ok(PurchaseOutcome::Committed(Receipt { total, new_quantity }))
    }

    /// Removes the stock entry for `item`. Requires `confirmed = true`; a
    /// declined confirmation is a no-op, not an error. The catalog entry is
    /// left intact.
    pub fn remove_item(&mut self, item: &str, confirmed: bool) -> Result<RemoveOutcome> {
        if !confirmed {
            return Ok(RemoveOutcome::Declined);
        }
        let removed = self.stock.remove(item)?;
        info!(item = %removed.name, quantity = removed.quantity, "stock entry removed");
        Ok(RemoveOutcome::Removed {
            quantity: removed.quantity,
        })
    }

    /// Repairs the stock store against the journals after a suspected
    /// interrupted transaction.
    ///
    /// For each stocked item the journal-implied quantity is the sum of
    /// purchased quantities minus the sold quantities, the latter derived
    /// from `amount / unit_price` against the immutable catalog price and
    /// clamped at zero. Entries that disagree are rewritten; items without a
    /// catalog price cannot be reconciled and are skipped with a warning.
    pub fn reconcile(&mut self) -> Result<Vec<StockCorrection>> {
        let purchases = self.purchases.scan()?;
        let sales = self.sales.scan()?;

        let mut corrections = Vec::new();
        for entry in self.stock.entries()? {
            let catalog_item = match self.catalog.find(&entry.name)? {
                Some(item) => item,
                None => {
                    warn!(item = %entry.name, "cannot reconcile: item missing from catalog");
                    continue;
                }
            };

            let purchased: i64 = purchases
                .iter()
                .filter(|event| entry.matches(&event.item))
                .map(|event| i64::from(event.quantity))
                .sum();
            let sold: i64 = sales
                .iter()
                .filter(|event| entry.matches(&event.item))
                .map(|event| (event.amount / catalog_item.unit_price).round() as i64)
                .sum();

            let expected = (purchased - sold).max(0) as u32;
            if expected != entry.quantity {
                warn!(
                    item = %entry.name,
                    recorded = entry.quantity,
                    expected,
                    "stock mismatch repaired from journals"
                );
                self.stock.set_quantity(&entry.name, expected)?;
                corrections.push(StockCorrection {
                    item: entry.name,
                    recorded: entry.quantity,
                    expected,
                });
            }
        }
        Ok(corrections)
    }
}

fn partial_failure(
    item: &str,
    committed: &'static str,
    failed: &'static str,
    source: ShopError,
) -> ShopError {
    warn!(item, committed, failed, "transaction left partially committed");
    ShopError::PartialFailure {
        item: item.to_string(),
        committed,
        failed,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StorePaths};
    use tempfile::tempdir;

    struct TestClock(NaiveDate);

    impl Clock for TestClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn engine(temp: &tempfile::TempDir) -> LedgerEngine<TestClock> {
        let paths = StorePaths::in_dir(temp.path(), &Config::default());
        let clock = TestClock(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        LedgerEngine::with_clock(&paths, clock)
    }

    #[test]
    fn worked_example_pen() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);
        engine.add_item("Pen", 2.0).unwrap();

        let outcome = engine
            .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
            .unwrap();
        let receipt = match outcome {
            PurchaseOutcome::Committed(receipt) => receipt,
            PurchaseOutcome::Cancelled => panic!("purchase should commit"),
        };
        assert_eq!(receipt.total, 15.0);
        assert_eq!(receipt.new_quantity, 10);

        let receipt = engine.sell("CustomerX", "Pen", 3).unwrap();
        assert_eq!(receipt.total, 6.0);
        assert_eq!(receipt.new_quantity, 7);

        assert_eq!(engine.stock().quantity("Pen").unwrap(), 7);
        assert_eq!(engine.sales().scan().unwrap().len(), 1);
        assert_eq!(engine.purchases().scan().unwrap().len(), 1);
    }

    #[test]
    fn sell_requires_catalog_then_stock_then_quantity() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);

        assert!(matches!(
            engine.sell("CustomerX", "Pen", 1),
            Err(ShopError::ItemNotInCatalog(_))
        ));

        engine.add_item("Pen", 2.0).unwrap();
        assert!(matches!(
            engine.sell("CustomerX", "Pen", 1),
            Err(ShopError::ItemNotInStock(_))
        ));

        engine
            .purchase("SupplierA", "Pen", 2, 1.0, &mut FixedPricer(None))
            .unwrap();
        assert!(matches!(
            engine.sell("CustomerX", "Pen", 5),
            Err(ShopError::InsufficientStock {
                requested: 5,
                available: 2,
                ..
            })
        ));
        assert!(matches!(
            engine.sell("CustomerX", "Pen", 0),
            Err(ShopError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn rejected_sell_leaves_stores_byte_for_byte_unchanged() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);
        engine.add_item("Pen", 2.0).unwrap();
        engine
            .purchase("SupplierA", "Pen", 2, 1.0, &mut FixedPricer(None))
            .unwrap();

        let stock_before = std::fs::read_to_string(engine.stock().path()).unwrap();
        let sales_before = std::fs::read(engine.sales().path()).unwrap_or_default();
        let purchases_before = std::fs::read_to_string(engine.purchases().path()).unwrap();

        assert!(engine.sell("CustomerX", "Pen", 99).is_err());

        assert_eq!(
            std::fs::read_to_string(engine.stock().path()).unwrap(),
            stock_before
        );
        assert_eq!(
            std::fs::read(engine.sales().path()).unwrap_or_default(),
            sales_before
        );
        assert_eq!(
            std::fs::read_to_string(engine.purchases().path()).unwrap(),
            purchases_before
        );
    }

    #[test]
    fn purchase_onboards_missing_item_through_pricer() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);

        let outcome = engine
            .purchase("SupplierA", "Notebook", 4, 3.0, &mut FixedPricer(Some(5.5)))
            .unwrap();
        assert!(matches!(outcome, PurchaseOutcome::Committed(_)));
        let item = engine.catalog().find("notebook").unwrap().unwrap();
        assert_eq!(item.unit_price, 5.5);
        assert_eq!(engine.stock().quantity("Notebook").unwrap(), 4);
    }

    #[test]
    fn declined_onboarding_cancels_with_no_side_effects() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);

        let outcome = engine
            .purchase("SupplierA", "Notebook", 4, 3.0, &mut FixedPricer(None))
            .unwrap();
        assert_eq!(outcome, PurchaseOutcome::Cancelled);
        assert!(engine.catalog().items().unwrap().is_empty());
        assert!(engine.stock().entries().unwrap().is_empty());
        assert!(engine.purchases().scan().unwrap().is_empty());
    }

    #[test]
    fn repeat_purchases_merge_into_one_stock_entry() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);
        engine.add_item("Pen", 2.0).unwrap();
        engine
            .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
            .unwrap();
        engine
            .purchase("SupplierB", "pen", 5, 1.4, &mut FixedPricer(None))
            .unwrap();

        let entries = engine.stock().entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 15);
        assert_eq!(engine.purchases().scan().unwrap().len(), 2);
    }

    #[test]
    fn remove_item_asymmetry_keeps_catalog_entry() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);
        engine.add_item("Pen", 2.0).unwrap();
        engine
            .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
            .unwrap();

        assert_eq!(
            engine.remove_item("Pen", false).unwrap(),
            RemoveOutcome::Declined
        );
        assert_eq!(engine.stock().quantity("Pen").unwrap(), 10);

        assert_eq!(
            engine.remove_item("Pen", true).unwrap(),
            RemoveOutcome::Removed { quantity: 10 }
        );
        assert!(engine.stock().entries().unwrap().is_empty());
        assert!(engine.catalog().contains("Pen").unwrap());

        assert!(matches!(
            engine.remove_item("Pen", true),
            Err(ShopError::ItemNotFound(_))
        ));
    }

    #[test]
    fn reconcile_repairs_a_drifted_stock_entry() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);
        engine.add_item("Pen", 2.0).unwrap();
        engine
            .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
            .unwrap();
        engine.sell("CustomerX", "Pen", 3).unwrap();

        // Simulate an interrupted transaction: journal says 7, stock says 9.
        engine.stock().set_quantity("Pen", 9).unwrap();

        let corrections = engine.reconcile().unwrap();
        assert_eq!(
            corrections,
            vec![StockCorrection {
                item: "Pen".into(),
                recorded: 9,
                expected: 7,
            }]
        );
        assert_eq!(engine.stock().quantity("Pen").unwrap(), 7);

        // A second pass finds nothing to fix.
        assert!(engine.reconcile().unwrap().is_empty());
    }

    #[test]
    fn reconcile_matches_non_ascii_names_case_insensitively() {
        let temp = tempdir().unwrap();
        let mut engine = engine(&temp);
        engine.add_item("Öl", 2.0).unwrap();
        engine
            .purchase("SupplierA", "Öl", 10, 1.5, &mut FixedPricer(None))
            .unwrap();

        // A hand-edited journal line with different casing still counts
        // against the entry, same as every other lookup.
        std::fs::write(engine.sales().path(), "CustomerX,ÖL,6.00,2025-03-14\n").unwrap();

        let corrections = engine.reconcile().unwrap();
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].expected, 7);
        assert_eq!(engine.stock().quantity("Öl").unwrap(), 7);
    }
}
