//! Subcommand handlers for the `shop_core_cli` binary.
//!
//! Every operation is reachable non-interactively through positional
//! arguments and flags; interactive prompts (item selection, new-item
//! onboarding, removal confirmation) only kick in where an argument was
//! omitted.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::config::{ConfigManager, PathResolver, StorePaths};
use crate::core::{
    report, FixedPricer, LedgerEngine, NewItemPricer, PurchaseOutcome, Receipt, RemoveOutcome,
    ReportMode, SystemClock,
};
use crate::errors::CliError;
use crate::ledger::DATE_FORMAT;

use super::output::{info, section, success, warning};
use super::selectors::{FuzzyItemSelector, ItemSelector, Selection};

const USAGE: &str = "\
Usage: shop_core_cli <command> [args]

Commands:
  add-item <name> <price>                          add a catalog item
  sell <customer> [<item>] <quantity>              record a sale
  purchase <supplier> <item> <quantity> <unit-price> [--selling-price <p>]
                                                   record a purchase
  remove-item <name> [--yes]                       delete the stock entry
  report <day|month> [YYYY-MM-DD]                  profit/loss for a period
  list <items|sales|purchases|inventory>           show a store
  reconcile                                        repair stock from journals
";

/// Entry point for the binary: dispatches on the first argument.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = args.first().map(String::as_str).unwrap_or("help");
    if command == "help" {
        print!("{USAGE}");
        return Ok(());
    }

    let mut engine = open_engine()?;
    match command {
        "add-item" => add_item(&mut engine, &args[1..]),
        "sell" => sell(&mut engine, &args[1..]),
        "purchase" => purchase(&mut engine, &args[1..]),
        "remove-item" => remove_item(&mut engine, &args[1..]),
        "report" => run_report(&engine, &args[1..]),
        "list" => list(&engine, &args[1..]),
        "reconcile" => reconcile(&mut engine),
        other => Err(CliError::Command(format!(
            "unknown command `{other}` (try `help`)"
        ))),
    }
}

fn open_engine() -> Result<LedgerEngine<SystemClock>, CliError> {
    let base = PathResolver::base_dir();
    let config = ConfigManager::from_base(base.clone())?.load()?;
    let paths = StorePaths::in_dir(&base, &config);
    Ok(LedgerEngine::new(&paths))
}

fn add_item(engine: &mut LedgerEngine<SystemClock>, args: &[String]) -> Result<(), CliError> {
    let [name, price] = require_args(args, &["name", "price"])?;
    let price = parse_price(price)?;
    let item = engine.add_item(name, price)?;
    success(format!(
        "Item `{}` added with selling price {:.2}",
        item.name, item.unit_price
    ));
    Ok(())
}

fn sell(engine: &mut LedgerEngine<SystemClock>, args: &[String]) -> Result<(), CliError> {
    let (customer, item, quantity) = match args {
        [customer, item, quantity] => (customer.clone(), item.clone(), quantity.clone()),
        [customer, quantity] => {
            let candidates: Vec<String> = engine
                .catalog()
                .items()?
                .into_iter()
                .map(|item| item.name)
                .collect();
            match FuzzyItemSelector.select(&candidates)? {
                Selection::Chosen(item) => (customer.clone(), item, quantity.clone()),
                Selection::Cancelled => {
                    warning("Sale cancelled.");
                    return Ok(());
                }
            }
        }
        _ => {
            return Err(CliError::Input(
                "expected: sell <customer> [<item>] <quantity>".into(),
            ))
        }
    };

    let quantity = parse_quantity(&quantity)?;
    let Receipt { total, new_quantity } = engine.sell(&customer, &item, quantity)?;
    success(format!(
        "Sold {quantity} x {item} to {customer} for {total:.2} ({new_quantity} left in stock)"
    ));
    Ok(())
}

fn purchase(engine: &mut LedgerEngine<SystemClock>, args: &[String]) -> Result<(), CliError> {
    let (positional, selling_price) = split_selling_price(args)?;
    let [supplier, item, quantity, unit_price] =
        require_args(&positional, &["supplier", "item", "quantity", "unit-price"])?;
    let quantity = parse_quantity(quantity)?;
    let unit_price = parse_price(unit_price)?;

    let outcome = match selling_price {
        Some(price) => engine.purchase(supplier, item, quantity, unit_price, &mut FixedPricer(Some(price)))?,
        None => {
            let mut pricer = PromptPricer;
            engine.purchase(supplier, item, quantity, unit_price, &mut pricer)?
        }
    };

    match outcome {
        PurchaseOutcome::Committed(Receipt { total, new_quantity }) => {
            success(format!(
                "Purchased {quantity} x {item} from {supplier} for {total:.2} ({new_quantity} now in stock)"
            ));
        }
        PurchaseOutcome::Cancelled => warning("Purchase cancelled."),
    }
    Ok(())
}

fn remove_item(engine: &mut LedgerEngine<SystemClock>, args: &[String]) -> Result<(), CliError> {
    let (positional, confirmed) = split_flag(args, "--yes");
    let [name] = require_args(&positional, &["name"])?;

    let confirmed = confirmed || confirm(&format!("Delete the stock entry for `{name}`?"))?;
    match engine.remove_item(name, confirmed)? {
        RemoveOutcome::Removed { quantity } => {
            success(format!("Removed `{name}` from stock ({quantity} units dropped)"));
        }
        RemoveOutcome::Declined => info("Removal declined, nothing changed."),
    }
    Ok(())
}

fn run_report(engine: &LedgerEngine<SystemClock>, args: &[String]) -> Result<(), CliError> {
    let mode: ReportMode = args
        .first()
        .ok_or_else(|| CliError::Input("expected: report <day|month> [YYYY-MM-DD]".into()))?
        .parse()
        .map_err(CliError::Core)?;
    let reference = match args.get(1) {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| CliError::Input(format!("invalid date `{raw}` (expected YYYY-MM-DD)")))?,
        None => chrono::Local::now().date_naive(),
    };

    let result = report(engine.sales(), engine.purchases(), mode, reference)?;
    let period = match mode {
        ReportMode::Day => format!("{reference}"),
        ReportMode::Month => reference.format("%Y-%m").to_string(),
    };
    section(format!("Profit & Loss for {period}"));
    info(format!("Total sales:     {:.2}", result.total_sales));
    info(format!("Total purchases: {:.2}", result.total_purchases));
    if result.is_profit() {
        success(format!("Profit: {:.2}", result.net()));
    } else {
        warning(format!("Loss: {:.2}", result.net().abs()));
    }
    Ok(())
}

fn list(engine: &LedgerEngine<SystemClock>, args: &[String]) -> Result<(), CliError> {
    match args.first().map(String::as_str) {
        Some("items") => {
            let items = engine.catalog().items()?;
            if items.is_empty() {
                warning("Catalog is empty, add items first.");
                return Ok(());
            }
            section("Catalog");
            for (index, item) in items.iter().enumerate() {
                println!("{}) {} @ {:.2}", index + 1, item.name, item.unit_price);
            }
        }
        Some("inventory") => {
            let entries = engine.stock().entries()?;
            if entries.is_empty() {
                warning("Inventory is empty, purchase items first.");
                return Ok(());
            }
            section("Inventory");
            for entry in entries {
                println!("{:<20} {}", entry.name, entry.quantity);
            }
        }
        Some("sales") => {
            let records = engine.sales().scan()?;
            if records.is_empty() {
                warning("No sales records found.");
                return Ok(());
            }
            section("Sales");
            for record in records {
                println!(
                    "{}  {:<16} {:<16} {:.2}",
                    record.date, record.customer, record.item, record.amount
                );
            }
        }
        Some("purchases") => {
            let records = engine.purchases().scan()?;
            if records.is_empty() {
                warning("No purchase records found.");
                return Ok(());
            }
            section("Purchases");
            for record in records {
                println!(
                    "{}  {:<16} {:<16} {:<6} {:.2}",
                    record.date, record.supplier, record.item, record.quantity, record.amount
                );
            }
        }
        _ => {
            return Err(CliError::Input(
                "expected: list <items|sales|purchases|inventory>".into(),
            ))
        }
    }
    Ok(())
}

fn reconcile(engine: &mut LedgerEngine<SystemClock>) -> Result<(), CliError> {
    let corrections = engine.reconcile()?;
    if corrections.is_empty() {
        success("Stock agrees with the journals.");
        return Ok(());
    }
    for correction in &corrections {
        warning(format!(
            "{}: stock said {}, journals imply {} (fixed)",
            correction.item, correction.recorded, correction.expected
        ));
    }
    success(format!("{} entr(ies) repaired.", corrections.len()));
    Ok(())
}

/// Onboards a missing item by asking for its selling price on the terminal.
struct PromptPricer;

impl NewItemPricer for PromptPricer {
    fn selling_price_for(&mut self, item: &str) -> Option<f64> {
        warning(format!("`{item}` is not in the catalog."));
        let add = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Add `{item}` to the catalog now?"))
            .default(true)
            .interact()
            .ok()?;
        if !add {
            return None;
        }
        Input::<f64>::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Selling price for `{item}`"))
            .interact_text()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)
    }
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| CliError::Input(err.to_string()))
}

fn require_args<'a, const N: usize>(
    args: &'a [String],
    names: &[&str; N],
) -> Result<[&'a String; N], CliError> {
    let refs: Vec<&'a String> = args.iter().collect();
    refs.try_into()
        .map_err(|_| CliError::Input(format!("expected arguments: {}", names.join(" "))))
}

fn split_flag(args: &[String], flag: &str) -> (Vec<String>, bool) {
    let mut present = false;
    let positional = args
        .iter()
        .filter(|arg| {
            if arg.as_str() == flag {
                present = true;
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();
    (positional, present)
}

fn split_selling_price(args: &[String]) -> Result<(Vec<String>, Option<f64>), CliError> {
    let mut positional = Vec::new();
    let mut selling_price = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--selling-price" {
            let value = iter
                .next()
                .ok_or_else(|| CliError::Input("--selling-price needs a value".into()))?;
            selling_price = Some(parse_price(value)?);
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, selling_price))
}

fn parse_quantity(raw: &str) -> Result<u32, CliError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or_else(|| CliError::Input(format!("invalid quantity `{raw}`")))
}

fn parse_price(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CliError::Input(format!("invalid price `{raw}`")))
}
