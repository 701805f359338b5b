mod common;

use chrono::NaiveDate;
use common::{pinned_date, setup_engine};
use shop_core::core::{report, FixedPricer, ReportMode};

#[test]
fn worked_example_day_report_is_a_loss_of_nine() {
    let (_temp, mut engine) = setup_engine();
    engine.add_item("Pen", 2.0).unwrap();
    engine
        .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
        .unwrap();
    engine.sell("CustomerX", "Pen", 3).unwrap();

    let result = report(
        engine.sales(),
        engine.purchases(),
        ReportMode::Day,
        pinned_date(),
    )
    .unwrap();

    assert_eq!(result.total_sales, 6.0);
    assert_eq!(result.total_purchases, 15.0);
    assert_eq!(result.net(), -9.0);
    assert!(!result.is_profit());
}

#[test]
fn day_report_ignores_other_dates() {
    let (_temp, mut engine) = setup_engine();
    engine.add_item("Pen", 2.0).unwrap();
    engine
        .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
        .unwrap();

    let other_day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    let result = report(engine.sales(), engine.purchases(), ReportMode::Day, other_day).unwrap();
    assert_eq!(result.net(), 0.0);
}

#[test]
fn month_report_spans_the_whole_month() {
    let (_temp, mut engine) = setup_engine();
    engine.add_item("Pen", 2.0).unwrap();
    engine
        .purchase("SupplierA", "Pen", 10, 1.5, &mut FixedPricer(None))
        .unwrap();
    engine.sell("CustomerX", "Pen", 5).unwrap();

    let month_start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let result = report(
        engine.sales(),
        engine.purchases(),
        ReportMode::Month,
        month_start,
    )
    .unwrap();
    assert_eq!(result.total_sales, 10.0);
    assert_eq!(result.total_purchases, 15.0);
    assert_eq!(result.net(), -5.0);

    let next_month = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    let result = report(
        engine.sales(),
        engine.purchases(),
        ReportMode::Month,
        next_month,
    )
    .unwrap();
    assert_eq!(result.net(), 0.0);
}

#[test]
fn empty_journals_report_zero() {
    let (_temp, engine) = setup_engine();
    let result = report(
        engine.sales(),
        engine.purchases(),
        ReportMode::Month,
        pinned_date(),
    )
    .unwrap();
    assert_eq!(result.total_sales, 0.0);
    assert_eq!(result.total_purchases, 0.0);
    assert!(result.is_profit());
}
