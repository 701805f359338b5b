use chrono::NaiveDate;

use super::DATE_FORMAT;

/// A record type that can live in an append-only journal file.
///
/// Records encode to one comma-separated line and are immutable once
/// appended; the decode side is strict so that a torn or hand-edited line
/// surfaces as a storage error instead of silently skewing reports.
pub trait JournalRecord: Sized {
    /// Human-readable record kind used in storage error messages.
    const KIND: &'static str;

    fn encode_line(&self) -> String;
    fn decode_line(line: &str) -> Option<Self>;

    /// Monetary amount of the record, as summed by profit/loss reports.
    fn amount(&self) -> f64;

    /// Calendar date the record was committed on.
    fn date(&self) -> NaiveDate;
}

/// One committed sale: `customer,item,amount,date`.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleEvent {
    pub customer: String,
    pub item: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl JournalRecord for SaleEvent {
    const KIND: &'static str = "sale";

    fn encode_line(&self) -> String {
        format!(
            "{},{},{:.2},{}",
            self.customer,
            self.item,
            self.amount,
            self.date.format(DATE_FORMAT)
        )
    }

    fn decode_line(line: &str) -> Option<Self> {
        let mut parts = line.split(',');
        let customer = parts.next()?.trim();
        let item = parts.next()?.trim();
        let amount: f64 = parts.next()?.trim().parse().ok()?;
        let date = NaiveDate::parse_from_str(parts.next()?.trim(), DATE_FORMAT).ok()?;
        if parts.next().is_some() || customer.is_empty() || item.is_empty() || !amount.is_finite() {
            return None;
        }
        Some(Self {
            customer: customer.to_string(),
            item: item.to_string(),
            amount,
            date,
        })
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// One committed purchase: `supplier,item,quantity,amount,date`.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseEvent {
    pub supplier: String,
    pub item: String,
    pub quantity: u32,
    pub amount: f64,
    pub date: NaiveDate,
}

impl JournalRecord for PurchaseEvent {
    const KIND: &'static str = "purchase";

    fn encode_line(&self) -> String {
        format!(
            "{},{},{},{:.2},{}",
            self.supplier,
            self.item,
            self.quantity,
            self.amount,
            self.date.format(DATE_FORMAT)
        )
    }

    fn decode_line(line: &str) -> Option<Self> {
        let mut parts = line.split(',');
        let supplier = parts.next()?.trim();
        let item = parts.next()?.trim();
        let quantity: u32 = parts.next()?.trim().parse().ok()?;
        let amount: f64 = parts.next()?.trim().parse().ok()?;
        let date = NaiveDate::parse_from_str(parts.next()?.trim(), DATE_FORMAT).ok()?;
        if parts.next().is_some() || supplier.is_empty() || item.is_empty() || !amount.is_finite() {
            return None;
        }
        Some(Self {
            supplier: supplier.to_string(),
            item: item.to_string(),
            quantity,
            amount,
            date,
        })
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sale_line_codec_round_trips() {
        let sale = SaleEvent {
            customer: "CustomerX".into(),
            item: "Pen".into(),
            amount: 6.0,
            date: day(2025, 3, 14),
        };
        let line = sale.encode_line();
        assert_eq!(line, "CustomerX,Pen,6.00,2025-03-14");
        assert_eq!(SaleEvent::decode_line(&line).unwrap(), sale);
    }

    #[test]
    fn purchase_line_codec_round_trips() {
        let purchase = PurchaseEvent {
            supplier: "SupplierA".into(),
            item: "Pen".into(),
            quantity: 10,
            amount: 15.0,
            date: day(2025, 3, 14),
        };
        let line = purchase.encode_line();
        assert_eq!(line, "SupplierA,Pen,10,15.00,2025-03-14");
        assert_eq!(PurchaseEvent::decode_line(&line).unwrap(), purchase);
    }

    #[test]
    fn decode_rejects_wrong_field_counts_and_bad_dates() {
        assert!(SaleEvent::decode_line("a,b,1.00").is_none());
        assert!(SaleEvent::decode_line("a,b,1.00,2025-03-14,extra").is_none());
        assert!(SaleEvent::decode_line("a,b,1.00,14-03-2025").is_none());
        assert!(PurchaseEvent::decode_line("s,i,ten,15.00,2025-03-14").is_none());
    }
}
