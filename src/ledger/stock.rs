/// On-hand quantity for one catalog item. Exactly one entry exists per item;
/// the unsigned quantity makes the never-negative invariant structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub name: String,
    pub quantity: u32,
}

impl StockEntry {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Case-insensitive name match, consistent with catalog lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub fn encode_line(&self) -> String {
        format!("{},{}", self.name, self.quantity)
    }

    pub fn decode_line(line: &str) -> Option<Self> {
        let (name, quantity) = line.split_once(',')?;
        let quantity: u32 = quantity.trim().parse().ok()?;
        if name.trim().is_empty() {
            return None;
        }
        Some(Self::new(name.trim(), quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_codec_round_trips() {
        let entry = StockEntry::new("Pen", 7);
        assert_eq!(entry.encode_line(), "Pen,7");
        assert_eq!(StockEntry::decode_line("Pen,7").unwrap(), entry);
    }

    #[test]
    fn decode_rejects_negative_and_malformed_quantities() {
        assert!(StockEntry::decode_line("Pen,-3").is_none());
        assert!(StockEntry::decode_line("Pen,seven").is_none());
        assert!(StockEntry::decode_line("Pen").is_none());
    }
}
