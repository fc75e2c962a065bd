use crate::domain::wallet::ApplePayItem;
use crate::error::{BridgeError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ItemRecord {
    label: String,
    amount: String,
}

/// Reads Apple Pay line items from a `label,amount` CSV source.
///
/// Amounts are kept exactly as written, so `1.50` is sent as `"1.50"`.
pub struct ItemReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ItemReader<R> {
    /// Creates a new `ItemReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads line items.
    pub fn items(self) -> impl Iterator<Item = Result<ApplePayItem>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|record: ItemRecord| ApplePayItem::new(record.label, record.amount))
                .map_err(BridgeError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wallet::ApplePayAmount;

    #[test]
    fn test_reader_valid_stream() {
        let data = "label, amount\nCoffee, 3\nCake, 4.50";
        let reader = ItemReader::new(data.as_bytes());
        let results: Vec<Result<ApplePayItem>> = reader.items().collect();

        assert_eq!(results.len(), 2);
        let cake = results[1].as_ref().unwrap();
        assert_eq!(cake.label, "Cake");
        assert_eq!(cake.amount, ApplePayAmount::Text("4.50".to_string()));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "label, amount\nCoffee";
        let reader = ItemReader::new(data.as_bytes());
        let results: Vec<Result<ApplePayItem>> = reader.items().collect();

        assert!(results[0].is_err());
    }
}
