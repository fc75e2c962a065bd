use crate::error::{BridgeError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const MISSING_PAYMENT_OPTIONS: &str = "Missing one or more payment options.";

/// A line item amount, given either as a number or as a string.
///
/// The native side only accepts strings, so the amount always serializes
/// as one. Numbers render in their shortest form (`10`, `10.5`); strings are
/// sent unchanged. Numbers always render in positional notation, never with
/// an exponent, so `0.0000001` stays `"0.0000001"` rather than `"1e-7"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApplePayAmount {
    Text(String),
    Number(Decimal),
}

impl ApplePayAmount {
    pub fn is_text(&self) -> bool {
        matches!(self, ApplePayAmount::Text(_))
    }

    /// Replaces a numeric amount by its string form.
    pub fn normalize(&mut self) {
        if let ApplePayAmount::Number(value) = self {
            *self = ApplePayAmount::Text(value.normalize().to_string());
        }
    }
}

impl fmt::Display for ApplePayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplePayAmount::Text(text) => f.write_str(text),
            ApplePayAmount::Number(value) => write!(f, "{}", value.normalize()),
        }
    }
}

impl Serialize for ApplePayAmount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<Decimal> for ApplePayAmount {
    fn from(value: Decimal) -> Self {
        ApplePayAmount::Number(value)
    }
}

impl From<&str> for ApplePayAmount {
    fn from(value: &str) -> Self {
        ApplePayAmount::Text(value.to_string())
    }
}

impl From<String> for ApplePayAmount {
    fn from(value: String) -> Self {
        ApplePayAmount::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplePayItem {
    pub label: String,
    pub amount: ApplePayAmount,
}

impl ApplePayItem {
    pub fn new(label: impl Into<String>, amount: impl Into<ApplePayAmount>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }
}

/// Everything needed to open an Apple Pay transaction.
///
/// Missing fields deserialize as empty and are caught by [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplePayOptions {
    pub merchant_id: String,
    pub country: String,
    pub currency: String,
    pub items: Vec<ApplePayItem>,
    pub mode: String,
}

impl ApplePayOptions {
    pub fn validate(&self) -> Result<()> {
        let missing = self.merchant_id.is_empty()
            || self.country.is_empty()
            || self.currency.is_empty()
            || self.items.is_empty()
            || self.mode.is_empty();
        if missing {
            return Err(BridgeError::InvalidOptions(
                MISSING_PAYMENT_OPTIONS.to_string(),
            ));
        }
        Ok(())
    }

    /// Coerces every item amount to its string form, in place.
    pub fn normalize_amounts(&mut self) {
        for item in &mut self.items {
            item.amount.normalize();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayOptions {
    pub amount: String,
    pub currency_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn options() -> ApplePayOptions {
        ApplePayOptions {
            merchant_id: "merchant.com.example".to_string(),
            country: "US".to_string(),
            currency: "USD".to_string(),
            items: vec![ApplePayItem::new("Coffee", dec!(10))],
            mode: "test".to_string(),
        }
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let numeric = ApplePayItem::new("a", dec!(10));
        let text = ApplePayItem::new("b", "10");
        let fractional = ApplePayItem::new("c", dec!(10.50));

        assert_eq!(serde_json::to_value(&numeric).unwrap()["amount"], json!("10"));
        assert_eq!(serde_json::to_value(&text).unwrap()["amount"], json!("10"));
        assert_eq!(serde_json::to_value(&fractional).unwrap()["amount"], json!("10.5"));
    }

    #[test]
    fn test_extreme_amounts_render_without_exponent() {
        let tiny = ApplePayItem::new("tiny", dec!(0.0000001));
        let huge = ApplePayItem::new("huge", dec!(1000000000000000000000));

        assert_eq!(serde_json::to_value(&tiny).unwrap()["amount"], json!("0.0000001"));
        assert_eq!(
            serde_json::to_value(&huge).unwrap()["amount"],
            json!("1000000000000000000000")
        );
    }

    #[test]
    fn test_amount_deserializes_number_or_string() {
        let item: ApplePayItem = serde_json::from_value(json!({"label": "x", "amount": 10})).unwrap();
        assert_eq!(item.amount, ApplePayAmount::Number(dec!(10)));

        let item: ApplePayItem =
            serde_json::from_value(json!({"label": "x", "amount": "10.50"})).unwrap();
        assert_eq!(item.amount, ApplePayAmount::Text("10.50".to_string()));
    }

    #[test]
    fn test_normalize_amounts_in_place() {
        let mut options = options();
        options.items.push(ApplePayItem::new("Tip", "2.00"));
        options.normalize_amounts();

        assert!(options.items.iter().all(|item| item.amount.is_text()));
        assert_eq!(options.items[0].amount, ApplePayAmount::Text("10".to_string()));
        assert_eq!(options.items[1].amount, ApplePayAmount::Text("2.00".to_string()));
    }

    #[test]
    fn test_validate_requires_every_field() {
        assert!(options().validate().is_ok());

        let mutations: [fn(&mut ApplePayOptions); 5] = [
            |o| o.merchant_id.clear(),
            |o| o.country.clear(),
            |o| o.currency.clear(),
            |o| o.items.clear(),
            |o| o.mode.clear(),
        ];
        for mutate in mutations {
            let mut broken = options();
            mutate(&mut broken);
            assert!(matches!(
                broken.validate(),
                Err(BridgeError::InvalidOptions(msg)) if msg == MISSING_PAYMENT_OPTIONS
            ));
        }
    }

    #[test]
    fn test_missing_json_fields_fail_validation() {
        let options: ApplePayOptions =
            serde_json::from_value(json!({"merchantId": "m", "country": "US"})).unwrap();
        assert!(options.validate().is_err());
    }
}
