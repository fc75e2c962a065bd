use super::token::TokenResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw card fields to tokenize.
///
/// Field names follow the native plugin's wire format, which mixes camelCase
/// (`expMonth`) and snake_case (`address_line1`). Optional fields are left
/// out of the payload when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardTokenRequest {
    pub number: String,
    #[serde(rename = "expMonth")]
    pub exp_month: u32,
    #[serde(rename = "expYear")]
    pub exp_year: u32,
    pub cvc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// iOS only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// iOS only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CardTokenRequest {
    pub fn new(number: impl Into<String>, exp_month: u32, exp_year: u32, cvc: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            exp_month,
            exp_year,
            cvc: cvc.into(),
            ..Default::default()
        }
    }
}

/// The card record embedded in a card token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub id: String,
    pub object: String,
    pub brand: String,
    #[serde(default)]
    pub country: Option<String>,
    pub exp_month: u32,
    pub exp_year: u32,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub funding: Option<String>,
    pub last4: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_country: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line1_check: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_zip: Option<String>,
    #[serde(default)]
    pub address_zip_check: Option<String>,
    #[serde(default)]
    pub cvc_check: Option<String>,
    #[serde(default)]
    pub dynamic_last4: Option<String>,
    #[serde(default)]
    pub tokenization_method: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardTokenResponse {
    #[serde(flatten)]
    pub token: TokenResponse,
    pub card: Card,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_request_wire_names() {
        let mut card = CardTokenRequest::new("4242424242424242", 12, 2030, "123");
        card.address_line1 = Some("1 Main St".to_string());

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({
                "number": "4242424242424242",
                "expMonth": 12,
                "expYear": 2030,
                "cvc": "123",
                "address_line1": "1 Main St"
            })
        );
    }

    #[test]
    fn test_card_token_response_deserialization() {
        let json = json!({
            "id": "tok_1",
            "type": "card",
            "created": 1700000000,
            "card": {
                "id": "card_1",
                "object": "card",
                "brand": "Visa",
                "exp_month": 12,
                "exp_year": 2030,
                "last4": "4242",
                "metadata": {},
                "cvc_check": null
            }
        });

        let token: CardTokenResponse = serde_json::from_value(json).unwrap();
        assert_eq!(token.token.id, "tok_1");
        assert_eq!(token.card.brand, "Visa");
        assert_eq!(token.card.last4, "4242");
        assert_eq!(token.card.cvc_check, None);
    }
}
