use super::token::TokenResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountTokenRequest {
    pub country: String,
    pub currency: String,
    pub account_holder_name: String,
    pub account_holder_type: String,
    pub routing_number: String,
    pub account_number: String,
}

/// The bank account record embedded in a bank account token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub object: String,
    #[serde(default)]
    pub account_holder_name: Option<String>,
    #[serde(default)]
    pub account_holder_type: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub country: String,
    pub currency: String,
    #[serde(default)]
    pub fingerprint: Option<String>,
    pub last4: String,
    #[serde(default)]
    pub routing_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BankAccountTokenResponse {
    #[serde(flatten)]
    pub token: TokenResponse,
    pub bank_account: BankAccount,
}
