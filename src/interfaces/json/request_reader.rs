use crate::application::bridge::StripeBridge;
use crate::domain::account::AccountParams;
use crate::domain::bank_account::BankAccountTokenRequest;
use crate::domain::card::CardTokenRequest;
use crate::domain::wallet::{ApplePayOptions, GooglePayOptions};
use crate::error::{BridgeError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::io::Read;

/// A card number written either as a JSON string or as a JSON integer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CardNumber {
    Text(String),
    Number(u64),
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardNumber::Text(text) => f.write_str(text),
            CardNumber::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One bridge operation, as written in a JSON-lines request file.
///
/// ```json
/// {"op": "createSource", "type": "ideal", "params": {"amount": 1099, "...": "..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BridgeRequest {
    SetPublishableKey {
        key: String,
    },
    CreateCardToken {
        card: CardTokenRequest,
    },
    CreateBankAccountToken {
        bank_account: BankAccountTokenRequest,
    },
    ValidateCardNumber {
        card_number: String,
    },
    ValidateExpiryDate {
        exp_month: u32,
        exp_year: u32,
    },
    #[serde(rename = "validateCVC")]
    ValidateCvc {
        cvc: String,
    },
    GetCardType {
        card_number: CardNumber,
    },
    /// Opens an Apple Pay transaction and, if it opens, finalizes it with
    /// `processed`.
    PayWithApplePay {
        options: ApplePayOptions,
        #[serde(default)]
        processed: bool,
    },
    InitGooglePay,
    PayWithGooglePay {
        options: GooglePayOptions,
    },
    CreateSource {
        r#type: String,
        params: Value,
    },
    CreatePiiToken {
        personal_id: String,
    },
    CreateAccountToken {
        params: AccountParams,
    },
}

impl BridgeRequest {
    /// Runs the request through `bridge` and returns the decoded reply as JSON.
    pub async fn execute(self, bridge: &StripeBridge) -> Result<Value> {
        let reply = match self {
            BridgeRequest::SetPublishableKey { key } => {
                bridge.set_publishable_key(&key).await?;
                Value::Null
            }
            BridgeRequest::CreateCardToken { card } => {
                let token = bridge.create_card_token(&card).await?;
                Value::String(token.token.id)
            }
            BridgeRequest::CreateBankAccountToken { bank_account } => {
                let token = bridge.create_bank_account_token(&bank_account).await?;
                Value::String(token.token.id)
            }
            BridgeRequest::ValidateCardNumber { card_number } => {
                Value::Bool(bridge.validate_card_number(&card_number).await?)
            }
            BridgeRequest::ValidateExpiryDate {
                exp_month,
                exp_year,
            } => Value::Bool(bridge.validate_expiry_date(exp_month, exp_year).await?),
            BridgeRequest::ValidateCvc { cvc } => Value::Bool(bridge.validate_cvc(&cvc).await?),
            BridgeRequest::GetCardType { card_number } => {
                Value::String(bridge.get_card_type(card_number).await?)
            }
            BridgeRequest::PayWithApplePay { options, processed } => {
                let transaction = bridge.pay_with_apple_pay(options).await?;
                let token = Value::String(transaction.token().id.clone());
                transaction.finalize(processed).await;
                token
            }
            BridgeRequest::InitGooglePay => {
                bridge.init_google_pay().await?;
                Value::Null
            }
            BridgeRequest::PayWithGooglePay { options } => {
                Value::String(bridge.pay_with_google_pay(&options).await?.id)
            }
            BridgeRequest::CreateSource { r#type, params } => {
                Value::String(bridge.create_source_tagged(&r#type, params).await?.id)
            }
            BridgeRequest::CreatePiiToken { personal_id } => {
                Value::String(bridge.create_pii_token(&personal_id).await?.id)
            }
            BridgeRequest::CreateAccountToken { params } => {
                Value::String(bridge.create_account_token(&params).await?.id)
            }
        };
        Ok(reply)
    }
}

/// Reads requests from a JSON-lines source, one request per line.
///
/// Blank lines are skipped. A malformed line yields an error and reading
/// continues with the next one.
pub struct RequestReader<R: Read> {
    source: R,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<BridgeRequest>> {
        use std::io::BufRead;

        std::io::BufReader::new(self.source)
            .lines()
            .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
            .map(|line| -> Result<BridgeRequest> {
                let line = line.map_err(BridgeError::from)?;
                Ok(serde_json::from_str(&line)?)
            })
    }
}
