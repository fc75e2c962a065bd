use crate::domain::account::AccountParams;
use crate::domain::bank_account::{BankAccountTokenRequest, BankAccountTokenResponse};
use crate::domain::card::{CardTokenRequest, CardTokenResponse};
use crate::domain::ports::{RemoteCall, RemoteChannelRef, Verb};
use crate::domain::source::SourceParams;
use crate::domain::token::TokenResponse;
use crate::domain::wallet::GooglePayOptions;
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt::Display;
use tracing::debug;

/// Typed entry point to the native payment SDK.
///
/// Each operation checks its input, sends one call with a fixed verb and
/// positional arguments through the shared channel, and decodes the reply.
/// The bridge keeps no state between calls, so clones can be used
/// concurrently.
#[derive(Clone)]
pub struct StripeBridge {
    channel: RemoteChannelRef,
}

impl StripeBridge {
    pub fn new(channel: RemoteChannelRef) -> Self {
        Self { channel }
    }

    pub(crate) fn channel(&self) -> &RemoteChannelRef {
        &self.channel
    }

    pub(crate) async fn call(&self, verb: Verb, args: Vec<Value>) -> Result<Value> {
        debug!(%verb, args = args.len(), "Dispatching remote call");
        let reply = self.channel.invoke(RemoteCall::new(verb, args)).await;
        if let Err(err) = &reply {
            debug!(%verb, error = %err, "Remote call failed");
        }
        Ok(reply?)
    }

    async fn call_decoded<T: DeserializeOwned>(&self, verb: Verb, args: Vec<Value>) -> Result<T> {
        let reply = self.call(verb, args).await?;
        Ok(serde_json::from_value(reply)?)
    }

    pub async fn set_publishable_key(&self, key: &str) -> Result<()> {
        self.call(Verb::SetPublishableKey, vec![json!(key)]).await?;
        Ok(())
    }

    pub async fn create_card_token(&self, card: &CardTokenRequest) -> Result<CardTokenResponse> {
        self.call_decoded(Verb::CreateCardToken, vec![to_arg(card)?])
            .await
    }

    pub async fn create_bank_account_token(
        &self,
        bank_account: &BankAccountTokenRequest,
    ) -> Result<BankAccountTokenResponse> {
        self.call_decoded(Verb::CreateBankAccountToken, vec![to_arg(bank_account)?])
            .await
    }

    /// Asks the native side whether `card_number` is valid. No local parsing.
    pub async fn validate_card_number(&self, card_number: &str) -> Result<bool> {
        self.call_decoded(Verb::ValidateCardNumber, vec![json!(card_number)])
            .await
    }

    pub async fn validate_expiry_date(&self, exp_month: u32, exp_year: u32) -> Result<bool> {
        self.call_decoded(
            Verb::ValidateExpiryDate,
            vec![json!(exp_month), json!(exp_year)],
        )
        .await
    }

    pub async fn validate_cvc(&self, cvc: &str) -> Result<bool> {
        self.call_decoded(Verb::ValidateCvc, vec![json!(cvc)]).await
    }

    /// Card brand for a number given as a string or an integer.
    pub async fn get_card_type(&self, card_number: impl Display) -> Result<String> {
        self.call_decoded(Verb::GetCardType, vec![json!(card_number.to_string())])
            .await
    }

    /// One-time Google Pay setup.
    pub async fn init_google_pay(&self) -> Result<()> {
        self.call(Verb::InitGooglePay, vec![]).await?;
        Ok(())
    }

    /// Single-phase Google Pay payment. The native SDK commits the payment
    /// itself, so there is nothing to finalize.
    pub async fn pay_with_google_pay(&self, options: &GooglePayOptions) -> Result<TokenResponse> {
        self.call_decoded(
            Verb::PayWithGooglePay,
            vec![json!(options.amount), json!(options.currency_code)],
        )
        .await
    }

    /// Creates a source. The type is taken from the params variant and sent
    /// as its position.
    pub async fn create_source(&self, params: &SourceParams) -> Result<TokenResponse> {
        let position = params.source_type().position();
        self.call_decoded(Verb::CreateSource, vec![json!(position), to_arg(params)?])
            .await
    }

    /// Creates a source from a tag and an untyped params object. Unknown tags
    /// and mismatched shapes fail before anything is sent.
    pub async fn create_source_tagged(&self, tag: &str, params: Value) -> Result<TokenResponse> {
        let params = SourceParams::from_tagged(tag, params)?;
        self.create_source(&params).await
    }

    pub async fn create_pii_token(&self, personal_id: &str) -> Result<TokenResponse> {
        self.call_decoded(Verb::CreatePiiToken, vec![json!(personal_id)])
            .await
    }

    pub async fn create_account_token(&self, params: &AccountParams) -> Result<TokenResponse> {
        self.call_decoded(Verb::CreateAccountToken, vec![to_arg(params)?])
            .await
    }
}

pub(crate) fn to_arg<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
