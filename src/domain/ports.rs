use crate::error::{BridgeError, PluginError};
use async_trait::async_trait;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Feature name the native side registers the payment plugin under.
pub const FEATURE_NAME: &str = "CordovaStripe";

/// Every verb the native side understands. Names are fixed by the native plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    SetPublishableKey,
    CreateCardToken,
    CreateBankAccountToken,
    ValidateCardNumber,
    ValidateExpiryDate,
    ValidateCvc,
    GetCardType,
    InitializeApplePayTransaction,
    FinalizeApplePayTransaction,
    InitGooglePay,
    PayWithGooglePay,
    CreateSource,
    CreatePiiToken,
    CreateAccountToken,
}

impl Verb {
    pub const ALL: [Verb; 14] = [
        Verb::SetPublishableKey,
        Verb::CreateCardToken,
        Verb::CreateBankAccountToken,
        Verb::ValidateCardNumber,
        Verb::ValidateExpiryDate,
        Verb::ValidateCvc,
        Verb::GetCardType,
        Verb::InitializeApplePayTransaction,
        Verb::FinalizeApplePayTransaction,
        Verb::InitGooglePay,
        Verb::PayWithGooglePay,
        Verb::CreateSource,
        Verb::CreatePiiToken,
        Verb::CreateAccountToken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::SetPublishableKey => "setPublishableKey",
            Verb::CreateCardToken => "createCardToken",
            Verb::CreateBankAccountToken => "createBankAccountToken",
            Verb::ValidateCardNumber => "validateCardNumber",
            Verb::ValidateExpiryDate => "validateExpiryDate",
            Verb::ValidateCvc => "validateCVC",
            Verb::GetCardType => "getCardType",
            Verb::InitializeApplePayTransaction => "initializeApplePayTransaction",
            Verb::FinalizeApplePayTransaction => "finalizeApplePayTransaction",
            Verb::InitGooglePay => "initGooglePay",
            Verb::PayWithGooglePay => "payWithGooglePay",
            Verb::CreateSource => "createSource",
            Verb::CreatePiiToken => "createPiiToken",
            Verb::CreateAccountToken => "createAccountToken",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = BridgeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == name)
            .ok_or_else(|| BridgeError::UnknownVerb(name.to_string()))
    }
}

impl Serialize for Verb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single call across the native boundary.
///
/// Arguments are positional; their order is part of the native contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteCall {
    pub feature: &'static str,
    pub verb: Verb,
    pub args: Vec<Value>,
}

impl RemoteCall {
    pub fn new(verb: Verb, args: Vec<Value>) -> Self {
        Self {
            feature: FEATURE_NAME,
            verb,
            args,
        }
    }
}

/// The asynchronous channel to the native payment SDK.
///
/// An implementation resolves every call exactly once, either with the
/// native success payload or with the native error.
#[async_trait]
pub trait RemoteChannel: Send + Sync {
    async fn invoke(&self, call: RemoteCall) -> Result<Value, PluginError>;
}

pub type RemoteChannelRef = Arc<dyn RemoteChannel>;
