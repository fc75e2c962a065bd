//! Local payment method sources.
//!
//! A source is created from a [`SourceType`] and the params shape that goes
//! with it. [`SourceParams`] carries one variant per type, so the pairing is
//! fixed at compile time and the type is derived from the params.

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The closed set of source kinds.
///
/// The native side decodes the kind by its position in this list, so the
/// declaration order is a wire contract. Never reorder or insert in the
/// middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    ThreeDeeSecure,
    GiroPay,
    Ideal,
    SepaDebit,
    Sofort,
    Alipay,
    AlipayReusable,
    P24,
    VisaCheckout,
}

impl SourceType {
    pub const ALL: [SourceType; 9] = [
        SourceType::ThreeDeeSecure,
        SourceType::GiroPay,
        SourceType::Ideal,
        SourceType::SepaDebit,
        SourceType::Sofort,
        SourceType::Alipay,
        SourceType::AlipayReusable,
        SourceType::P24,
        SourceType::VisaCheckout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::ThreeDeeSecure => "3ds",
            SourceType::GiroPay => "giropay",
            SourceType::Ideal => "ideal",
            SourceType::SepaDebit => "sepadebit",
            SourceType::Sofort => "sofort",
            SourceType::Alipay => "alipay",
            SourceType::AlipayReusable => "alipayreusable",
            SourceType::P24 => "p24",
            SourceType::VisaCheckout => "visacheckout",
        }
    }

    /// Zero-based wire position.
    pub fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = BridgeError;

    /// Case-insensitive lookup of a source tag.
    fn from_str(tag: &str) -> Result<Self> {
        SourceType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| BridgeError::UnknownSourceType(tag.to_string()))
    }
}

/// Resolves a source tag, in any letter case, to its wire position.
pub fn position_of(tag: &str) -> Result<usize> {
    tag.parse::<SourceType>().map(SourceType::position)
}

/// 3-D Secure verification of an existing card source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThreeDeeSecureParams {
    pub amount: u64,
    pub currency: String,
    /// Where to redirect after the card has been verified.
    #[serde(rename = "returnURL")]
    pub return_url: String,
    /// Card source ID.
    pub card: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GiroPayParams {
    pub amount: u64,
    pub name: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
    pub statement_descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdealParams {
    pub amount: u64,
    pub name: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
    pub statement_descriptor: String,
    pub bank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SepaDebitParams {
    pub name: String,
    pub iban: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SofortParams {
    pub amount: u64,
    #[serde(rename = "returnURL")]
    pub return_url: String,
    pub country: String,
    pub statement_descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlipayParams {
    pub amount: u64,
    pub currency: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlipayReusableParams {
    pub currency: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct P24Params {
    pub amount: u64,
    pub currency: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VisaCheckoutParams {
    pub call_id: String,
}

/// Params for `createSource`, one variant per [`SourceType`].
///
/// Serializes as the bare params object; the type travels separately as its
/// position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceParams {
    ThreeDeeSecure(ThreeDeeSecureParams),
    GiroPay(GiroPayParams),
    Ideal(IdealParams),
    SepaDebit(SepaDebitParams),
    Sofort(SofortParams),
    Alipay(AlipayParams),
    AlipayReusable(AlipayReusableParams),
    P24(P24Params),
    VisaCheckout(VisaCheckoutParams),
}

impl SourceParams {
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceParams::ThreeDeeSecure(_) => SourceType::ThreeDeeSecure,
            SourceParams::GiroPay(_) => SourceType::GiroPay,
            SourceParams::Ideal(_) => SourceType::Ideal,
            SourceParams::SepaDebit(_) => SourceType::SepaDebit,
            SourceParams::Sofort(_) => SourceType::Sofort,
            SourceParams::Alipay(_) => SourceType::Alipay,
            SourceParams::AlipayReusable(_) => SourceType::AlipayReusable,
            SourceParams::P24(_) => SourceType::P24,
            SourceParams::VisaCheckout(_) => SourceType::VisaCheckout,
        }
    }

    /// Builds params from a loosely typed tag and JSON object.
    ///
    /// Fails on an unknown tag, or when the object does not have exactly the
    /// shape the tag calls for.
    pub fn from_tagged(tag: &str, params: Value) -> Result<Self> {
        let source_type: SourceType = tag.parse()?;
        let mismatch = |e: serde_json::Error| BridgeError::SourceParamsMismatch {
            source_type: source_type.to_string(),
            reason: e.to_string(),
        };

        let parsed = match source_type {
            SourceType::ThreeDeeSecure => {
                SourceParams::ThreeDeeSecure(serde_json::from_value(params).map_err(mismatch)?)
            }
            SourceType::GiroPay => {
                SourceParams::GiroPay(serde_json::from_value(params).map_err(mismatch)?)
            }
            SourceType::Ideal => SourceParams::Ideal(serde_json::from_value(params).map_err(mismatch)?),
            SourceType::SepaDebit => {
                SourceParams::SepaDebit(serde_json::from_value(params).map_err(mismatch)?)
            }
            SourceType::Sofort => SourceParams::Sofort(serde_json::from_value(params).map_err(mismatch)?),
            SourceType::Alipay => SourceParams::Alipay(serde_json::from_value(params).map_err(mismatch)?),
            SourceType::AlipayReusable => {
                SourceParams::AlipayReusable(serde_json::from_value(params).map_err(mismatch)?)
            }
            SourceType::P24 => SourceParams::P24(serde_json::from_value(params).map_err(mismatch)?),
            SourceType::VisaCheckout => {
                SourceParams::VisaCheckout(serde_json::from_value(params).map_err(mismatch)?)
            }
        };
        Ok(parsed)
    }
}
