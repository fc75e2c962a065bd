use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The failure value exchanged with the remote side: a single `message`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct PluginError {
    pub message: String,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("{0}")]
    InvalidOptions(String),
    #[error("Unknown verb: {0}")]
    UnknownVerb(String),
    #[error("Unknown source type: {0}")]
    UnknownSourceType(String),
    #[error("Invalid params for source type {source_type}: {reason}")]
    SourceParamsMismatch { source_type: String, reason: String },
    #[error(transparent)]
    Remote(#[from] PluginError),
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BridgeError> for PluginError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Remote(remote) => remote,
            other => PluginError::new(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
