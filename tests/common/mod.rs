#![allow(dead_code)]

use serde_json::Value;
use std::io::{Error, Write};
use stripe_bridge::domain::wallet::{ApplePayItem, ApplePayOptions};
use tempfile::NamedTempFile;

/// Writes one JSON request per line into a temporary file.
pub fn requests_file(requests: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    for request in requests {
        writeln!(file, "{}", request)?;
    }
    file.flush()?;
    Ok(file)
}

/// Parses every stdout line as a call frame.
pub fn frames(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("frame is not JSON"))
        .collect()
}

pub fn apple_pay_options(items: Vec<ApplePayItem>) -> ApplePayOptions {
    ApplePayOptions {
        merchant_id: "merchant.com.example".to_string(),
        country: "US".to_string(),
        currency: "USD".to_string(),
        items,
        mode: "test".to_string(),
    }
}

pub fn token_json(id: &str) -> Value {
    serde_json::json!({ "id": id, "type": "card", "created": 1700000000 })
}
