use serde::{Deserialize, Deserializer};

/// Seconds since the Unix epoch, as reported by the remote side.
///
/// Native SDKs disagree on the encoding, so both a JSON integer and a
/// stringified integer are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Created(pub u64);

impl Created {
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Created {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Secs(u64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Secs(secs) => Ok(Created(secs)),
            Raw::Float(secs) if secs >= 0.0 => Ok(Created(secs.trunc() as u64)),
            Raw::Float(secs) => Err(serde::de::Error::custom(format!(
                "negative timestamp: {secs}"
            ))),
            Raw::Text(s) => s
                .parse::<u64>()
                .map(Created)
                .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
        }
    }
}

/// The common part of every token the remote side returns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub created: Created,
}
