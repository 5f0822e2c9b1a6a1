//! Wallet models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FishAudioError;

/// API credit balance of the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user_id: String,
    pub credit: Decimal,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub has_phone_sha256: Option<bool>,
    #[serde(default)]
    pub has_free_credit: Option<bool>,
}

/// A prepaid package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub package_type: String,
    pub total: i64,
    pub balance: i64,
    pub created_at: String,
    pub updated_at: String,
    /// `None` while the package still has balance.
    #[serde(default)]
    pub finished_at: Option<String>,
}

/// A decimal amount kept exactly as the server wrote it.
///
/// The wallet API may send balances as strings to avoid float rounding, so the
/// original digits are preserved and only converted on request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// The digits as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nearest `f64`; may round for long fractions.
    pub fn to_f64(&self) -> f64 {
        // Validated on construction.
        self.0.parse().unwrap_or_default()
    }
}

impl FromStr for Decimal {
    type Err = FishAudioError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
            && trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        if !valid {
            return Err(FishAudioError::Validation(format!("invalid decimal: {value}")));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(serde_json::Number),
            String(String),
        }

        let raw = match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(value) => value.to_string(),
            NumberOrString::String(value) => value,
        };
        raw.parse().map_err(serde::de::Error::custom)
    }
}
