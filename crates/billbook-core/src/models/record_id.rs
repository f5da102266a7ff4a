//! Server-assigned record identifier

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Opaque identifier assigned by the backend.
///
/// Bills use UUID strings and items use integers; both are kept as text so the
/// client never has to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Parse a user- or server-provided id, rejecting blank values.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("record id must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self::parse(&text).map_err(de::Error::custom),
            RawId::Number(number) => Ok(Self(number.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(RecordId::parse("  abc  ").unwrap().as_str(), "abc");
        assert!(RecordId::parse(" \t ").is_err());
    }

    #[test]
    fn deserializes_strings_and_numbers() {
        let from_text: RecordId =
            serde_json::from_str("\"6f1c0a52-0c5e-4c43-9a52-3b0f5a0e8f11\"").unwrap();
        assert_eq!(from_text.as_str(), "6f1c0a52-0c5e-4c43-9a52-3b0f5a0e8f11");

        let from_number: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn rejects_empty_string_id() {
        assert!(serde_json::from_str::<RecordId>("\"\"").is_err());
    }
}
