//! Data models for billbook

mod bill;
mod item;
mod record_id;

pub use bill::{Bill, BillPayload};
pub use item::{Item, ItemPayload};
pub use record_id::RecordId;

/// Lenient amount decoding: JSON numbers, numeric strings, or `null`.
pub(crate) mod amount {
    use serde::{Deserialize, Deserializer};

    use crate::util::parse_amount;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Missing(()),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(value) => value,
            RawAmount::Text(text) => parse_amount(&text),
            RawAmount::Missing(()) => 0.0,
        })
    }
}

/// Optional record timestamps; unset, empty, zero or unparsable values become `None`.
pub(crate) mod timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer};

    use crate::time::parse_record_timestamp;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_record_timestamp))
    }
}
