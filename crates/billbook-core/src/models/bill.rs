//! Utility bill record (`/bills`)

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{amount, timestamp, RecordId};

/// A utility bill as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: RecordId,
    /// Water bill total
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub embasa: f64,
    /// Electricity bill total
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub coelba: f64,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Request body for `POST /bills` and `PUT /bills/{id}`.
///
/// `updated_at` is only present for edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillPayload {
    pub embasa: f64,
    pub coelba: f64,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_bill() {
        let bill: Bill = serde_json::from_str(
            r#"{
                "id": "6f1c0a52-0c5e-4c43-9a52-3b0f5a0e8f11",
                "embasa": 123.45,
                "coelba": "67.89",
                "created_at": "2024-03-05T14:30:00Z",
                "updated_at": "0001-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(bill.id.as_str(), "6f1c0a52-0c5e-4c43-9a52-3b0f5a0e8f11");
        assert!((bill.embasa - 123.45).abs() < f64::EPSILON);
        assert!((bill.coelba - 67.89).abs() < f64::EPSILON);
        assert!(bill.created_at.is_some());
        assert!(bill.updated_at.is_none());
    }

    #[test]
    fn missing_optional_fields_default() {
        let bill: Bill = serde_json::from_str(r#"{"id": "abc", "updated_at": null}"#).unwrap();
        assert!(bill.embasa.abs() < f64::EPSILON);
        assert!(bill.created_at.is_none());
        assert!(bill.updated_at.is_none());
    }

    #[test]
    fn create_payload_omits_updated_at() {
        let payload = BillPayload {
            embasa: 12.5,
            coelba: 30.0,
            created_at: "2024-03-05T14:30:00.000Z".to_string(),
            updated_at: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("updated_at").is_none());
        assert_eq!(value["created_at"], "2024-03-05T14:30:00.000Z");
    }
}
