//! Rando entity types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error type for decoding a stored document into a [`RandoRecord`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A field holds a BSON value of the wrong type
    #[error("Field '{field}' has unexpected type {found:?} (expected {expected})")]
    UnexpectedType {
        field: String,
        expected: &'static str,
        found: bson::spec::ElementType,
    },
}

/// A complete synthetic person record.
///
/// This is what the generator produces and what gets written to storage.
/// Where the identity lives in the stored document depends on the
/// [`crate::Variant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rando {
    pub rando_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub favorite_color: String,
    pub first_name: String,
    pub last_name: String,
}

/// A search result item.
///
/// Every attribute is optional because a client projection may exclude any
/// of them. Absent attributes are omitted from the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandoRecord {
    #[serde(rename = "randoID", skip_serializing_if = "Option::is_none")]
    pub rando_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl From<Rando> for RandoRecord {
    fn from(rando: Rando) -> Self {
        Self {
            rando_id: Some(rando.rando_id),
            created_at: Some(rando.created_at),
            updated_at: Some(rando.updated_at),
            email: Some(rando.email),
            favorite_color: Some(rando.favorite_color),
            first_name: Some(rando.first_name),
            last_name: Some(rando.last_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Rando {
        Rando {
            rando_id: "0f8fad5bd9cb469fa16570867728950e".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            email: "abcdefghij@gmail.com".to_string(),
            favorite_color: "blue".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
        }
    }

    #[test]
    fn test_record_json_names() {
        let json = serde_json::to_value(RandoRecord::from(sample())).unwrap();
        assert_eq!(json["randoID"], "0f8fad5bd9cb469fa16570867728950e");
        assert_eq!(json["favoriteColor"], "blue");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_record_omits_missing_attributes() {
        let record = RandoRecord {
            email: Some("x@test.com".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["email"], "x@test.com");
    }

    #[test]
    fn test_record_from_rando() {
        let record = RandoRecord::from(sample());
        assert_eq!(record.first_name.as_deref(), Some("Alice"));
        assert!(record.created_at <= record.updated_at);
    }
}
