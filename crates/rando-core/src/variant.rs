//! Per-variant collection definitions.
//!
//! A [`Variant`] bundles everything that differs between the two Rando
//! collections: the collection name, the `$jsonSchema` validator, the index
//! set, where the identity is stored, and how entities are encoded to and
//! decoded from BSON documents.

use crate::entity::{DecodeError, Rando, RandoRecord};
use crate::fields::{
    self, FieldKind, FieldSpec, CREATED_AT, EMAIL, FAVORITE_COLOR, FIRST_NAME, LAST_NAME,
    RANDO_FIELDS, RANDO_ID, UPDATED_AT,
};
use bson::{doc, Bson, DateTime as BsonDateTime, Document};
use chrono::{DateTime, Utc};
use std::fmt;

/// Storage primary key field.
pub const PRIMARY_KEY: &str = "_id";

/// The two Rando collection shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Identity is the storage primary key (`_id`).
    Base,
    /// Identity is the unique-indexed `randoID` attribute; storage assigns `_id`.
    Custom,
}

/// One index of a collection: a single key with a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub field: &'static str,
    /// 1 for ascending, -1 for descending
    pub direction: i32,
    pub unique: bool,
}

impl IndexSpec {
    const fn new(field: &'static str, direction: i32, unique: bool) -> Self {
        Self {
            field,
            direction,
            unique,
        }
    }

    /// Index key document, e.g. `{ "email": 1 }`.
    pub fn keys(&self) -> Document {
        let mut keys = Document::new();
        keys.insert(self.field, self.direction);
        keys
    }
}

const BASE_INDEXES: [IndexSpec; 4] = [
    IndexSpec::new(CREATED_AT, 1, false),
    IndexSpec::new(EMAIL, 1, true),
    IndexSpec::new(FAVORITE_COLOR, -1, false),
    IndexSpec::new(UPDATED_AT, -1, false),
];

impl Variant {
    /// Both variants, in provisioning order.
    pub const ALL: [Variant; 2] = [Variant::Base, Variant::Custom];

    /// Name of the backing collection.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Variant::Base => "randoBase",
            Variant::Custom => "randoCustom",
        }
    }

    /// Resolve a collection name to its variant.
    pub fn from_collection_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.collection_name() == name)
    }

    /// Storage field holding the identity.
    pub fn identity_field(&self) -> &'static str {
        match self {
            Variant::Base => PRIMARY_KEY,
            Variant::Custom => RANDO_ID,
        }
    }

    /// Map a public field name to the storage field name.
    pub fn storage_field<'a>(&self, public_name: &'a str) -> &'a str {
        if public_name == RANDO_ID {
            self.identity_field()
        } else {
            public_name
        }
    }

    /// Look up a queryable field by its public name.
    pub fn field(&self, public_name: &str) -> Option<&'static FieldSpec> {
        fields::find_field(public_name)
    }

    /// The `$jsonSchema` document enforced by the collection validator.
    ///
    /// The base schema does not describe the identity since it is the
    /// primary key; the custom schema declares and requires `randoID`.
    pub fn schema(&self) -> Document {
        let mut properties = Document::new();
        let mut required = Vec::new();
        for field in RANDO_FIELDS {
            if field.name == RANDO_ID && *self == Variant::Base {
                continue;
            }
            properties.insert(
                field.name,
                doc! {
                    "bsonType": field.kind.bson_type(),
                    "description": field.description,
                },
            );
            required.push(Bson::String(field.name.to_string()));
        }

        doc! {
            "bsonType": "object",
            "required": required,
            "properties": properties,
        }
    }

    /// Validator document for collection creation.
    pub fn validator(&self) -> Document {
        doc! { "$jsonSchema": self.schema() }
    }

    /// Indices created alongside the collection.
    pub fn indexes(&self) -> Vec<IndexSpec> {
        let mut indexes = BASE_INDEXES.to_vec();
        if *self == Variant::Custom {
            indexes.push(IndexSpec::new(RANDO_ID, 1, true));
        }
        indexes
    }

    /// Encode an entity as the document stored in this variant's collection.
    pub fn encode(&self, rando: &Rando) -> Document {
        let mut doc = Document::new();
        doc.insert(self.identity_field(), rando.rando_id.clone());
        doc.insert(CREATED_AT, BsonDateTime::from_chrono(rando.created_at));
        doc.insert(EMAIL, rando.email.clone());
        doc.insert(FAVORITE_COLOR, rando.favorite_color.clone());
        doc.insert(FIRST_NAME, rando.first_name.clone());
        doc.insert(LAST_NAME, rando.last_name.clone());
        doc.insert(UPDATED_AT, BsonDateTime::from_chrono(rando.updated_at));
        doc
    }

    /// Decode a stored (possibly projected) document.
    ///
    /// Missing or null attributes decode to `None`; attributes of the wrong
    /// BSON type are an error. For the custom variant the storage `_id` is
    /// ignored.
    pub fn decode(&self, mut doc: Document) -> Result<RandoRecord, DecodeError> {
        Ok(RandoRecord {
            rando_id: take_string(&mut doc, self.identity_field())?,
            created_at: take_date(&mut doc, CREATED_AT)?,
            updated_at: take_date(&mut doc, UPDATED_AT)?,
            email: take_string(&mut doc, EMAIL)?,
            favorite_color: take_string(&mut doc, FAVORITE_COLOR)?,
            first_name: take_string(&mut doc, FIRST_NAME)?,
            last_name: take_string(&mut doc, LAST_NAME)?,
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}

fn unexpected(field: &str, kind: FieldKind, found: &Bson) -> DecodeError {
    DecodeError::UnexpectedType {
        field: field.to_string(),
        expected: kind.bson_type(),
        found: found.element_type(),
    }
}

fn take_string(doc: &mut Document, field: &str) -> Result<Option<String>, DecodeError> {
    match doc.remove(field) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(s)) => Ok(Some(s)),
        Some(other) => Err(unexpected(field, FieldKind::String, &other)),
    }
}

fn take_date(doc: &mut Document, field: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
    match doc.remove(field) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(dt)) => Ok(Some(dt.to_chrono())),
        Some(other) => Err(unexpected(field, FieldKind::Date, &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use chrono::TimeZone;

    fn sample() -> Rando {
        Rando {
            rando_id: "3b241101e2bb42558caf4136c566a962".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 3, 14, 15, 9, 26).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 9, 1, 8, 0, 0).unwrap(),
            email: "qwertyuiopas@yahoo.com".to_string(),
            favorite_color: "indigo".to_string(),
            first_name: "Jonas7".to_string(),
            last_name: "Kowal".to_string(),
        }
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Variant::Base.collection_name(), "randoBase");
        assert_eq!(Variant::Custom.collection_name(), "randoCustom");
        assert_eq!(
            Variant::from_collection_name("randoBase"),
            Some(Variant::Base)
        );
        assert_eq!(Variant::from_collection_name("randos"), None);
    }

    #[test]
    fn test_storage_field_mapping() {
        assert_eq!(Variant::Base.storage_field("randoID"), "_id");
        assert_eq!(Variant::Custom.storage_field("randoID"), "randoID");
        assert_eq!(Variant::Base.storage_field("email"), "email");
    }

    #[test]
    fn test_schema_identity_rule() {
        let base = Variant::Base.schema();
        let custom = Variant::Custom.schema();

        let base_props = base.get_document("properties").unwrap();
        let custom_props = custom.get_document("properties").unwrap();
        assert!(!base_props.contains_key("randoID"));
        assert_eq!(
            custom_props
                .get_document("randoID")
                .unwrap()
                .get_str("bsonType")
                .unwrap(),
            "string"
        );
        assert_eq!(
            base_props
                .get_document("createdAt")
                .unwrap()
                .get_str("bsonType")
                .unwrap(),
            "date"
        );

        assert_eq!(base.get_array("required").unwrap().len(), 6);
        assert_eq!(custom.get_array("required").unwrap().len(), 7);
        assert!(Variant::Custom
            .validator()
            .get_document("$jsonSchema")
            .is_ok());
    }

    #[test]
    fn test_index_sets() {
        let base = Variant::Base.indexes();
        assert_eq!(base.len(), 4);
        let email = base.iter().find(|i| i.field == "email").unwrap();
        assert!(email.unique);
        assert_eq!(email.keys(), doc! { "email": 1 });
        let color = base.iter().find(|i| i.field == "favoriteColor").unwrap();
        assert_eq!(color.direction, -1);
        assert!(!color.unique);

        let custom = Variant::Custom.indexes();
        assert_eq!(custom.len(), 5);
        let identity = custom.iter().find(|i| i.field == "randoID").unwrap();
        assert!(identity.unique);
        assert_eq!(identity.direction, 1);
    }

    #[test]
    fn test_encode_identity_placement() {
        let rando = sample();

        let base = Variant::Base.encode(&rando);
        assert_eq!(base.get_str("_id").unwrap(), rando.rando_id);
        assert!(!base.contains_key("randoID"));

        let custom = Variant::Custom.encode(&rando);
        assert_eq!(custom.get_str("randoID").unwrap(), rando.rando_id);
        assert!(!custom.contains_key("_id"));
        assert!(custom.get_datetime("createdAt").is_ok());
    }

    #[test]
    fn test_decode_encoded_document() {
        let rando = sample();
        for variant in Variant::ALL {
            let mut doc = variant.encode(&rando);
            if variant == Variant::Custom {
                doc.insert("_id", ObjectId::new());
            }
            let record = variant.decode(doc).unwrap();
            assert_eq!(record, RandoRecord::from(rando.clone()));
        }
    }

    #[test]
    fn test_decode_projected_document() {
        let record = Variant::Base
            .decode(doc! { "_id": "abc", "email": "x@test.com" })
            .unwrap();
        assert_eq!(record.rando_id.as_deref(), Some("abc"));
        assert_eq!(record.email.as_deref(), Some("x@test.com"));
        assert!(record.created_at.is_none());
        assert!(record.first_name.is_none());
    }

    #[test]
    fn test_decode_wrong_type() {
        let err = Variant::Custom
            .decode(doc! { "createdAt": "yesterday" })
            .unwrap_err();
        assert!(err.to_string().contains("createdAt"));
    }
}
