//! Queryable field metadata.
//!
//! Field names here are the public (JSON) names. The identity field is
//! `randoID` for both variants; [`crate::Variant::storage_field`] maps it to
//! the field that actually holds the identity in storage.

/// Public name of the identity attribute.
pub const RANDO_ID: &str = "randoID";
/// Public name of the creation timestamp.
pub const CREATED_AT: &str = "createdAt";
/// Public name of the last-update timestamp.
pub const UPDATED_AT: &str = "updatedAt";
/// Public name of the email attribute.
pub const EMAIL: &str = "email";
/// Public name of the favorite color attribute.
pub const FAVORITE_COLOR: &str = "favoriteColor";
/// Public name of the first name attribute.
pub const FIRST_NAME: &str = "firstName";
/// Public name of the last name attribute.
pub const LAST_NAME: &str = "lastName";

/// Primitive type of a queryable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Date,
}

impl FieldKind {
    /// The `$jsonSchema` bsonType for this kind.
    pub fn bson_type(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Date => "date",
        }
    }
}

/// A queryable field of the Rando entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Every attribute of the Rando entity, in alphabetical order.
pub const RANDO_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: CREATED_AT,
        kind: FieldKind::Date,
        description: "Date the user was created",
    },
    FieldSpec {
        name: EMAIL,
        kind: FieldKind::String,
        description: "Email address of the user",
    },
    FieldSpec {
        name: FAVORITE_COLOR,
        kind: FieldKind::String,
        description: "Favorite color of the user",
    },
    FieldSpec {
        name: FIRST_NAME,
        kind: FieldKind::String,
        description: "First name of the user",
    },
    FieldSpec {
        name: LAST_NAME,
        kind: FieldKind::String,
        description: "Last name of the user",
    },
    FieldSpec {
        name: RANDO_ID,
        kind: FieldKind::String,
        description: "Unique identifier for the user",
    },
    FieldSpec {
        name: UPDATED_AT,
        kind: FieldKind::Date,
        description: "Date the user was last updated",
    },
];

/// Look up a field by its public name.
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    RANDO_FIELDS.iter().find(|f| f.name == name)
}
