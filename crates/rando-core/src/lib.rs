//! Core types for the rando-search service.
//!
//! This crate provides the entity model and the per-variant collection
//! definitions shared by the generator, the query translator, the populator
//! and the search service:
//!
//! - [`Rando`] - A complete synthetic person record
//! - [`RandoRecord`] - A search result item (attributes may be projected away)
//! - [`Variant`] - Strategy for one collection shape (schema, indices,
//!   identity placement, encode/decode)
//! - [`FieldSpec`] - Queryable field metadata used to validate client queries
//!
//! # Architecture
//!
//! ```text
//! rando-core (this crate)
//!    │
//!    ├─── rando-generator         (produces Rando values)
//!    ├─── rando-query             (validates queries against FieldSpec)
//!    ├─── rando-populate-mongodb  (encodes Rando per Variant)
//!    └─── rando-search            (provisions collections, decodes results)
//! ```
//!
//! # Example
//!
//! ```rust
//! use rando_core::Variant;
//!
//! let variant = Variant::from_collection_name("randoCustom").unwrap();
//! assert_eq!(variant, Variant::Custom);
//! assert_eq!(variant.identity_field(), "randoID");
//! assert_eq!(Variant::Base.identity_field(), "_id");
//! ```

pub mod entity;
pub mod fields;
pub mod variant;

// Re-exports for convenience
pub use entity::{DecodeError, Rando, RandoRecord};
pub use fields::{FieldKind, FieldSpec, RANDO_FIELDS};
pub use variant::{IndexSpec, Variant};
