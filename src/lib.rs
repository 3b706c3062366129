//! Rando Search Library
//!
//! Seeds MongoDB with synthetic "Rando" person records and serves them
//! through two versioned, paginated, filterable search endpoints.
//!
//! # Endpoints
//!
//! - `GET /v0/randos` - base variant (`randoBase`, identity stored as `_id`)
//! - `GET /v1/randos` - custom variant (`randoCustom`, identity in the
//!   unique-indexed `randoID` attribute)
//!
//! # Workspace Crates
//!
//! - `rando_core` - entity model and per-variant collection definitions
//! - `rando_generator` - random record generation
//! - `rando_query` - query-string translation into MongoDB filters
//! - `rando_populate_mongodb` - batched, cancellable seeding
//!
//! # CLI Usage
//!
//! ```bash
//! # Serve the search endpoints
//! rando-search --settings settings/defaults.yaml --env docker
//!
//! # Seed both collections, then exit
//! rando-search --populate --populate-count 100000
//! ```

pub mod config;
pub mod connect;
pub mod logging;
pub mod provision;
pub mod search;

pub use config::{Settings, SettingsError};
pub use provision::{ensure_collection, ensure_collections, ProvisionError, Provisioned};
