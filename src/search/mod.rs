//! Search endpoints over the Rando collections.

pub mod error;
pub mod pipeline;
pub mod server;
pub mod store;

#[cfg(test)]
mod fake;

pub use error::{SearchError, Stage};
pub use pipeline::{SearchOutcome, SearchPipeline, SearchResponse};
pub use server::router;
pub use store::{MongoStore, RandoStore, StoreError};
