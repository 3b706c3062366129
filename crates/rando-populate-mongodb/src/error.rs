//! Error types for the populator.

use thiserror::Error;

/// Errors that can occur during population.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// An insertion failed; `index` is the zero-based position of the
    /// failing record within this run.
    #[error("Failed to insert document {index} into '{collection}': {source}")]
    Insert {
        collection: String,
        index: u64,
        #[source]
        source: mongodb::error::Error,
    },

    /// The run was cancelled between batches.
    #[error("Population of '{collection}' cancelled after {inserted} documents")]
    Cancelled { collection: String, inserted: u64 },

    /// MongoDB error outside of an insertion.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
