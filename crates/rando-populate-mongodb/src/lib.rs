//! MongoDB populator for the Rando collections.
//!
//! Generates records with `rando-generator` and inserts them in ordered
//! batches. Population is not transactional: it stops at the first failed
//! insertion and leaves already-inserted documents in place.

pub mod args;
pub mod error;
pub mod insert;
pub mod populator;

pub use args::PopulateArgs;
pub use error::PopulateError;
pub use populator::{
    PopulateMetrics, PopulateProgress, RandoPopulator, DEFAULT_BATCH_SIZE, PROGRESS_INTERVAL,
};
