//! Individual value generators for the Rando attributes.
//!
//! Each generator takes the RNG explicitly so callers can choose between
//! thread-local randomness and a seeded RNG for reproducible output.

pub mod identity;
pub mod text;
pub mod timestamp;
