//! Random Rando record generator.
//!
//! Produces synthetic person records with internally consistent timestamps
//! (`createdAt <= updatedAt`, both within the past 365 days) and random
//! attribute values. Every call is independent; pass a seeded RNG to
//! [`generate_rando_with`] for reproducible output.
//!
//! # Example
//!
//! ```rust
//! use rando_generator::generate_rando;
//!
//! let rando = generate_rando();
//! assert!(rando.created_at <= rando.updated_at);
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{generate_document, generate_rando, generate_rando_with, COLORS, EMAIL_HOSTS};
