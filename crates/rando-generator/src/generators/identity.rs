//! Identity token generator.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Generate a random UUID v4 using the provided RNG.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Generate an identity token: a UUID v4 with the hyphens stripped.
pub fn generate_identity<R: Rng>(rng: &mut R) -> String {
    generate_uuid_v4(rng).simple().to_string()
}
