//! Rando record generation.

use crate::generators::identity::generate_identity;
use crate::generators::text::{pick, random_email, random_length_string};
use crate::generators::timestamp::{random_created_at, random_updated_at, truncate_to_millis};
use bson::Document;
use chrono::{DateTime, Utc};
use rand::Rng;
use rando_core::{Rando, Variant};

/// Palette for `favoriteColor`.
pub const COLORS: &[&str] = &["red", "orange", "yellow", "green", "blue", "indigo", "violet"];

/// Host names used for generated email addresses.
pub const EMAIL_HOSTS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "yahoo.com",
    "outlook.com",
    "icloud.com",
    "protonmail.com",
];

/// Name lengths are drawn from `[NAME_MIN_LEN, NAME_MAX_LEN)`.
pub const NAME_MIN_LEN: usize = 5;
pub const NAME_MAX_LEN: usize = 10;

/// Generate one Rando using thread-local randomness and the current time.
pub fn generate_rando() -> Rando {
    generate_rando_with(&mut rand::thread_rng(), Utc::now())
}

/// Generate one Rando from the given RNG, relative to `now`.
///
/// `created_at <= updated_at < now` holds by construction.
pub fn generate_rando_with<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Rando {
    let now = truncate_to_millis(now);
    let created_at = random_created_at(rng, now);
    let updated_at = random_updated_at(rng, created_at, now);

    Rando {
        rando_id: generate_identity(rng),
        created_at,
        updated_at,
        email: random_email(rng, EMAIL_HOSTS),
        favorite_color: pick(rng, COLORS).to_string(),
        first_name: random_length_string(rng, NAME_MIN_LEN, NAME_MAX_LEN),
        last_name: random_length_string(rng, NAME_MIN_LEN, NAME_MAX_LEN),
    }
}

/// Generate one Rando encoded as a document for the variant's collection.
pub fn generate_document(variant: Variant) -> Document {
    variant.encode(&generate_rando())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::timestamp::{max_age, truncate_to_millis};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generation_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = truncate_to_millis(Utc::now());
        for _ in 0..1000 {
            let rando = generate_rando_with(&mut rng, now);

            assert!(rando.created_at <= rando.updated_at);
            assert!(rando.updated_at <= now);
            assert!(rando.created_at >= now - max_age());
            assert!(COLORS.contains(&rando.favorite_color.as_str()));
            assert!((NAME_MIN_LEN..NAME_MAX_LEN).contains(&rando.first_name.len()));
            assert!((NAME_MIN_LEN..NAME_MAX_LEN).contains(&rando.last_name.len()));
            assert_eq!(rando.rando_id.len(), 32);

            let (_, host) = rando.email.split_once('@').unwrap();
            assert!(EMAIL_HOSTS.contains(&host));
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let now = Utc::now();
        let a = generate_rando_with(&mut StdRng::seed_from_u64(9), now);
        let b = generate_rando_with(&mut StdRng::seed_from_u64(9), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rando_uses_current_time() {
        let before = Utc::now();
        let rando = generate_rando();
        assert!(rando.created_at <= rando.updated_at);
        assert!(rando.updated_at <= Utc::now());
        assert!(rando.created_at >= before - max_age() - chrono::Duration::seconds(1));
    }

    #[test]
    fn test_generate_document_per_variant() {
        let base = generate_document(Variant::Base);
        assert!(base.get_str("_id").is_ok());
        assert!(!base.contains_key("randoID"));

        let custom = generate_document(Variant::Custom);
        assert!(custom.get_str("randoID").is_ok());
        assert!(custom.get_datetime("updatedAt").is_ok());
    }
}
