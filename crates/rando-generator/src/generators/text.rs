//! String value generators.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate an alphanumeric string of exactly `len` characters.
pub fn random_string<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate an alphanumeric string with a length in `[min, max)`.
///
/// Swaps the bounds when reversed; equal bounds yield exactly `min`
/// characters.
pub fn random_length_string<R: Rng>(rng: &mut R, min: usize, max: usize) -> String {
    let (min, max) = if min > max { (max, min) } else { (min, max) };
    let len = if min == max {
        min
    } else {
        rng.gen_range(min..max)
    };
    random_string(rng, len)
}

/// Pick one value uniformly from a non-empty list.
pub fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

/// Generate `<local>@<host>` with a random local part of length `[10, 15)`.
pub fn random_email<R: Rng>(rng: &mut R, hosts: &[&str]) -> String {
    let local = random_length_string(rng, 10, 15);
    format!("{}@{}", local, pick(rng, hosts))
}
