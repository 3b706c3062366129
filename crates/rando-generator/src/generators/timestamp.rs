//! Timestamp value generators.
//!
//! All timestamps are produced at millisecond precision so they survive a
//! round trip through BSON dates unchanged.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// How far back a creation timestamp may go, in hours.
pub const MAX_AGE_HOURS: i64 = 365 * 24;

/// [`MAX_AGE_HOURS`] as a duration.
pub fn max_age() -> Duration {
    Duration::hours(MAX_AGE_HOURS)
}

/// Truncate a timestamp to millisecond precision.
pub fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt)
}

/// Generate a creation timestamp in `[now - max_age(), now)`.
pub fn random_created_at<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let now_ms = now.timestamp_millis();
    let offset = rng.gen_range(1..=max_age().num_milliseconds());
    DateTime::from_timestamp_millis(now_ms - offset).unwrap_or(now)
}

/// Generate an update timestamp in `[created_at, now)`.
///
/// Returns `created_at` when the interval is empty.
pub fn random_updated_at<R: Rng>(
    rng: &mut R,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let from = created_at.timestamp_millis();
    let to = now.timestamp_millis();
    if from >= to {
        return created_at;
    }
    DateTime::from_timestamp_millis(rng.gen_range(from..to)).unwrap_or(created_at)
}
