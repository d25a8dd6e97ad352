//! Parking fee calculation

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours between entry and exit, clamped at zero
pub fn duration_hours(entry: DateTime<Utc>, exit: DateTime<Utc>) -> f64 {
    let millis = (exit - entry).num_milliseconds().max(0);
    millis as f64 / MILLIS_PER_HOUR
}

/// Charge for a stay, always rounded up to the next whole unit.
///
/// Any positive stay at a positive rate costs at least 1. Charges too large
/// for `u64` saturate at `u64::MAX`.
pub fn compute_cost(duration_hours: f64, hourly_rate: f64) -> u64 {
    if duration_hours <= 0.0 || hourly_rate <= 0.0 {
        return 0;
    }
    (duration_hours * hourly_rate).ceil() as u64
}
