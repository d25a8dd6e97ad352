//! Result of ending a parking session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parking_types::Lot;

use super::CarEntry;
use crate::service::fee::{compute_cost, duration_hours};

/// Billing details for a car that left the lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub owner_name: String,
    pub plate_number: String,
    pub lot: Lot,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    /// Fractional hours parked, never negative
    pub duration_hours: f64,
    /// Rate in force when the car left
    pub hourly_rate: f64,
    /// Whole currency units, rounded up
    pub cost: u64,
}

impl BillingRecord {
    /// Bill a session that ends at `exit_time`
    pub fn settle(entry: CarEntry, exit_time: DateTime<Utc>, hourly_rate: f64) -> Self {
        let duration_hours = duration_hours(entry.entry_time, exit_time);
        let cost = compute_cost(duration_hours, hourly_rate);
        Self {
            owner_name: entry.owner_name,
            plate_number: entry.plate_number,
            lot: entry.lot,
            entry_time: entry.entry_time,
            exit_time,
            duration_hours,
            hourly_rate,
            cost,
        }
    }
}
