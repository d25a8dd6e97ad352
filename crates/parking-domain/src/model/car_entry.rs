//! Active parking session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parking_types::Lot;

/// A car currently occupying a lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarEntry {
    /// Owner name as entered
    pub owner_name: String,
    /// Plate number, unique among parked cars
    pub plate_number: String,
    /// Assigned lot
    pub lot: Lot,
    /// When the car was added
    pub entry_time: DateTime<Utc>,
}
