//! Occupancy ledger: cars currently parked

use log::debug;
use serde::{Deserialize, Serialize};

use parking_types::{Lot, ParkingError};

use super::LotPool;
use crate::clock::Clock;
use crate::model::{BillingRecord, CarEntry};

/// Active parking sessions in arrival order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    cars: Vec<CarEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a car in `lot`.
    ///
    /// Owner name and plate are trimmed; both must be non-empty and a lot
    /// must be selected. Nothing changes when the call is rejected.
    pub fn add_car(
        &mut self,
        owner_name: &str,
        plate_number: &str,
        lot: Option<Lot>,
        pool: &mut LotPool,
        clock: &dyn Clock,
    ) -> Result<CarEntry, ParkingError> {
        let owner_name = owner_name.trim();
        let plate_number = plate_number.trim();

        if owner_name.is_empty() {
            return Err(ParkingError::InvalidInput("owner name is required".to_string()));
        }
        if plate_number.is_empty() {
            return Err(ParkingError::InvalidInput("plate number is required".to_string()));
        }
        let lot = lot.ok_or_else(|| ParkingError::InvalidInput("a lot must be selected".to_string()))?;

        if self.find(plate_number).is_some() {
            return Err(ParkingError::DuplicatePlate(plate_number.to_string()));
        }

        pool.acquire(lot)?;

        let entry = CarEntry {
            owner_name: owner_name.to_string(),
            plate_number: plate_number.to_string(),
            lot,
            entry_time: clock.now(),
        };
        debug!("entry time for {}: {}", entry.plate_number, entry.entry_time);
        self.cars.push(entry.clone());
        Ok(entry)
    }

    /// End the session for `plate_number`, free its lot and bill it
    pub fn remove_car(
        &mut self,
        plate_number: &str,
        hourly_rate: f64,
        pool: &mut LotPool,
        clock: &dyn Clock,
    ) -> Result<BillingRecord, ParkingError> {
        let plate_number = plate_number.trim();
        let idx = self
            .cars
            .iter()
            .position(|car| car.plate_number == plate_number)
            .ok_or_else(|| ParkingError::NotFound(plate_number.to_string()))?;

        let exit_time = clock.now();
        let entry = self.cars.remove(idx);
        pool.release(entry.lot);
        debug!("exit time for {}: {}", entry.plate_number, exit_time);

        Ok(BillingRecord::settle(entry, exit_time, hourly_rate))
    }

    pub fn find(&self, plate_number: &str) -> Option<&CarEntry> {
        self.cars.iter().find(|car| car.plate_number == plate_number)
    }

    pub fn active_cars(&self) -> &[CarEntry] {
        &self.cars
    }

    pub fn occupied_lots(&self) -> Vec<Lot> {
        self.cars.iter().map(|car| car.lot).collect()
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}
