//! Parking Service - session state for one parking lot
//!
//! Owns the hourly rate, the lot pool, the occupancy ledger and the last
//! billing record. Every operation either applies completely or returns a
//! `ParkingError` and leaves the session as it was.

use log::{info, warn};
use serde::Serialize;

use parking_domain::{BillingRecord, CarEntry, Clock, Ledger, LotPool, SystemClock};
use parking_types::{Lot, ParkingError};

use crate::config::Config;

/// Serializable view of the whole session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub hourly_rate: f64,
    pub total_spaces: u32,
    pub free_lots: Vec<Lot>,
    pub active_cars: Vec<CarEntry>,
    pub last_billing_record: Option<BillingRecord>,
}

pub struct ParkingService {
    hourly_rate: f64,
    pool: LotPool,
    ledger: Ledger,
    last_bill: Option<BillingRecord>,
    clock: Box<dyn Clock>,
}

impl Default for ParkingService {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingService {
    /// Empty session on the wall clock: no spaces, zero rate
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            hourly_rate: 0.0,
            pool: LotPool::default(),
            ledger: Ledger::new(),
            last_bill: None,
            clock,
        }
    }

    /// Session seeded with the configured rate and space count
    pub fn from_config(config: &Config, clock: Box<dyn Clock>) -> Result<Self, ParkingError> {
        let mut service = Self::with_clock(clock);
        service.set_hourly_rate(config.hourly_rate)?;
        service.set_total_spaces(config.total_spaces)?;
        Ok(service)
    }

    pub fn set_hourly_rate(&mut self, rate: f64) -> Result<(), ParkingError> {
        if !rate.is_finite() || rate < 0.0 {
            warn!("rejected hourly rate {}", rate);
            return Err(ParkingError::InvalidInput(format!(
                "hourly rate must be a non-negative number, got {}",
                rate
            )));
        }
        self.hourly_rate = rate;
        info!("hourly rate set to {}", rate);
        Ok(())
    }

    /// Parse a rate as typed into a form field. Blank means zero.
    pub fn set_hourly_rate_str(&mut self, input: &str) -> Result<(), ParkingError> {
        let input = input.trim();
        if input.is_empty() {
            return self.set_hourly_rate(0.0);
        }
        let rate = input.parse::<f64>().map_err(|_| {
            warn!("rejected hourly rate {:?}", input);
            ParkingError::InvalidInput(format!("hourly rate must be a number, got {:?}", input))
        })?;
        self.set_hourly_rate(rate)
    }

    /// Change the number of spaces.
    ///
    /// With no cars parked every lot becomes free. With cars parked, their
    /// lots stay taken and the rest of `1..=total_spaces` is free; shrinking
    /// below an occupied lot is rejected.
    pub fn set_total_spaces(&mut self, total_spaces: u32) -> Result<(), ParkingError> {
        if self.ledger.is_empty() {
            self.pool.configure(total_spaces);
            info!("lot reset to {} free spaces", total_spaces);
            return Ok(());
        }

        let occupied = self.ledger.occupied_lots();
        let mut stranded: Vec<Lot> = occupied
            .iter()
            .copied()
            .filter(|lot| *lot > total_spaces)
            .collect();
        if !stranded.is_empty() {
            stranded.sort_unstable();
            warn!(
                "rejected resize to {} spaces, lots {:?} are occupied",
                total_spaces, stranded
            );
            return Err(ParkingError::LotsOccupied {
                requested: total_spaces,
                occupied: stranded,
            });
        }

        self.pool.reconfigure(total_spaces, &occupied);
        info!(
            "lot resized to {} spaces, {} occupied",
            total_spaces,
            occupied.len()
        );
        Ok(())
    }

    pub fn add_car(
        &mut self,
        owner_name: &str,
        plate_number: &str,
        lot: Option<Lot>,
    ) -> Result<CarEntry, ParkingError> {
        match self
            .ledger
            .add_car(owner_name, plate_number, lot, &mut self.pool, &*self.clock)
        {
            Ok(entry) => {
                info!(
                    "parked {} ({}) in lot {}",
                    entry.plate_number, entry.owner_name, entry.lot
                );
                Ok(entry)
            }
            Err(e) => {
                warn!("add car rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Remove a car and keep its bill as the last transaction
    pub fn remove_car(&mut self, plate_number: &str) -> Result<BillingRecord, ParkingError> {
        match self.ledger.remove_car(
            plate_number,
            self.hourly_rate,
            &mut self.pool,
            &*self.clock,
        ) {
            Ok(record) => {
                info!(
                    "{} left lot {} after {:.2} hours, charged {}",
                    record.plate_number, record.lot, record.duration_hours, record.cost
                );
                self.last_bill = Some(record.clone());
                Ok(record)
            }
            Err(e) => {
                warn!("remove car rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn free_lots(&self) -> &[Lot] {
        self.pool.free_lots()
    }

    pub fn is_lot_free(&self, lot: Lot) -> bool {
        self.pool.is_free(lot)
    }

    pub fn active_cars(&self) -> &[CarEntry] {
        self.ledger.active_cars()
    }

    pub fn last_billing_record(&self) -> Option<&BillingRecord> {
        self.last_bill.as_ref()
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    pub fn total_spaces(&self) -> u32 {
        self.pool.total_spaces()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            hourly_rate: self.hourly_rate,
            total_spaces: self.total_spaces(),
            free_lots: self.free_lots().to_vec(),
            active_cars: self.active_cars().to_vec(),
            last_billing_record: self.last_bill.clone(),
        }
    }
}
