//! Free lot bookkeeping

use serde::{Deserialize, Serialize};

use parking_types::{Lot, ParkingError};

/// Tracks which lots in `1..=total_spaces` are unoccupied.
///
/// `free` is kept sorted ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotPool {
    total_spaces: u32,
    free: Vec<Lot>,
}

impl LotPool {
    pub fn new(total_spaces: u32) -> Self {
        let mut pool = Self::default();
        pool.configure(total_spaces);
        pool
    }

    /// Reset to `total_spaces` lots, all free
    pub fn configure(&mut self, total_spaces: u32) {
        self.total_spaces = total_spaces;
        self.free = (1..=total_spaces).collect();
    }

    /// Resize while keeping `occupied` lots taken.
    ///
    /// Occupied lots outside `1..=total_spaces` are ignored; callers decide
    /// whether such a resize is allowed.
    pub fn reconfigure(&mut self, total_spaces: u32, occupied: &[Lot]) {
        self.total_spaces = total_spaces;
        self.free = (1..=total_spaces)
            .filter(|lot| !occupied.contains(lot))
            .collect();
    }

    /// Take `lot` out of the free set
    pub fn acquire(&mut self, lot: Lot) -> Result<(), ParkingError> {
        match self.free.binary_search(&lot) {
            Ok(idx) => {
                self.free.remove(idx);
                Ok(())
            }
            Err(_) => Err(ParkingError::LotUnavailable(lot)),
        }
    }

    /// Return `lot` to the free set. Returns false if it was already free or
    /// does not exist.
    pub fn release(&mut self, lot: Lot) -> bool {
        if lot == 0 || lot > self.total_spaces {
            return false;
        }
        match self.free.binary_search(&lot) {
            Ok(_) => false,
            Err(idx) => {
                self.free.insert(idx, lot);
                true
            }
        }
    }

    pub fn is_free(&self, lot: Lot) -> bool {
        self.free.binary_search(&lot).is_ok()
    }

    pub fn free_lots(&self) -> &[Lot] {
        &self.free
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn total_spaces(&self) -> u32 {
        self.total_spaces
    }
}
