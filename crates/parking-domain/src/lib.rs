//! Parking lot domain: lots, parked cars and billing

pub mod clock;
pub mod model;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use model::{BillingRecord, CarEntry};
pub use service::{Ledger, LotPool};
