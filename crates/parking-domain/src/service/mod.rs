//! Domain services

pub mod fee;
pub mod ledger;
pub mod lot_pool;

pub use fee::{compute_cost, duration_hours};
pub use ledger::Ledger;
pub use lot_pool::LotPool;
