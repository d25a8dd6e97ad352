//! Domain model types

pub mod billing_record;
pub mod car_entry;

pub use billing_record::BillingRecord;
pub use car_entry::CarEntry;
