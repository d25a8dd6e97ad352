//! Shared value types and display helpers

use chrono::{DateTime, Local, Utc};

/// A numbered parking space, `1..=total_spaces`
pub type Lot = u32;

/// Default currency symbol shown next to charges
pub const DEFAULT_CURRENCY: &str = "₹";

/// Date plus 12-hour time, e.g. "05 Mar 2025, 02:07:09 PM"
const TIMESTAMP_FORMAT: &str = "%d %b %Y, %I:%M:%S %p";

/// Render a timestamp in local time for display
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// Render a duration in hours with two decimals
pub fn format_hours(hours: f64) -> String {
    format!("{:.2} hours", hours)
}

/// Render a whole-unit charge with its currency symbol
pub fn format_cost(cost: u64, currency: &str) -> String {
    format!("{}{}", currency, cost)
}
