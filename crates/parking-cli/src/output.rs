//! Output formatting module

use std::io::Write;

use serde::Serialize;

use parking_app::app::SessionSnapshot;
use parking_domain::{BillingRecord, CarEntry};
use parking_types::{format_cost, format_hours, format_timestamp, Lot, OutputFormat, Result};

/// Renders session data in the chosen format
#[derive(Debug, Clone)]
pub struct Printer {
    pub format: OutputFormat,
    pub currency: String,
}

impl Printer {
    pub fn new(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self {
            format,
            currency: currency.into(),
        }
    }

    fn json<T: Serialize + ?Sized>(&self, out: &mut dyn Write, value: &T) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn car_added(&self, out: &mut dyn Write, entry: &CarEntry) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(out, entry);
        }
        writeln!(
            out,
            "Parked {} ({}) in lot {} at {}",
            entry.plate_number,
            entry.owner_name,
            entry.lot,
            format_timestamp(&entry.entry_time)
        )?;
        Ok(())
    }

    pub fn free_lots(&self, out: &mut dyn Write, lots: &[Lot]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(out, lots);
        }
        if lots.is_empty() {
            writeln!(out, "Free lots: (none)")?;
        } else {
            let list: Vec<String> = lots.iter().map(|lot| lot.to_string()).collect();
            writeln!(out, "Free lots: {}", list.join(", "))?;
        }
        Ok(())
    }

    pub fn cars(&self, out: &mut dyn Write, cars: &[CarEntry]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(out, cars);
        }
        writeln!(out, "\nCurrent Cars")?;
        writeln!(out, "============")?;
        if cars.is_empty() {
            writeln!(out, "No cars parked.")?;
            return Ok(());
        }
        for (i, car) in cars.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "Name:       {}", car.owner_name)?;
            writeln!(out, "Number:     {}", car.plate_number)?;
            writeln!(out, "Lot:        {}", car.lot)?;
            writeln!(out, "Entry Time: {}", format_timestamp(&car.entry_time))?;
        }
        Ok(())
    }

    pub fn details(&self, out: &mut dyn Write, record: Option<&BillingRecord>) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(out, &record);
        }
        writeln!(out, "\nDetails")?;
        writeln!(out, "=======")?;
        let Some(record) = record else {
            writeln!(out, "No car removed yet.")?;
            return Ok(());
        };
        writeln!(out, "Car Owner Name:  {}", record.owner_name)?;
        writeln!(out, "Car Number:      {}", record.plate_number)?;
        writeln!(out, "Entry Time:      {}", format_timestamp(&record.entry_time))?;
        writeln!(out, "Exit Time:       {}", format_timestamp(&record.exit_time))?;
        writeln!(out, "Duration Parked: {}", format_hours(record.duration_hours))?;
        writeln!(out, "Total Charges:   {}", format_cost(record.cost, &self.currency))?;
        Ok(())
    }

    pub fn status(&self, out: &mut dyn Write, snapshot: &SessionSnapshot) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(out, snapshot);
        }
        writeln!(out, "Charges per hour: {}", snapshot.hourly_rate)?;
        writeln!(
            out,
            "Parking spaces:   {} ({} free, {} parked)",
            snapshot.total_spaces,
            snapshot.free_lots.len(),
            snapshot.active_cars.len()
        )?;
        self.free_lots(out, &snapshot.free_lots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record() -> BillingRecord {
        let start = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        BillingRecord::settle(
            CarEntry {
                owner_name: "Alice".to_string(),
                plate_number: "KA01".to_string(),
                lot: 1,
                entry_time: start,
            },
            start + Duration::minutes(90),
            10.0,
        )
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_details_table() {
        let printer = Printer::new(OutputFormat::Table, "₹");
        let rec = record();
        let text = render(|out| printer.details(out, Some(&rec)));
        assert!(text.contains("Car Owner Name:  Alice"));
        assert!(text.contains("Duration Parked: 1.50 hours"));
        assert!(text.contains("Total Charges:   ₹15"));
    }

    #[test]
    fn test_details_empty() {
        let printer = Printer::new(OutputFormat::Table, "₹");
        let text = render(|out| printer.details(out, None));
        assert!(text.contains("No car removed yet."));
    }

    #[test]
    fn test_details_json_null() {
        let printer = Printer::new(OutputFormat::Json, "₹");
        let text = render(|out| printer.details(out, None));
        assert_eq!(text.trim(), "null");
    }

    #[test]
    fn test_free_lots_table() {
        let printer = Printer::new(OutputFormat::Table, "$");
        assert_eq!(render(|out| printer.free_lots(out, &[2, 3])), "Free lots: 2, 3\n");
        assert_eq!(render(|out| printer.free_lots(out, &[])), "Free lots: (none)\n");
    }

    #[test]
    fn test_cars_json() {
        let printer = Printer::new(OutputFormat::Json, "$");
        let rec = record();
        let car = CarEntry {
            owner_name: rec.owner_name.clone(),
            plate_number: rec.plate_number.clone(),
            lot: rec.lot,
            entry_time: rec.entry_time,
        };
        let text = render(|out| printer.cars(out, std::slice::from_ref(&car)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["lot"], 1);
    }
}
