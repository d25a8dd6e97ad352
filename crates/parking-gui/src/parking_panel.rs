//! Single-page parking form: settings, add a car, current cars, details

use eframe::egui::{self, Color32, RichText, Ui};
use parking_app::app::ParkingService;
use parking_app::config::Config;
use parking_types::{format_cost, format_hours, format_timestamp, Lot, ParkingError};

/// Form state for the parking page
pub struct ParkingPanel {
    /// Charges per hour as typed
    charges: String,
    /// Number of spaces as typed
    spaces: String,
    car_name: String,
    car_number: String,
    selected_lot: Option<Lot>,
    currency: String,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

/// Blank means zero, like an untouched number field
fn parse_spaces(input: &str) -> Result<u32, ParkingError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    input.parse().map_err(|_| {
        ParkingError::InvalidInput(format!(
            "number of spaces must be a whole number, got {:?}",
            input
        ))
    })
}

impl ParkingPanel {
    pub fn new(config: &Config, service: &ParkingService) -> Self {
        let charges = if service.hourly_rate() > 0.0 {
            service.hourly_rate().to_string()
        } else {
            String::new()
        };
        Self {
            charges,
            spaces: service.total_spaces().to_string(),
            car_name: String::new(),
            car_number: String::new(),
            selected_lot: None,
            currency: config.currency_symbol.clone(),
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, service: &mut ParkingService) {
        ui.vertical_centered(|ui| {
            ui.heading("Parking Management System");
        });
        ui.add_space(16.0);

        self.render_settings(ui, service);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_add_form(ui, service);

        if let Some((ref msg, is_error)) = self.status_message {
            ui.add_space(6.0);
            let color = if is_error {
                Color32::LIGHT_RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_current_cars(ui, service);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_details(ui, service);
    }

    fn render_settings(&mut self, ui: &mut Ui, service: &mut ParkingService) {
        egui::Grid::new("parking_settings")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label("Charges per hour:");
                let charges = ui.add(
                    egui::TextEdit::singleline(&mut self.charges)
                        .hint_text("e.g. 20")
                        .desired_width(120.0),
                );
                if charges.changed() {
                    self.apply_charges(service);
                }
                ui.end_row();

                ui.label("Number of parking spaces:");
                let spaces = ui.add(
                    egui::TextEdit::singleline(&mut self.spaces)
                        .hint_text("e.g. 10")
                        .desired_width(120.0),
                );
                if spaces.changed() {
                    self.apply_spaces(service);
                }
                ui.end_row();
            });
    }

    fn render_add_form(&mut self, ui: &mut Ui, service: &mut ParkingService) {
        ui.label(RichText::new("Add a Car").strong());
        ui.add_space(5.0);

        let free_lots = service.free_lots().to_vec();
        ui.horizontal_wrapped(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.car_name)
                    .hint_text("Car Owner Name")
                    .desired_width(180.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.car_number)
                    .hint_text("Car Number")
                    .desired_width(140.0),
            );

            let selected_text = match self.selected_lot {
                Some(lot) => format!("Lot {}", lot),
                None => "Select Lot".to_string(),
            };
            egui::ComboBox::from_id_salt("lot_select")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.selected_lot, None, "Select Lot");
                    for lot in &free_lots {
                        ui.selectable_value(&mut self.selected_lot, Some(*lot), format!("Lot {}", lot));
                    }
                });

            if ui.button("ADD").clicked() {
                self.add_car(service);
            }
        });
    }

    fn render_current_cars(&mut self, ui: &mut Ui, service: &mut ParkingService) {
        ui.label(RichText::new("Current Cars").strong());
        ui.add_space(5.0);

        if service.active_cars().is_empty() {
            ui.label(RichText::new("No cars parked.").color(Color32::GRAY));
            return;
        }

        let mut to_remove: Option<String> = None;
        for car in service.active_cars() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(format!("Name: {}", car.owner_name));
                        ui.label(format!("Number: {}", car.plate_number));
                        ui.label(format!("Lot: {}", car.lot));
                        ui.label(format!("Entry Time: {}", format_timestamp(&car.entry_time)));
                    });
                    if ui.button("REMOVE CAR").clicked() {
                        to_remove = Some(car.plate_number.clone());
                    }
                });
            });
        }

        if let Some(plate) = to_remove {
            self.remove_car(service, &plate);
        }
    }

    fn render_details(&self, ui: &mut Ui, service: &ParkingService) {
        ui.label(RichText::new("Details").strong());
        ui.add_space(5.0);

        let Some(record) = service.last_billing_record() else {
            ui.label(RichText::new("No car removed yet.").color(Color32::GRAY));
            return;
        };

        egui::Grid::new("billing_details")
            .num_columns(2)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                ui.label("Car Owner Name:");
                ui.label(&record.owner_name);
                ui.end_row();
                ui.label("Car Number:");
                ui.label(&record.plate_number);
                ui.end_row();
                ui.label("Entry Time:");
                ui.label(format_timestamp(&record.entry_time));
                ui.end_row();
                ui.label("Exit Time:");
                ui.label(format_timestamp(&record.exit_time));
                ui.end_row();
                ui.label("Duration Parked:");
                ui.label(format_hours(record.duration_hours));
                ui.end_row();
                ui.label("Total Charges:");
                ui.label(RichText::new(format_cost(record.cost, &self.currency)).strong());
                ui.end_row();
            });
    }

    fn apply_charges(&mut self, service: &mut ParkingService) {
        match service.set_hourly_rate_str(&self.charges) {
            Ok(()) => self.status_message = None,
            Err(e) => self.status_message = Some((e.to_string(), true)),
        }
    }

    fn apply_spaces(&mut self, service: &mut ParkingService) {
        let result = parse_spaces(&self.spaces).and_then(|n| service.set_total_spaces(n));
        match result {
            Ok(()) => {
                self.status_message = None;
                if let Some(lot) = self.selected_lot {
                    if !service.is_lot_free(lot) {
                        self.selected_lot = None;
                    }
                }
            }
            Err(e) => self.status_message = Some((e.to_string(), true)),
        }
    }

    fn add_car(&mut self, service: &mut ParkingService) {
        match service.add_car(&self.car_name, &self.car_number, self.selected_lot) {
            Ok(entry) => {
                self.status_message = Some((
                    format!("Parked {} in lot {}", entry.plate_number, entry.lot),
                    false,
                ));
                // Clear form
                self.car_name.clear();
                self.car_number.clear();
                self.selected_lot = None;
            }
            Err(e) => self.status_message = Some((e.to_string(), true)),
        }
    }

    fn remove_car(&mut self, service: &mut ParkingService, plate: &str) {
        match service.remove_car(plate) {
            Ok(record) => {
                self.status_message = Some((
                    format!(
                        "{} left, charged {}",
                        record.plate_number,
                        format_cost(record.cost, &self.currency)
                    ),
                    false,
                ));
            }
            Err(e) => self.status_message = Some((e.to_string(), true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_and_service(spaces: u32) -> (ParkingPanel, ParkingService) {
        let mut service = ParkingService::new();
        service.set_total_spaces(spaces).unwrap();
        let panel = ParkingPanel::new(&Config::default(), &service);
        (panel, service)
    }

    #[test]
    fn test_parse_spaces() {
        assert_eq!(parse_spaces(""), Ok(0));
        assert_eq!(parse_spaces(" 12 "), Ok(12));
        assert!(parse_spaces("-3").is_err());
        assert!(parse_spaces("lots").is_err());
    }

    #[test]
    fn test_add_clears_form_on_success() {
        let (mut panel, mut service) = panel_and_service(2);
        panel.car_name = "Alice".to_string();
        panel.car_number = "KA01".to_string();
        panel.selected_lot = Some(2);
        panel.add_car(&mut service);

        assert_eq!(service.free_lots(), &[1]);
        assert!(panel.car_name.is_empty());
        assert!(panel.selected_lot.is_none());
        assert_eq!(panel.status_message.as_ref().map(|m| m.1), Some(false));
    }

    #[test]
    fn test_add_keeps_form_on_failure() {
        let (mut panel, mut service) = panel_and_service(2);
        panel.car_name = "Alice".to_string();
        panel.selected_lot = Some(1);
        panel.add_car(&mut service);

        assert!(service.active_cars().is_empty());
        assert_eq!(panel.car_name, "Alice");
        assert_eq!(panel.selected_lot, Some(1));
        assert_eq!(panel.status_message.as_ref().map(|m| m.1), Some(true));
    }

    #[test]
    fn test_spaces_change_drops_stale_selection() {
        let (mut panel, mut service) = panel_and_service(5);
        panel.selected_lot = Some(5);
        panel.spaces = "3".to_string();
        panel.apply_spaces(&mut service);
        assert_eq!(service.free_lots(), &[1, 2, 3]);
        assert!(panel.selected_lot.is_none());
    }

    #[test]
    fn test_remove_reports_charge() {
        let (mut panel, mut service) = panel_and_service(1);
        service.add_car("Bob", "KA02", Some(1)).unwrap();
        panel.remove_car(&mut service, "KA02");
        let (msg, is_error) = panel.status_message.clone().unwrap();
        assert!(!is_error);
        assert!(msg.starts_with("KA02 left, charged ₹"));
        assert!(service.last_billing_record().is_some());
    }

    #[test]
    fn test_bad_charges_are_reported() {
        let (mut panel, mut service) = panel_and_service(1);
        panel.charges = "abc".to_string();
        panel.apply_charges(&mut service);
        assert_eq!(panel.status_message.as_ref().map(|m| m.1), Some(true));
        assert_eq!(service.hourly_rate(), 0.0);
    }
}
