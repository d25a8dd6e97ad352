//! GUI entry point for Parking Lot

mod app;
mod parking_panel;

use app::ParkingApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Parking Management System",
        options,
        Box::new(|cc| Ok(Box::new(ParkingApp::new(cc)))),
    )
}
