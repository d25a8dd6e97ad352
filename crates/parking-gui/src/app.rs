//! Main application window

use eframe::egui;
use log::warn;
use parking_app::app::ParkingService;
use parking_app::config::Config;
use parking_domain::SystemClock;

use crate::parking_panel::ParkingPanel;

/// Main application state
pub struct ParkingApp {
    panel: ParkingPanel,
    service: ParkingService,
}

impl ParkingApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            warn!("using default configuration: {}", e);
            Config::default()
        });
        let service = ParkingService::from_config(&config, Box::new(SystemClock))
            .unwrap_or_else(|e| {
                warn!("ignoring configured session values: {}", e);
                ParkingService::new()
            });

        Self {
            panel: ParkingPanel::new(&config, &service),
            service,
        }
    }
}

impl eframe::App for ParkingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.panel.ui(ui, &mut self.service);
                });
        });
    }
}
