#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod io;
mod model;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting Activity Log {}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 480.0])
            .with_min_inner_size([640.0, 320.0])
            .with_title("Activity Log"),
        ..Default::default()
    };

    eframe::run_native(
        "Activity Log",
        options,
        Box::new(|cc| Ok(Box::new(app::ActivityLogApp::new(cc)))),
    )
}
