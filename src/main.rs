mod app;
mod chart;
mod color;
mod config;
mod controller;
mod data;
mod error;
mod report;
mod state;
mod stats;
mod ui;
mod update;

use app::RustyDashApp;
use clap::Parser;
use config::Config;
use data::loader::DatasetDir;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!("Serving datasets from {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Dash – CSV Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyDashApp::new(DatasetDir::new(config.data_dir))))),
    )
}
