use std::path::PathBuf;

use anyhow::{anyhow, Result};
use eframe::egui;

use salary_dashboard::app::SalaryDashboardApp;
use salary_dashboard::config::DashboardConfig;
use salary_dashboard::session::DashboardSession;

fn main() -> Result<()> {
    env_logger::init();

    // Only startup argument: an optional TOML config file.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DashboardConfig::load(&path)?,
        None => DashboardConfig::default(),
    };

    let session = DashboardSession::start(&config).inspect_err(|e| {
        log::error!("Cannot start dashboard: {e:#}");
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let symbol = config.currency_symbol.clone();
    eframe::run_native(
        "Data Salaries Dashboard",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(SalaryDashboardApp::new(session, symbol)))
        }),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
