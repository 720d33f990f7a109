use eframe::egui::{self, ScrollArea, Ui};

use crate::color::CategoryColors;
use crate::data::filter;
use crate::data::model::columns;
use crate::session::DashboardSession;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub session: DashboardSession,
    currency_symbol: String,
    /// Fixed per category over the full dataset so colours don't shift when
    /// filters change.
    remote_colors: CategoryColors,
}

impl SalaryDashboardApp {
    pub fn new(session: DashboardSession, currency_symbol: String) -> Self {
        let remote_values = filter::available_values(&session.dataset().records, columns::REMOTE);
        Self {
            remote_colors: CategoryColors::new(&remote_values),
            session,
            currency_symbol,
        }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        let symbol = self.currency_symbol.as_str();

        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.session, symbol, &mut events);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("General Metrics (annual salary)");
                    panels::metrics_row(ui, &self.session, symbol);
                    ui.separator();

                    let settings = self.session.settings();
                    charts::chart_grid(
                        ui,
                        self.session.snapshot(),
                        &self.remote_colors,
                        settings.top_n,
                        &settings.focus_title,
                        symbol,
                    );
                    ui.separator();

                    table::detail_table(ui, &self.session);
                });
        });

        for event in events {
            self.session.handle(event);
        }
    }
}
