use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::session::DashboardSession;

const ROW_HEIGHT: f32 = 18.0;

/// Filtered records with their source columns only (amounts in the source
/// currency).
pub fn detail_table(ui: &mut Ui, session: &DashboardSession) {
    ui.strong("Detailed Data (source currency)");
    let columns = session.table_columns();
    let records = session.filtered_records();
    if records.is_empty() {
        ui.weak("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), columns.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(420.0)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let record = records[row.index()];
                for name in columns {
                    let value = record.value(name);
                    row.col(|ui| {
                        if value.is_null() {
                            ui.weak("—");
                        } else {
                            ui.label(value.to_string());
                        }
                    });
                }
            });
        });
}
