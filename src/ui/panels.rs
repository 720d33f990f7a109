use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::CARD_FILL;
use crate::session::{DashboardSession, SessionEvent};
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – rate advisory and filter widgets
// ---------------------------------------------------------------------------

/// Render the filter sidebar. Interactions are pushed to `events` and applied
/// by the caller once the frame is drawn.
pub fn side_panel(
    ui: &mut Ui,
    session: &DashboardSession,
    symbol: &str,
    events: &mut Vec<SessionEvent>,
) {
    ui.heading("🔍 Filters");
    ui.separator();

    let rate = session.rate();
    ui.label(format!("Exchange rate: {symbol} {rate}"));
    if let Some(advisory) = rate.advisory() {
        ui.label(RichText::new(advisory).color(Color32::YELLOW).small());
    }
    ui.separator();

    if ui
        .add_enabled(
            !session.selection().is_unrestricted(),
            egui::Button::new("Clear all filters"),
        )
        .clicked()
    {
        events.push(SessionEvent::SelectionCleared);
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (filter, options) in session.filter_options() {
                let accepted = session.selection().accepted(filter.column);
                let n_selected = accepted.map_or(0, |s| s.len());
                let header_text = if n_selected == 0 {
                    format!("{}  (all)", filter.label)
                } else {
                    format!("{}  ({n_selected}/{})", filter.label, options.len())
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(filter.column)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if options.is_empty() {
                            ui.weak("No values available");
                            return;
                        }
                        if ui.small_button("Clear").clicked() {
                            events.push(SessionEvent::SelectionChanged {
                                column: filter.column.to_string(),
                                values: Default::default(),
                            });
                        }
                        for value in options {
                            let mut checked = accepted.is_some_and(|s| s.contains(value));
                            if ui.checkbox(&mut checked, value.to_string()).changed() {
                                events.push(SessionEvent::ValueToggled {
                                    column: filter.column.to_string(),
                                    value: value.clone(),
                                });
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style())
        .fill(CARD_FILL)
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(label);
                ui.heading(value);
            });
        });
}

/// The four headline numbers for the current selection.
pub fn metrics_row(ui: &mut Ui, session: &DashboardSession, symbol: &str) {
    let metrics = &session.snapshot().metrics;
    ui.columns(4, |cols| {
        metric_card(
            &mut cols[0],
            "Mean Salary",
            &format::money(symbol, metrics.mean_salary),
        );
        metric_card(
            &mut cols[1],
            "Max Salary",
            &format::money(symbol, metrics.max_salary),
        );
        metric_card(
            &mut cols[2],
            "Total Records",
            &format::thousands(metrics.record_count as u64),
        );
        metric_card(&mut cols[3], "Most Frequent Title", &metrics.top_title);
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, session: &DashboardSession) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("🎲 Data Salaries Dashboard");
        ui.separator();
        ui.label(format!(
            "{} records loaded, {} visible",
            session.dataset().len(),
            session.visible_count()
        ));
    });
}
