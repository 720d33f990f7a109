use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::{CategoryColors, ACCENT};
use crate::data::model::CellValue;
use crate::session::DashboardSnapshot;
use crate::ui::format;

const CHART_HEIGHT: f32 = 320.0;

fn no_data(ui: &mut Ui, what: &str) {
    ui.colored_label(Color32::YELLOW, format!("No data to show in the {what} chart."));
}

/// Horizontal bars, lowest at the bottom, with the category name drawn at
/// the base of each bar.
fn horizontal_bars(
    ui: &mut Ui,
    id: &str,
    rows: &[(String, f64)],
    x_label: &str,
    symbol: &str,
) {
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (name, mean))| {
            Bar::new(i as f64, *mean)
                .name(format!("{name}: {}", format::money(symbol, *mean)))
                .width(0.7)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label(x_label.to_owned())
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(ACCENT));
            for (i, (name, _)) in rows.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(0.0, i as f64), RichText::new(name).strong())
                        .anchor(Align2::LEFT_CENTER)
                        .color(Color32::WHITE),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

pub fn top_titles_chart(ui: &mut Ui, snapshot: &DashboardSnapshot, top_n: usize, symbol: &str) {
    ui.strong(format!("Top {top_n} Titles by Mean Salary"));
    if snapshot.top_titles.is_empty() {
        no_data(ui, "titles");
        return;
    }
    let rows: Vec<(String, f64)> = snapshot
        .top_titles
        .iter()
        .map(|(title, mean)| (title.to_string(), *mean))
        .collect();
    horizontal_bars(ui, "top_titles", &rows, "Mean annual salary", symbol);
}

pub fn salary_histogram(ui: &mut Ui, snapshot: &DashboardSnapshot, symbol: &str) {
    ui.strong("Annual Salary Distribution");
    if snapshot.is_empty() {
        no_data(ui, "distribution");
        return;
    }
    let bars: Vec<Bar> = snapshot
        .salary_histogram
        .iter()
        .map(|bucket| {
            Bar::new(bucket.midpoint(), bucket.count as f64)
                .width(bucket.width().max(1.0))
                .name(format!(
                    "{} – {}",
                    format::money(symbol, bucket.start),
                    format::money(symbol, bucket.end)
                ))
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label("Salary range")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
}

/// Donut of remote-work categories with a percentage legend.
pub fn remote_share_chart(ui: &mut Ui, snapshot: &DashboardSnapshot, colors: &CategoryColors) {
    ui.strong("Work Arrangement Share");
    let Some(counts) = snapshot.remote_counts.as_ref().filter(|c| !c.is_empty()) else {
        no_data(ui, "work arrangement");
        return;
    };
    let total: usize = counts.values().sum();

    // Largest share first, like a value_counts() table.
    let mut slices: Vec<(&CellValue, usize)> = counts.iter().map(|(k, v)| (k, *v)).collect();
    slices.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ui.horizontal(|ui: &mut Ui| {
        let side = CHART_HEIGHT.min(ui.available_width() * 0.6);
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let outer = side / 2.0 - 4.0;
        let inner = outer * 0.5;

        let mut start = -TAU / 4.0;
        for (value, n) in &slices {
            let sweep = TAU * (*n as f32 / total as f32);
            let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as usize;
            let color = colors.color_for(value);
            for s in 0..steps {
                let a0 = start + sweep * (s as f32 / steps as f32);
                let a1 = start + sweep * ((s + 1) as f32 / steps as f32);
                let at = |r: f32, a: f32| Pos2::new(center.x + r * a.cos(), center.y + r * a.sin());
                painter.add(Shape::convex_polygon(
                    vec![at(outer, a0), at(outer, a1), at(inner, a1), at(inner, a0)],
                    color,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (value, n) in &slices {
                let pct = 100.0 * *n as f64 / total as f64;
                ui.label(
                    RichText::new(format!("■ {value}  {pct:.1}%")).color(colors.color_for(value)),
                );
            }
        });
    });
}

pub fn focus_by_country_chart(
    ui: &mut Ui,
    snapshot: &DashboardSnapshot,
    focus_title: &str,
    symbol: &str,
) {
    ui.strong(format!("Mean {focus_title} Salary by Country"));
    if snapshot.focus_by_country.is_empty() {
        no_data(ui, "country");
        return;
    }
    let mut rows: Vec<(String, f64)> = snapshot
        .focus_by_country
        .iter()
        .map(|(country, mean)| (country.to_string(), *mean))
        .collect();
    rows.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    horizontal_bars(ui, "focus_by_country", &rows, "Mean salary", symbol);
}

/// Two-by-two grid of all charts.
pub fn chart_grid(
    ui: &mut Ui,
    snapshot: &DashboardSnapshot,
    colors: &CategoryColors,
    top_n: usize,
    focus_title: &str,
    symbol: &str,
) {
    ui.columns(2, |cols| {
        top_titles_chart(&mut cols[0], snapshot, top_n, symbol);
        salary_histogram(&mut cols[1], snapshot, symbol);
    });
    ui.add_space(12.0);
    ui.columns(2, |cols| {
        remote_share_chart(&mut cols[0], snapshot, colors);
        focus_by_country_chart(&mut cols[1], snapshot, focus_title, symbol);
    });
}
