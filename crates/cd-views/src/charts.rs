//! Chart helpers shared by the dashboards

use egui::{Color32, Grid, Ui};
use egui_plot::{Bar, BarChart, Plot};

/// Bar color used by every ranking chart
pub const BAR_COLOR: Color32 = Color32::from_rgb(100, 150, 250);

/// Height of ranking charts
const CHART_HEIGHT: f32 = 220.0;

/// Horizontal bar chart of the first `limit` entries of a ranking.
///
/// The largest entry is drawn on top; hovering a bar shows its name.
pub fn ranking_chart(ui: &mut Ui, id: &str, ranking: &[(String, usize)], limit: usize) {
    let shown = &ranking[..ranking.len().min(limit)];
    
    let bars: Vec<Bar> = shown
        .iter()
        .enumerate()
        .map(|(idx, (name, count))| {
            // Highest rank gets the highest y so it reads top-down
            let y = (shown.len() - idx) as f64;
            Bar::new(y, *count as f64).name(name).width(0.7)
        })
        .collect();
    
    let chart = BarChart::new(bars).horizontal().color(BAR_COLOR);
    
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_y(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Two-column table with the first `limit` entries of a ranking
pub fn ranking_table(ui: &mut Ui, id: &str, header: &str, ranking: &[(String, usize)], limit: usize) {
    Grid::new(id).striped(true).num_columns(2).show(ui, |ui| {
        ui.strong(header);
        ui.strong("Chamados");
        ui.end_row();
        
        for (name, count) in ranking.iter().take(limit) {
            ui.label(name);
            ui.label(count.to_string());
            ui.end_row();
        }
    });
}

/// Large number with a caption underneath
pub fn metric(ui: &mut Ui, caption: &str, value: impl ToString) {
    ui.vertical(|ui| {
        ui.label(caption);
        ui.label(egui::RichText::new(value.to_string()).size(26.0).strong());
    });
}
