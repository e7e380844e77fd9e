//! "Chamados por subtipo": one call subtype over time, against city events

use std::sync::Arc;

use ahash::AHashMap;
use cd_data::{CallRecord, Dataset, EventOccupancyRecord};
use chrono::{Days, NaiveDate};
use egui::{ComboBox, Grid, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use crate::charts::{metric, BAR_COLOR};
use crate::ranked;

/// Subtype selected when the dashboard opens, if the data has it
pub const DEFAULT_SUBTYPE: &str = "Perturbação do sossego";

/// Inclusive range of days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
    
    /// 2022-01-01 through 2023-12-31, the years the dataset covers
    pub fn dataset_years() -> Self {
        Self::new(
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
        )
    }
    
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
    
    /// Number of days, both ends included; zero when the range is inverted
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
    
    /// Overlap with another range
    pub fn intersect(&self, other: &Period) -> Option<Period> {
        let overlap = Period::new(self.start.max(other.start), self.end.min(other.end));
        (overlap.start <= overlap.end).then_some(overlap)
    }
    
    /// Every day in the range, in order
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |day| day.checked_add_days(Days::new(1)))
            .take_while(move |day| *day <= end)
    }
}

/// Calls of the subtype during one event
#[derive(Debug, Clone, PartialEq)]
pub struct EventWindow {
    pub event: String,
    pub period: Period,
    pub calls: usize,
    pub daily_average: f64,
    pub occupancy_rate: Option<f64>,
}

/// Calls of one subtype across a period
#[derive(Debug, Clone, PartialEq)]
pub struct SubtypeSummary {
    pub subtype: String,
    pub period: Period,
    pub total: usize,
    /// One entry per day of the period, zeros included
    pub daily: Vec<(NaiveDate, usize)>,
    pub daily_average: f64,
    /// Events overlapping the period, by start date
    pub events: Vec<EventWindow>,
}

/// Every subtype with its number of calls, most frequent first
pub fn subtype_counts(calls: &[CallRecord]) -> Vec<(String, usize)> {
    let mut counts: AHashMap<String, usize> = AHashMap::new();
    for subtype in calls.iter().filter_map(|c| c.subtype.as_deref()) {
        *counts.entry(subtype.to_string()).or_default() += 1;
    }
    ranked(counts)
}

/// Count the calls of `subtype` per day of `period` and during each event
pub fn summarize_subtype(
    calls: &[CallRecord],
    events: &[EventOccupancyRecord],
    subtype: &str,
    period: Period,
) -> SubtypeSummary {
    let mut per_day: AHashMap<NaiveDate, usize> = AHashMap::new();
    for day in calls
        .iter()
        .filter(|c| c.subtype.as_deref() == Some(subtype))
        .filter_map(CallRecord::opened_on)
        .filter(|day| period.contains(*day))
    {
        *per_day.entry(day).or_default() += 1;
    }
    
    let daily: Vec<(NaiveDate, usize)> = period
        .iter_days()
        .map(|day| (day, per_day.get(&day).copied().unwrap_or(0)))
        .collect();
    let total: usize = per_day.values().sum();
    
    let mut windows: Vec<EventWindow> = events
        .iter()
        .filter_map(|event| {
            let window = period.intersect(&Period::new(event.start, event.end))?;
            let calls: usize = per_day
                .iter()
                .filter(|(day, _)| window.contains(**day))
                .map(|(_, count)| count)
                .sum();
            Some(EventWindow {
                event: event.event.clone(),
                period: window,
                calls,
                daily_average: average(calls, window.days()),
                occupancy_rate: event.occupancy_rate,
            })
        })
        .collect();
    windows.sort_by(|a, b| a.period.start.cmp(&b.period.start).then_with(|| a.event.cmp(&b.event)));
    
    SubtypeSummary {
        subtype: subtype.to_string(),
        period,
        total,
        daily,
        daily_average: average(total, period.days()),
        events: windows,
    }
}

fn average(calls: usize, days: i64) -> f64 {
    if days <= 0 {
        0.0
    } else {
        calls as f64 / days as f64
    }
}

/// Dashboard over the calls and events tables
pub struct CallsBySubtype {
    calls: Arc<Dataset<CallRecord>>,
    events: Arc<Dataset<EventOccupancyRecord>>,
    period: Period,
    subtypes: Vec<(String, usize)>,
    selected: String,
    cached: Option<SubtypeSummary>,
}

impl CallsBySubtype {
    pub fn new(calls: Arc<Dataset<CallRecord>>, events: Arc<Dataset<EventOccupancyRecord>>) -> Self {
        let subtypes = subtype_counts(calls.rows());
        let selected = if subtypes.iter().any(|(name, _)| name == DEFAULT_SUBTYPE) {
            DEFAULT_SUBTYPE.to_string()
        } else {
            subtypes.first().map(|(name, _)| name.clone()).unwrap_or_default()
        };
        
        Self {
            calls,
            events,
            period: Period::dataset_years(),
            subtypes,
            selected,
            cached: None,
        }
    }
    
    /// Subtype currently shown
    pub fn selected(&self) -> &str {
        &self.selected
    }
    
    /// Summary for the selected subtype, recomputed only when the selection changes
    pub fn summary(&mut self) -> &SubtypeSummary {
        if self.cached.as_ref().is_some_and(|s| s.subtype != self.selected) {
            self.cached = None;
        }
        
        let (calls, events, subtype, period) = (&self.calls, &self.events, &self.selected, self.period);
        self.cached.get_or_insert_with(|| {
            tracing::debug!("Summarizing subtype '{}'", subtype);
            summarize_subtype(calls.rows(), events.rows(), subtype, period)
        })
    }
    
    /// Draw the dashboard
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("🔊 Chamados por subtipo");
        ui.add_space(4.0);
        
        ui.horizontal(|ui| {
            ui.label("Subtipo:");
            ComboBox::from_id_source("calls_by_subtype_select")
                .selected_text(self.selected.as_str())
                .width(360.0)
                .show_ui(ui, |ui| {
                    for (name, count) in &self.subtypes {
                        ui.selectable_value(&mut self.selected, name.clone(), format!("{} ({})", name, count));
                    }
                });
        });
        ui.separator();
        
        let summary = self.summary();
        
        ui.horizontal(|ui| {
            metric(ui, "Chamados em 2022 e 2023", summary.total);
            ui.add_space(32.0);
            metric(ui, "Média diária", format!("{:.2}", summary.daily_average));
        });
        ui.add_space(8.0);
        
        let points: Vec<[f64; 2]> = summary
            .daily
            .iter()
            .enumerate()
            .map(|(idx, (_, count))| [idx as f64, *count as f64])
            .collect();
        let start = summary.period.start;
        
        Plot::new("calls_by_subtype_daily")
            .height(260.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(PlotPoints::new(points)).color(BAR_COLOR).name("Chamados por dia"));
                for window in &summary.events {
                    let x = (window.period.start - start).num_days() as f64;
                    plot_ui.vline(VLine::new(x).name(&window.event));
                }
            });
        ui.label(format!(
            "Eixo horizontal: dias desde {}.",
            start.format("%d/%m/%Y")
        ));
        ui.add_space(8.0);
        
        if summary.events.is_empty() {
            ui.label("Nenhum evento no período.");
            return;
        }
        
        ui.strong("Eventos da cidade");
        Grid::new("calls_by_subtype_events").striped(true).num_columns(6).show(ui, |ui| {
            for header in ["Evento", "Início", "Fim", "Chamados", "Média diária", "Ocupação hoteleira"] {
                ui.strong(header);
            }
            ui.end_row();
            
            for window in &summary.events {
                ui.label(&window.event);
                ui.label(window.period.start.format("%d/%m/%Y").to_string());
                ui.label(window.period.end.format("%d/%m/%Y").to_string());
                ui.label(window.calls.to_string());
                ui.label(format!("{:.2}", window.daily_average));
                ui.label(
                    window
                        .occupancy_rate
                        .map(|rate| format!("{:.1}%", rate * 100.0))
                        .unwrap_or_else(|| "-".to_string()),
                );
                ui.end_row();
            }
        });
    }
}
