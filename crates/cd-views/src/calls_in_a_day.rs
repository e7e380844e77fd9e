//! "Chamados em um dia": every call opened on one date

use std::sync::Arc;

use ahash::AHashMap;
use cd_data::{CallRecord, Dataset, Neighborhood};
use chrono::NaiveDate;
use egui::Ui;
use egui_extras::DatePickerButton;

use crate::charts::{metric, ranking_chart, ranking_table};
use crate::{ranked, NOT_INFORMED};

/// Entries shown per ranking
const TOP_N: usize = 10;

/// Counts for the calls opened on one date
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub by_type: Vec<(String, usize)>,
    pub by_neighborhood: Vec<(String, usize)>,
    pub by_subprefecture: Vec<(String, usize)>,
}

/// Count the calls opened on `date` by type, neighborhood and sub-prefecture
pub fn summarize_day(calls: &[CallRecord], neighborhoods: &[Neighborhood], date: NaiveDate) -> DaySummary {
    let lookup: AHashMap<&str, &Neighborhood> = neighborhoods
        .iter()
        .map(|n| (n.id.as_str(), n))
        .collect();
    
    let mut total = 0;
    let mut by_type: AHashMap<String, usize> = AHashMap::new();
    let mut by_neighborhood: AHashMap<String, usize> = AHashMap::new();
    let mut by_subprefecture: AHashMap<String, usize> = AHashMap::new();
    
    for call in calls.iter().filter(|c| c.opened_on() == Some(date)) {
        total += 1;
        
        let kind = call.kind.as_deref().unwrap_or(NOT_INFORMED);
        *by_type.entry(kind.to_string()).or_default() += 1;
        
        let neighborhood = call
            .neighborhood_id
            .as_deref()
            .and_then(|id| lookup.get(id).copied());
        let name = neighborhood.map_or(NOT_INFORMED, |n| n.name.as_str());
        let subprefecture = neighborhood
            .and_then(|n| n.subprefecture.as_deref())
            .unwrap_or(NOT_INFORMED);
        *by_neighborhood.entry(name.to_string()).or_default() += 1;
        *by_subprefecture.entry(subprefecture.to_string()).or_default() += 1;
    }
    
    DaySummary {
        date,
        total,
        by_type: ranked(by_type),
        by_neighborhood: ranked(by_neighborhood),
        by_subprefecture: ranked(by_subprefecture),
    }
}

/// Dashboard over the calls and neighborhood tables
pub struct CallsInADay {
    calls: Arc<Dataset<CallRecord>>,
    neighborhoods: Arc<Dataset<Neighborhood>>,
    date: NaiveDate,
    cached: Option<DaySummary>,
}

impl CallsInADay {
    /// Date shown when the dashboard opens
    pub fn default_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap_or_default()
    }
    
    pub fn new(calls: Arc<Dataset<CallRecord>>, neighborhoods: Arc<Dataset<Neighborhood>>) -> Self {
        Self {
            calls,
            neighborhoods,
            date: Self::default_date(),
            cached: None,
        }
    }
    
    /// Summary for the selected date, recomputed only when the date changes
    pub fn summary(&mut self) -> &DaySummary {
        if self.cached.as_ref().is_some_and(|s| s.date != self.date) {
            self.cached = None;
        }
        
        let (calls, neighborhoods, date) = (&self.calls, &self.neighborhoods, self.date);
        self.cached.get_or_insert_with(|| {
            tracing::debug!("Summarizing calls for {}", date);
            summarize_day(calls.rows(), neighborhoods.rows(), date)
        })
    }
    
    /// Draw the dashboard
    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading("🗓️ Chamados em um dia");
        ui.add_space(4.0);
        
        ui.horizontal(|ui| {
            ui.label("Data:");
            ui.add(DatePickerButton::new(&mut self.date).id_source("calls_in_a_day_date"));
        });
        ui.separator();
        
        let summary = self.summary();
        
        if summary.total == 0 {
            ui.label(format!("Nenhum chamado aberto em {}.", summary.date.format("%d/%m/%Y")));
            return;
        }
        
        ui.horizontal(|ui| {
            metric(ui, "Chamados abertos", summary.total);
            ui.add_space(32.0);
            metric(ui, "Tipos distintos", summary.by_type.len());
            ui.add_space(32.0);
            if let Some((name, _)) = summary.by_neighborhood.first() {
                metric(ui, "Bairro com mais chamados", name);
            }
        });
        ui.add_space(8.0);
        
        egui::ScrollArea::vertical().id_source("calls_in_a_day_scroll").show(ui, |ui| {
            ui.columns(2, |columns| {
                columns[0].strong("Tipos mais frequentes");
                ranking_chart(&mut columns[0], "calls_in_a_day_types", &summary.by_type, TOP_N);
                ranking_table(&mut columns[0], "calls_in_a_day_types_table", "Tipo", &summary.by_type, TOP_N);
                
                columns[1].strong("Chamados por subprefeitura");
                ranking_chart(&mut columns[1], "calls_in_a_day_subprefectures", &summary.by_subprefecture, TOP_N);
                ranking_table(
                    &mut columns[1],
                    "calls_in_a_day_subprefectures_table",
                    "Subprefeitura",
                    &summary.by_subprefecture,
                    TOP_N,
                );
            });
            
            ui.add_space(8.0);
            ui.strong("Bairros com mais chamados");
            ranking_chart(ui, "calls_in_a_day_neighborhoods", &summary.by_neighborhood, TOP_N);
        });
    }
}
