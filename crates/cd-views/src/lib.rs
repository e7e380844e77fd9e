//! Views for the 1746 call dashboard
//!
//! One module per page. Each dashboard splits into a pure summary step over
//! the loaded rows and an egui drawing step over the summary.

pub mod calls_by_subtype;
pub mod calls_in_a_day;
pub mod charts;
pub mod homepage;

pub use calls_by_subtype::{summarize_subtype, subtype_counts, CallsBySubtype, EventWindow, Period, SubtypeSummary};
pub use calls_in_a_day::{summarize_day, CallsInADay, DaySummary};

use ahash::AHashMap;

/// Label for calls missing a type, neighborhood or sub-prefecture
pub const NOT_INFORMED: &str = "Não informado";

/// Turn counts into a ranking: highest count first, ties by name
pub fn ranked(counts: AHashMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranking: Vec<(String, usize)> = counts.into_iter().collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranking
}
