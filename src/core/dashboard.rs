use crate::core::aggregate::{self, GroupCounts, TrendChart, NOT_AVAILABLE, TOP_SPECIES_LIMIT};
use crate::core::filter;
use crate::core::geo::{self, MapViewport};
use crate::domain::model::{
    AggregationResult, Dimension, FilterEvent, FilterSelection, StrandingRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_strandings: usize,
    /// Percent change of `reference_year` over the year before, within the filtered subset.
    pub yearly_trend: f64,
    /// Latest numeric year in the full dataset.
    pub reference_year: Option<i64>,
    pub species_diversity: usize,
    pub most_common_species: String,
    pub location_count: usize,
    pub tagged_location_count: usize,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub selection: FilterSelection,
    pub summary: SummaryStats,
    pub species_filter_options: Vec<String>,
    pub year_filter_options: Vec<String>,
    pub top_species: AggregationResult,
    pub countries: AggregationResult,
    pub sexes: AggregationResult,
    pub life_stages: AggregationResult,
    pub years: AggregationResult,
    pub species_trend: TrendChart,
    pub map: MapViewport,
}

/// An immutable view of the loaded dataset plus the current filter selection.
///
/// Transitions produce a new snapshot sharing the same records.
#[derive(Debug, Clone)]
pub struct DashboardState {
    records: Arc<[StrandingRecord]>,
    selection: FilterSelection,
    reference_year: Option<i64>,
}

impl DashboardState {
    pub fn new(records: Vec<StrandingRecord>) -> Self {
        let reference_year = aggregate::max_numeric_year(&records);
        if reference_year.is_none() && !records.is_empty() {
            tracing::warn!("No numeric year found in dataset; yearly trend will be 0");
        }
        Self {
            records: records.into(),
            selection: FilterSelection::default(),
            reference_year,
        }
    }

    pub fn with_selection(&self, selection: FilterSelection) -> Self {
        Self {
            records: Arc::clone(&self.records),
            selection,
            reference_year: self.reference_year,
        }
    }

    pub fn with_event(&self, event: &FilterEvent) -> Self {
        let next = self.selection.apply(event);
        tracing::debug!(?event, species = next.species.len(), year = %next.year, "Filter changed");
        self.with_selection(next)
    }

    pub fn records(&self) -> &[StrandingRecord] {
        &self.records
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn reference_year(&self) -> Option<i64> {
        self.reference_year
    }

    pub fn filtered(&self) -> Vec<&StrandingRecord> {
        filter::apply(&self.records, &self.selection)
    }

    /// Recompute every chart for the current selection.
    pub fn report(&self, top_n: usize) -> DashboardReport {
        let filtered = self.filtered();
        let rows = || filtered.iter().copied();

        let species = GroupCounts::build(rows(), Dimension::Species);
        let years = GroupCounts::build(rows(), Dimension::Year);
        let locations = GroupCounts::build(rows(), Dimension::Location);

        let summary = SummaryStats {
            total_strandings: filtered.len(),
            yearly_trend: aggregate::yearly_trend_from_counts(&years, self.reference_year),
            reference_year: self.reference_year,
            species_diversity: species.distinct(),
            most_common_species: species.most_common().unwrap_or(NOT_AVAILABLE).to_string(),
            location_count: locations.distinct(),
            tagged_location_count: geo::tagged_location_count(rows()),
        };

        tracing::debug!(
            total = summary.total_strandings,
            of = self.records.len(),
            "Built dashboard report"
        );

        DashboardReport {
            generated_at: Utc::now(),
            selection: self.selection.clone(),
            summary,
            species_filter_options: filter::available_species(&self.records),
            year_filter_options: filter::available_years(&self.records),
            top_species: species.top(top_n),
            countries: aggregate::group_and_count(rows(), Dimension::Country),
            sexes: aggregate::group_and_count(rows(), Dimension::Sex),
            life_stages: aggregate::group_and_count(rows(), Dimension::LifeStage),
            years: years.sorted_by_label(),
            species_trend: aggregate::species_trend(&filtered, &self.selection.species),
            map: geo::viewport(rows()),
        }
    }

    pub fn default_report(&self) -> DashboardReport {
        self.report(TOP_SPECIES_LIMIT)
    }
}
