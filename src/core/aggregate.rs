use crate::domain::model::{AggregationResult, CategoryCount, Dimension, StrandingRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

pub const TOP_SPECIES_LIMIT: usize = 10;
pub const NOT_AVAILABLE: &str = "N/A";
pub const ALL_SPECIES_SERIES: &str = "All Species";

/// Counts per distinct value of one dimension, built in a single pass.
///
/// Entries keep first-occurrence order so that a stable sort on count breaks
/// ties by the order values were first seen.
#[derive(Debug, Clone)]
pub struct GroupCounts {
    entries: Vec<CategoryCount>,
    index: HashMap<String, usize>,
}

impl GroupCounts {
    pub fn build<'a, I>(records: I, dimension: Dimension) -> Self
    where
        I: IntoIterator<Item = &'a StrandingRecord>,
    {
        let mut entries: Vec<CategoryCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            let key = dimension.value(record);
            match index.get(key) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    index.insert(key.to_string(), entries.len());
                    entries.push(CategoryCount {
                        label: key.to_string(),
                        count: 1,
                    });
                }
            }
        }

        Self { entries, index }
    }

    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&slot| self.entries[slot].count)
            .unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Counts in first-occurrence order.
    pub fn to_result(&self) -> AggregationResult {
        AggregationResult::new(self.entries.clone())
    }

    /// Descending by count, ties in first-occurrence order, truncated to `n`.
    pub fn top(&self, n: usize) -> AggregationResult {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        AggregationResult::new(ranked)
    }

    /// Label of the first entry with the highest count. An empty winning
    /// label counts as no answer.
    pub fn most_common(&self) -> Option<&str> {
        // max_by_key keeps the last maximum, so scan for the first one instead.
        let mut best: Option<&CategoryCount> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best.map(|e| e.label.as_str()).filter(|label| !label.is_empty())
    }

    /// Labels sorted as strings, used for the year axis.
    pub fn sorted_by_label(&self) -> AggregationResult {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.label.cmp(&b.label));
        AggregationResult::new(sorted)
    }
}

pub fn group_and_count<'a, I>(records: I, dimension: Dimension) -> AggregationResult
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    GroupCounts::build(records, dimension).to_result()
}

pub fn top_n<'a, I>(records: I, dimension: Dimension, n: usize) -> AggregationResult
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    GroupCounts::build(records, dimension).top(n)
}

pub fn top_species<'a, I>(records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    top_n(records, Dimension::Species, TOP_SPECIES_LIMIT)
}

/// The species with the most strandings, or `"N/A"` for an empty subset or a
/// blank top species.
pub fn most_common_species<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    GroupCounts::build(records, Dimension::Species)
        .most_common()
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn distinct_count<'a, I>(records: I, dimension: Dimension) -> usize
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    GroupCounts::build(records, dimension).distinct()
}

/// Year counts with labels sorted lexicographically.
pub fn year_distribution<'a, I>(records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    GroupCounts::build(records, Dimension::Year).sorted_by_label()
}

/// Largest year that parses as an integer; non-numeric years are skipped.
pub fn max_numeric_year<'a, I>(records: I) -> Option<i64>
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.year.trim().parse::<i64>().ok())
        .max()
}

/// Percentage change between `reference_year` and the year before it.
///
/// Both counts are exact string matches against the subset. A prior-year
/// count of zero yields 0, as does a missing reference year.
pub fn yearly_trend_from_counts(years: &GroupCounts, reference_year: Option<i64>) -> f64 {
    let Some(current) = reference_year else {
        return 0.0;
    };
    let Some(previous) = current.checked_sub(1) else {
        return 0.0;
    };
    let this_year = years.count(&current.to_string());
    let last_year = years.count(&previous.to_string());
    if last_year == 0 {
        return 0.0;
    }
    (this_year as f64 - last_year as f64) / last_year as f64 * 100.0
}

pub fn yearly_trend<'a, I>(filtered: I, reference_year: Option<i64>) -> f64
where
    I: IntoIterator<Item = &'a StrandingRecord>,
{
    let years = GroupCounts::build(filtered, Dimension::Year);
    yearly_trend_from_counts(&years, reference_year)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub label: String,
    /// One count per entry of the owning chart's `years`.
    pub counts: Vec<usize>,
}

/// Line-chart data: strandings per year, overall or per selected species.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendChart {
    pub years: Vec<String>,
    pub series: Vec<TrendSeries>,
}

pub fn species_trend(filtered: &[&StrandingRecord], selected_species: &[String]) -> TrendChart {
    let years: Vec<String> = filtered
        .iter()
        .map(|r| r.year.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut per_pair: HashMap<(&str, &str), usize> = HashMap::new();
    let mut per_year: HashMap<&str, usize> = HashMap::new();
    for r in filtered {
        *per_pair.entry((r.species.as_str(), r.year.as_str())).or_insert(0) += 1;
        *per_year.entry(r.year.as_str()).or_insert(0) += 1;
    }

    let series = if selected_species.is_empty() {
        vec![TrendSeries {
            label: ALL_SPECIES_SERIES.to_string(),
            counts: years
                .iter()
                .map(|y| per_year.get(y.as_str()).copied().unwrap_or(0))
                .collect(),
        }]
    } else {
        let mut seen = HashSet::new();
        selected_species
            .iter()
            .filter(|species| seen.insert(species.as_str()))
            .map(|species| TrendSeries {
                label: species.clone(),
                counts: years
                    .iter()
                    .map(|y| {
                        per_pair
                            .get(&(species.as_str(), y.as_str()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect(),
            })
            .collect()
    };

    TrendChart { years, series }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(species: &str, year: &str) -> StrandingRecord {
        StrandingRecord {
            species: species.to_string(),
            year: year.to_string(),
            ..Default::default()
        }
    }

    fn with_year_counts(counts: &[(&str, usize)]) -> Vec<StrandingRecord> {
        counts
            .iter()
            .flat_map(|(year, n)| std::iter::repeat_with(move || rec("Kogia sima", year)).take(*n))
            .collect()
    }

    #[test]
    fn test_group_and_count_sums_to_subset_size() {
        let records = vec![rec("A", "2020"), rec("B", "2020"), rec("A", ""), rec("", "2021")];
        let result = group_and_count(&records, Dimension::Species);
        assert_eq!(result.total(), records.len());
        assert_eq!(result.labels(), vec!["A", "B", ""]);
        assert_eq!(result.get(""), Some(1));
    }

    #[test]
    fn test_grouping_is_exact() {
        let records = vec![rec("Kogia sima", "1"), rec("kogia sima", "1"), rec("Kogia sima ", "1")];
        assert_eq!(distinct_count(&records, Dimension::Species), 3);
    }

    #[test]
    fn test_top_n_ties_keep_first_occurrence() {
        let records = vec![
            rec("C", "1"),
            rec("B", "1"),
            rec("A", "1"),
            rec("A", "1"),
            rec("B", "1"),
        ];
        let top = top_n(&records, Dimension::Species, 10);
        assert_eq!(top.labels(), vec!["B", "A", "C"]);
        assert_eq!(top.counts(), vec![2, 2, 1]);
    }

    #[test]
    fn test_top_species_truncates_to_ten() {
        let records: Vec<StrandingRecord> =
            (0..15).map(|i| rec(&format!("sp{i}"), "2020")).collect();
        let top = top_species(&records);
        assert_eq!(top.len(), 10);
        assert_eq!(top.labels()[0], "sp0");
    }

    #[test]
    fn test_most_common_species() {
        let records = vec![rec("A", "1"), rec("B", "1"), rec("B", "1"), rec("A", "1")];
        assert_eq!(most_common_species(&records), "A");
        assert_eq!(most_common_species(&Vec::<StrandingRecord>::new()), NOT_AVAILABLE);
    }

    #[test]
    fn test_max_numeric_year_skips_malformed() {
        let records = vec![rec("A", "2019"), rec("A", "unknown"), rec("A", "2021"), rec("A", "")];
        assert_eq!(max_numeric_year(&records), Some(2021));
        assert_eq!(max_numeric_year(&[rec("A", "n.d.")]), None);
    }

    #[test]
    fn test_yearly_trend_percentage() {
        let records = with_year_counts(&[("2020", 10), ("2021", 15)]);
        assert_eq!(yearly_trend(&records, Some(2021)), 50.0);
    }

    #[test]
    fn test_yearly_trend_zero_baseline() {
        let records = with_year_counts(&[("2021", 5)]);
        assert_eq!(yearly_trend(&records, Some(2021)), 0.0);
        assert_eq!(yearly_trend(&records, None), 0.0);
    }

    #[test]
    fn test_yearly_trend_decline() {
        let records = with_year_counts(&[("2022", 8), ("2023", 2)]);
        assert_eq!(yearly_trend(&records, Some(2023)), -75.0);
    }

    #[test]
    fn test_yearly_trend_at_smallest_year_is_zero() {
        let records = vec![rec("A", "-9223372036854775808")];
        let reference = max_numeric_year(&records);
        assert_eq!(reference, Some(i64::MIN));
        assert_eq!(yearly_trend(&records, reference), 0.0);
    }

    #[test]
    fn test_blank_top_species_is_not_available() {
        let records = vec![rec("", "2020"), rec("", "2020"), rec("B", "2020")];
        assert_eq!(most_common_species(&records), NOT_AVAILABLE);
        let records = vec![rec("", "2020"), rec("B", "2020"), rec("B", "2020")];
        assert_eq!(most_common_species(&records), "B");
    }

    #[test]
    fn test_year_distribution_sorted_as_strings() {
        let records = vec![rec("A", "2021"), rec("A", "1999"), rec("A", "2021"), rec("A", "n.d.")];
        let years = year_distribution(&records);
        assert_eq!(years.labels(), vec!["1999", "2021", "n.d."]);
        assert_eq!(years.counts(), vec![1, 2, 1]);
    }

    #[test]
    fn test_species_trend_all_species() {
        let records = vec![rec("A", "2021"), rec("B", "2020"), rec("A", "2020")];
        let refs: Vec<&StrandingRecord> = records.iter().collect();
        let chart = species_trend(&refs, &[]);
        assert_eq!(chart.years, vec!["2020", "2021"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, ALL_SPECIES_SERIES);
        assert_eq!(chart.series[0].counts, vec![2, 1]);
    }

    #[test]
    fn test_species_trend_per_selected_species() {
        let records = vec![rec("A", "2021"), rec("B", "2020"), rec("A", "2020"), rec("A", "2021")];
        let refs: Vec<&StrandingRecord> = records.iter().collect();
        let chart = species_trend(&refs, &["B".to_string(), "A".to_string(), "Z".to_string()]);
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "Z"]);
        assert_eq!(chart.series[0].counts, vec![1, 0]);
        assert_eq!(chart.series[1].counts, vec![1, 2]);
        assert_eq!(chart.series[2].counts, vec![0, 0]);
    }

    #[test]
    fn test_species_trend_ignores_repeated_selection() {
        let records = vec![rec("A", "2021"), rec("A", "2020")];
        let refs: Vec<&StrandingRecord> = records.iter().collect();
        let selected = vec!["A".to_string(), "A".to_string()];
        let chart = species_trend(&refs, &selected);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].counts, vec![1, 1]);
    }

    #[test]
    fn test_empty_subset_is_total() {
        let empty: Vec<&StrandingRecord> = Vec::new();
        assert!(group_and_count(empty.iter().copied(), Dimension::Country).is_empty());
        assert_eq!(distinct_count(empty.iter().copied(), Dimension::Location), 0);
        let chart = species_trend(&empty, &[]);
        assert!(chart.years.is_empty());
        assert_eq!(chart.series[0].counts, Vec::<usize>::new());
    }
}
