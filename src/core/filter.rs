use crate::domain::model::{FilterSelection, StrandingRecord};
use std::collections::{BTreeSet, HashSet};

/// Records matching the selection, in input order.
///
/// A record passes when the species set is empty or contains its species, and
/// the year selection is `All` or equals its year string exactly.
pub fn apply<'a>(
    records: &'a [StrandingRecord],
    selection: &FilterSelection,
) -> Vec<&'a StrandingRecord> {
    let species: HashSet<&str> = selection.species.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|r| species.is_empty() || species.contains(r.species.as_str()))
        .filter(|r| selection.year.matches(&r.year))
        .collect()
}

/// Distinct species in first-occurrence order, for the species filter options.
pub fn available_species(records: &[StrandingRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.species.as_str()))
        .map(|r| r.species.clone())
        .collect()
}

/// Distinct year strings, sorted as strings.
pub fn available_years(records: &[StrandingRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.year.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
