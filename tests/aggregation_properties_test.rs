use strandings_dashboard::core::aggregate::{self, TOP_SPECIES_LIMIT};
use strandings_dashboard::core::{filter, geo, loader};
use strandings_dashboard::{
    DashboardState, Dimension, FilterEvent, FilterSelection, StrandingRecord, YearSelection,
};

const SAMPLE_CSV: &str = include_str!("../data/sample_strandings.csv");

fn sample() -> Vec<StrandingRecord> {
    loader::parse_records(SAMPLE_CSV).unwrap()
}

fn selections() -> Vec<FilterSelection> {
    vec![
        FilterSelection::default(),
        FilterSelection::new(["Kogia sima"], YearSelection::All),
        FilterSelection::new(["Dugong dugon", "Orcinus orca"], YearSelection::parse("2022")),
        FilterSelection::new(Vec::<String>::new(), YearSelection::parse("unknown")),
        FilterSelection::new(["Balaenoptera musculus"], YearSelection::All),
    ]
}

#[test]
fn test_group_counts_sum_to_subset_size() {
    let records = sample();
    for selection in selections() {
        let subset = filter::apply(&records, &selection);
        for dimension in [
            Dimension::Species,
            Dimension::Country,
            Dimension::Sex,
            Dimension::LifeStage,
            Dimension::Year,
            Dimension::Location,
        ] {
            let result = aggregate::group_and_count(subset.iter().copied(), dimension);
            assert_eq!(result.total(), subset.len(), "{:?} under {:?}", dimension, selection);
        }
    }
}

#[test]
fn test_top_species_shape() {
    let records = sample();
    for selection in selections() {
        let subset = filter::apply(&records, &selection);
        let distinct = aggregate::distinct_count(subset.iter().copied(), Dimension::Species);
        let top = aggregate::top_species(subset.iter().copied());
        assert_eq!(top.len(), distinct.min(TOP_SPECIES_LIMIT));
        assert!(top.counts().windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_top_species_tie_break_on_sample() {
    let records = sample();
    let top = aggregate::top_species(&records);
    assert_eq!(
        top.labels(),
        vec![
            "Kogia sima",
            "Dugong dugon",
            "Physeter macrocephalus",
            "Tursiops truncatus",
            "Globicephala macrorhynchus",
            "Megaptera novaeangliae",
            "Orcinus orca",
            "Stenella longirostris",
        ]
    );
    assert_eq!(top.counts(), vec![7, 3, 2, 2, 1, 1, 1, 1]);
}

#[test]
fn test_distinct_counts_match_unique_values() {
    let records = sample();
    let subset = filter::apply(&records, &FilterSelection::default());
    let unique_locations: std::collections::HashSet<&str> =
        records.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(
        aggregate::distinct_count(subset.iter().copied(), Dimension::Location),
        unique_locations.len()
    );
    assert_eq!(aggregate::distinct_count(&records, Dimension::Species), 8);
}

#[test]
fn test_clearing_filters_restores_unfiltered_statistics() {
    let base = DashboardState::new(sample());
    let round_trip = base
        .with_event(&FilterEvent::ToggleSpecies("Kogia sima".into()))
        .with_event(&FilterEvent::SelectYear(YearSelection::parse("2021")))
        .with_event(&FilterEvent::ShowAllSpecies)
        .with_event(&FilterEvent::SelectYear(YearSelection::All));

    let before = base.default_report();
    let after = round_trip.default_report();
    assert_eq!(before.summary, after.summary);
    assert_eq!(before.top_species, after.top_species);
    assert_eq!(before.map, after.map);
}

#[test]
fn test_reference_year_ignores_malformed_years() {
    let records = sample();
    assert!(records.iter().any(|r| r.year == "unknown"));
    assert_eq!(aggregate::max_numeric_year(&records), Some(2022));
    assert_eq!(aggregate::yearly_trend(&records, Some(2022)), 25.0);
}

#[test]
fn test_malformed_rows_still_count_in_tallies() {
    let records = sample();
    let unmappable: Vec<&StrandingRecord> =
        records.iter().filter(|r| !geo::is_mappable(r)).collect();
    assert_eq!(unmappable.len(), 2);

    let countries = aggregate::group_and_count(&records, Dimension::Country);
    assert_eq!(countries.get("Fiji"), Some(7));
    assert_eq!(geo::mappable_records(&records).len(), 16);
}

#[test]
fn test_sample_bounds_cover_every_marker() {
    let records = sample();
    let view = geo::viewport(&records);
    for marker in &view.markers {
        assert!(view.bounds.contains(marker.position));
    }
    assert_eq!(view.bounds.south, -22.27);
    assert_eq!(view.bounds.north, -8.52);
    assert_eq!(view.bounds.west, -175.2);
    assert_eq!(view.bounds.east, 179.37);
}

#[test]
fn test_filter_is_idempotent_on_sample() {
    let records = sample();
    for selection in selections() {
        let once = filter::apply(&records, &selection);
        let twice = filter::apply(&records, &selection);
        assert_eq!(once, twice);
    }
}
