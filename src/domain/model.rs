use serde::{Deserialize, Serialize};
use std::fmt;

/// One reported stranding event, as loaded from the source CSV.
///
/// Records are never mutated after loading; filtering and aggregation borrow
/// them and produce derived views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrandingRecord {
    /// Calendar year as written in the source; may be non-numeric.
    pub year: String,
    pub species: String,
    pub location: String,
    pub country: String,
    pub status: String,
    pub sex: String,
    pub life_stage: String,
    /// Raw coordinate text, never validated.
    pub latitude: String,
    pub longitude: String,
    /// Present only when the source cell parsed as a finite number.
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
}

pub const ALL_YEARS: &str = "all";

/// The year half of a filter selection. Serialized as the raw year string or `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum YearSelection {
    #[default]
    All,
    Year(String),
}

impl YearSelection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_YEARS {
            YearSelection::All
        } else {
            YearSelection::Year(value.to_string())
        }
    }

    /// Exact string match; `"2021"` does not match `"2021.0"` or `" 2021"`.
    pub fn matches(&self, year: &str) -> bool {
        match self {
            YearSelection::All => true,
            YearSelection::Year(selected) => selected == year,
        }
    }
}

impl From<String> for YearSelection {
    fn from(value: String) -> Self {
        YearSelection::parse(&value)
    }
}

impl From<YearSelection> for String {
    fn from(value: YearSelection) -> Self {
        match value {
            YearSelection::All => ALL_YEARS.to_string(),
            YearSelection::Year(year) => year,
        }
    }
}

impl fmt::Display for YearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearSelection::All => write!(f, "{}", ALL_YEARS),
            YearSelection::Year(year) => write!(f, "{}", year),
        }
    }
}

/// User-driven filter state: a species set (empty means all species) and a year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Selected species in the order they were toggled on. Never holds duplicates.
    pub species: Vec<String>,
    pub year: YearSelection,
}

/// A single user interaction against the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    ToggleSpecies(String),
    ShowAllSpecies,
    SelectYear(YearSelection),
}

impl FilterSelection {
    pub fn new<I, S>(species: I, year: YearSelection) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for s in species {
            let s = s.into();
            if !selected.contains(&s) {
                selected.push(s);
            }
        }
        Self {
            species: selected,
            year,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.species.is_empty() && self.year == YearSelection::All
    }

    pub fn includes_species(&self, species: &str) -> bool {
        self.species.is_empty() || self.species.iter().any(|s| s == species)
    }

    /// Old selection + event -> new selection. `self` is left untouched, and
    /// repeated species in it are collapsed in the result.
    pub fn apply(&self, event: &FilterEvent) -> FilterSelection {
        match event {
            FilterEvent::ToggleSpecies(species) => {
                let mut next =
                    FilterSelection::new(self.species.iter().cloned(), self.year.clone());
                if next.species.contains(species) {
                    next.species.retain(|s| s != species);
                } else {
                    next.species.push(species.clone());
                }
                next
            }
            FilterEvent::ShowAllSpecies => FilterSelection {
                species: Vec::new(),
                year: self.year.clone(),
            },
            FilterEvent::SelectYear(year) => {
                FilterSelection::new(self.species.iter().cloned(), year.clone())
            }
        }
    }
}

/// A categorical field a record can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Species,
    Country,
    Sex,
    LifeStage,
    Year,
    Location,
}

impl Dimension {
    pub fn value<'a>(&self, record: &'a StrandingRecord) -> &'a str {
        match self {
            Dimension::Species => &record.species,
            Dimension::Country => &record.country,
            Dimension::Sex => &record.sex,
            Dimension::LifeStage => &record.life_stage,
            Dimension::Year => &record.year,
            Dimension::Location => &record.location,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Species => "species",
            Dimension::Country => "country",
            Dimension::Sex => "sex",
            Dimension::LifeStage => "life_stage",
            Dimension::Year => "year",
            Dimension::Location => "location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Ordered (label, count) pairs for one grouping dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationResult {
    pub entries: Vec<CategoryCount>,
}

impl AggregationResult {
    pub fn new(entries: Vec<CategoryCount>) -> Self {
        Self { entries }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.count).collect()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }
}
