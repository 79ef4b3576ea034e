use crate::domain::model::StrandingRecord;
use crate::utils::error::Result;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Columns every stranding export is expected to carry.
pub const EXPECTED_COLUMNS: &[&str] = &[
    "year",
    "species",
    "location",
    "status",
    "latitude",
    "longitude",
    "sex",
    "lifeStage",
    "country",
    "decimalLatitude",
    "decimalLongitude",
];

struct ColumnIndex {
    year: Option<usize>,
    species: Option<usize>,
    location: Option<usize>,
    country: Option<usize>,
    status: Option<usize>,
    sex: Option<usize>,
    life_stage: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    decimal_latitude: Option<usize>,
    decimal_longitude: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            year: find("year"),
            species: find("species"),
            location: find("location"),
            country: find("country"),
            status: find("status"),
            sex: find("sex"),
            life_stage: find("lifeStage"),
            latitude: find("latitude"),
            longitude: find("longitude"),
            decimal_latitude: find("decimalLatitude"),
            decimal_longitude: find("decimalLongitude"),
        }
    }

    fn text(row: &StringRecord, idx: Option<usize>) -> String {
        idx.and_then(|i| row.get(i)).unwrap_or("").to_string()
    }

    fn number(row: &StringRecord, idx: Option<usize>) -> Option<f64> {
        idx.and_then(|i| row.get(i)).and_then(parse_coordinate)
    }

    fn record(&self, row: &StringRecord) -> StrandingRecord {
        StrandingRecord {
            year: Self::text(row, self.year),
            species: Self::text(row, self.species),
            location: Self::text(row, self.location),
            country: Self::text(row, self.country),
            status: Self::text(row, self.status),
            sex: Self::text(row, self.sex),
            life_stage: Self::text(row, self.life_stage),
            latitude: Self::text(row, self.latitude),
            longitude: Self::text(row, self.longitude),
            decimal_latitude: Self::number(row, self.decimal_latitude),
            decimal_longitude: Self::number(row, self.decimal_longitude),
        }
    }
}

/// Lenient numeric coercion for the decimal coordinate columns: anything that
/// is not a finite number becomes `None`, never zero.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse stranding CSV text into records.
///
/// Header-driven: columns are located by name, missing columns yield empty
/// strings, short rows are padded and long rows truncated. Blank lines are
/// skipped.
pub fn parse_records(text: &str) -> Result<Vec<StrandingRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let missing: Vec<&str> = EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == c))
        .collect();
    if !missing.is_empty() {
        tracing::warn!("Stranding CSV is missing columns: {}", missing.join(", "));
    }

    let index = ColumnIndex::from_headers(&headers);
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(index.record(&row));
    }

    tracing::debug!("Parsed {} stranding records", records.len());
    Ok(records)
}

pub fn parse_bytes(bytes: Vec<u8>) -> Result<Vec<StrandingRecord>> {
    let text = String::from_utf8(bytes)?;
    parse_records(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "year,species,location,status,latitude,longitude,sex,lifeStage,country,decimalLatitude,decimalLongitude";

    #[test]
    fn test_parse_basic_rows() {
        let csv = format!(
            "{HEADER}\n2021,Kogia sima,Suva,dead,-18.1,178.4,female,adult,Fiji,-18.1,178.4\n"
        );
        let records = parse_records(&csv).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.species, "Kogia sima");
        assert_eq!(r.life_stage, "adult");
        assert_eq!(r.decimal_latitude, Some(-18.1));
        assert_eq!(r.decimal_longitude, Some(178.4));
    }

    #[test]
    fn test_non_numeric_coordinates_become_absent() {
        let csv = format!(
            "{HEADER}\n2020,Dugong dugon,Nadi,alive,n/a,n/a,male,juvenile,Fiji,unknown,\n"
        );
        let records = parse_records(&csv).unwrap();
        assert_eq!(records[0].decimal_latitude, None);
        assert_eq!(records[0].decimal_longitude, None);
        assert_eq!(records[0].latitude, "n/a");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = format!("{HEADER}\n\n2019,A,,,,,,,,,\n\n2020,B,,,,,,,,,\n");
        let records = parse_records(&csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].year, "2020");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let csv = "species,year\nTursiops truncatus,2018\n";
        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].species, "Tursiops truncatus");
        assert_eq!(records[0].year, "2018");
        assert_eq!(records[0].country, "");
        assert_eq!(records[0].decimal_latitude, None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = format!("{HEADER}\n2017,Orcinus orca\n");
        let records = parse_records(&csv).unwrap();
        assert_eq!(records[0].species, "Orcinus orca");
        assert_eq!(records[0].sex, "");
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(" -20.5 "), Some(-20.5));
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate("inf"), None);
        assert_eq!(parse_coordinate(""), None);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        assert!(parse_bytes(vec![0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let csv = "\u{feff}year,species\n2022,Kogia breviceps\n";
        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].year, "2022");
    }
}
