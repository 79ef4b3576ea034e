use crate::core::aggregate::TrendChart;
use crate::core::dashboard::DashboardReport;
use crate::core::geo::MapViewport;
use crate::domain::model::AggregationResult;
use crate::utils::error::{DashboardError, Result};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const REPORT_JSON: &str = "dashboard_report.json";
pub const REPORT_ZIP: &str = "dashboard_report.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl OutputFile {
    fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            data,
        }
    }
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| DashboardError::IoError(e.into_error()))
}

pub fn aggregation_csv(header: &str, result: &AggregationResult) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([header, "count"])?;
    for entry in result.iter() {
        writer.write_record([entry.label.as_str(), entry.count.to_string().as_str()])?;
    }
    into_bytes(writer)
}

/// One row per year, one column per series.
pub fn trend_csv(chart: &TrendChart) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["year".to_string()];
    header.extend(chart.series.iter().map(|s| s.label.clone()));
    writer.write_record(&header)?;

    for (i, year) in chart.years.iter().enumerate() {
        let mut row = vec![year.clone()];
        row.extend(
            chart
                .series
                .iter()
                .map(|s| s.counts.get(i).copied().unwrap_or(0).to_string()),
        );
        writer.write_record(&row)?;
    }
    into_bytes(writer)
}

pub fn markers_csv(map: &MapViewport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["latitude", "longitude", "species", "location", "year"])?;
    for marker in &map.markers {
        writer.write_record([
            marker.position.lat.to_string().as_str(),
            marker.position.lng.to_string().as_str(),
            marker.species.as_str(),
            marker.location.as_str(),
            marker.year.as_str(),
        ])?;
    }
    into_bytes(writer)
}

pub fn csv_files(report: &DashboardReport) -> Result<Vec<OutputFile>> {
    Ok(vec![
        OutputFile::new("top_species.csv", aggregation_csv("species", &report.top_species)?),
        OutputFile::new("countries.csv", aggregation_csv("country", &report.countries)?),
        OutputFile::new("sexes.csv", aggregation_csv("sex", &report.sexes)?),
        OutputFile::new("life_stages.csv", aggregation_csv("life_stage", &report.life_stages)?),
        OutputFile::new("years.csv", aggregation_csv("year", &report.years)?),
        OutputFile::new("species_trend.csv", trend_csv(&report.species_trend)?),
        OutputFile::new("map_markers.csv", markers_csv(&report.map)?),
    ])
}

pub fn json_file(report: &DashboardReport) -> Result<OutputFile> {
    let json = serde_json::to_vec_pretty(report)?;
    Ok(OutputFile::new(REPORT_JSON, json))
}

/// Render the report in each requested format. Unknown formats are rejected.
pub fn render(report: &DashboardReport, formats: &[String]) -> Result<Vec<OutputFile>> {
    let mut files = Vec::new();
    for format in formats {
        match format.as_str() {
            "json" => files.push(json_file(report)?),
            "csv" => files.extend(csv_files(report)?),
            other => {
                return Err(DashboardError::InvalidConfigValueError {
                    field: "output_formats".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported output format".to_string(),
                })
            }
        }
    }
    Ok(files)
}

pub fn bundle_zip(files: &[OutputFile]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for file in files {
        zip.start_file(file.name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(&file.data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
