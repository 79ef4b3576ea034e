use crate::core::ConfigProvider;
use crate::domain::model::{FilterSelection, YearSelection};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_data_source, validate_output_formats, validate_path, validate_positive_number,
    Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "strandings-dashboard")]
#[command(about = "Aggregate marine-mammal stranding records into dashboard-ready charts")]
pub struct CliConfig {
    /// CSV file path or http(s) URL
    #[arg(long, default_value = "data/sample_strandings.csv")]
    pub data_source: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Species to keep (exact match); empty keeps all species
    #[arg(long, value_delimiter = ',')]
    pub species: Vec<String>,

    /// Year to keep (exact string match) or "all"
    #[arg(long, default_value = "all")]
    pub year: String,

    #[arg(long, default_value = "10")]
    pub top_n: usize,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Bundle all output files into a single ZIP archive")]
    pub compress: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_source: "data/sample_strandings.csv".to_string(),
            output_path: "./output".to_string(),
            species: Vec::new(),
            year: "all".to_string(),
            top_n: 10,
            output_formats: vec!["json".to_string(), "csv".to_string()],
            compress: false,
            verbose: false,
            monitor: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn data_source(&self) -> &str {
        &self.data_source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn selection(&self) -> FilterSelection {
        FilterSelection::new(self.species.iter().cloned(), YearSelection::parse(&self.year))
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn compress_output(&self) -> bool {
        self.compress
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_data_source("data_source", &self.data_source)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("top_n", self.top_n, 1)?;
        validate_output_formats("output_formats", &self.output_formats)?;
        Ok(())
    }
}
