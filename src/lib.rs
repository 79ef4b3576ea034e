pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpStorage, LocalStorage, SourceStorage};
pub use core::{
    dashboard::{DashboardReport, DashboardState},
    engine::DashboardEngine,
    pipeline::StrandingPipeline,
};
pub use domain::model::{
    AggregationResult, CategoryCount, Dimension, FilterEvent, FilterSelection, StrandingRecord,
    YearSelection,
};
pub use utils::error::{DashboardError, Result};
