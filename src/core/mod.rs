pub mod aggregate;
pub mod dashboard;
pub mod engine;
pub mod export;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod pipeline;

pub use crate::domain::model::{FilterSelection, StrandingRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
