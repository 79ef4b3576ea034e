use crate::core::dashboard::{DashboardReport, DashboardState};
use crate::core::{export, loader};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::StrandingRecord;
use crate::utils::error::Result;

/// Reads stranding CSV from `source`, builds the dashboard report for the
/// configured selection and writes it through `sink`.
pub struct StrandingPipeline<R: Storage, W: Storage, C: ConfigProvider> {
    source: R,
    sink: W,
    config: C,
}

impl<R: Storage, W: Storage, C: ConfigProvider> StrandingPipeline<R, W, C> {
    pub fn new(source: R, sink: W, config: C) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<R: Storage, W: Storage, C: ConfigProvider> Pipeline for StrandingPipeline<R, W, C> {
    async fn extract(&self) -> Result<Vec<StrandingRecord>> {
        tracing::debug!("Reading stranding data from: {}", self.config.data_source());
        let bytes = self.source.read_file(self.config.data_source()).await?;
        tracing::debug!("Read {} bytes", bytes.len());
        loader::parse_bytes(bytes)
    }

    async fn transform(&self, records: Vec<StrandingRecord>) -> Result<DashboardReport> {
        let state = DashboardState::new(records).with_selection(self.config.selection());
        Ok(state.report(self.config.top_n()))
    }

    async fn load(&self, report: DashboardReport) -> Result<String> {
        let files = export::render(&report, self.config.output_formats())?;
        let output_dir = self.config.output_path().trim_end_matches('/');

        if self.config.compress_output() {
            let zip_data = export::bundle_zip(&files)?;
            tracing::debug!(
                "Writing ZIP bundle with {} files ({} bytes)",
                files.len(),
                zip_data.len()
            );
            self.sink.write_file(export::REPORT_ZIP, &zip_data).await?;
            return Ok(format!("{}/{}", output_dir, export::REPORT_ZIP));
        }

        for file in &files {
            tracing::debug!("Writing {} ({} bytes)", file.name, file.data.len());
            self.sink.write_file(&file.name, &file.data).await?;
        }
        Ok(output_dir.to_string())
    }
}
