use crate::core::dashboard::DashboardReport;
use crate::domain::model::{FilterSelection, StrandingRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Local path or http(s) URL of the stranding CSV.
    fn data_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn selection(&self) -> FilterSelection;
    fn top_n(&self) -> usize;
    fn output_formats(&self) -> &[String];
    fn compress_output(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<StrandingRecord>>;
    async fn transform(&self, records: Vec<StrandingRecord>) -> Result<DashboardReport>;
    async fn load(&self, report: DashboardReport) -> Result<String>;
}
