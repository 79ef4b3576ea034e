use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct DashboardEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> DashboardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Building stranding dashboard...");

        let records = self.pipeline.extract().await?;
        tracing::info!("Loaded {} stranding records", records.len());
        self.monitor.log_stats("load");

        let report = self.pipeline.transform(records).await?;
        tracing::info!(
            "Aggregated {} strandings across {} species ({} mappable)",
            report.summary.total_strandings,
            report.summary.species_diversity,
            report.map.markers.len()
        );
        self.monitor.log_stats("aggregate");

        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report written to: {}", output_path);
        self.monitor.log_stats("export");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
