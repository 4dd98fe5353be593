use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct FixEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> FixEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting rect fix process...");

        tracing::info!("Reading input...");
        let lines = self.pipeline.extract().await?;
        tracing::info!("Read {} lines", lines.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Rewriting rect lines...");
        let result = self.pipeline.transform(lines).await?;
        tracing::info!(
            "Rewrote {} lines, passed {} through, recovered {}",
            result.stats.rewritten,
            result.stats.passed,
            result.stats.recovered
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Writing output...");
        let destination = self.pipeline.load(result).await?;
        tracing::info!("Output written to: {}", destination);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(destination)
    }
}
