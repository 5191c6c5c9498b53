use crate::core::{ConsolidationReport, Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a full run produced.
#[derive(Debug, Clone)]
pub struct EtlOutcome {
    pub summary: RunSummary,
    pub consolidation: Option<ConsolidationReport>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<EtlOutcome> {
        tracing::info!("Starting ETL process...");
        self.monitor.log_stats("Start");

        tracing::info!("Downloading publications...");
        let summary = self.pipeline.download().await?;
        self.monitor.log_stats("Download");

        tracing::info!("Consolidating...");
        let consolidation = match self.pipeline.consolidate(&summary).await {
            Ok(report) => report,
            Err(e) => {
                log_summary(&summary);
                return Err(e);
            }
        };
        if let Some(report) = &consolidation {
            tracing::info!(
                "Consolidated {} files ({} rows, {} columns) into {}",
                report.input_files,
                report.rows,
                report.columns,
                report.output_path
            );
        }
        self.monitor.log_stats("Consolidate");
        self.monitor.log_final_stats();

        Ok(EtlOutcome {
            summary,
            consolidation,
        })
    }
}

/// Keeps the per-target results visible when a later stage fails.
fn log_summary(summary: &RunSummary) {
    tracing::error!(
        "Consolidation failed after download: {} downloaded, {} skipped, {} failed of {}",
        summary.downloaded(),
        summary.skipped(),
        summary.failed(),
        summary.total()
    );
    for report in summary.failures() {
        tracing::error!("  {} -> {:?}", report.target.url, report.outcome);
    }
}
