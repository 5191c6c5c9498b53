use crate::core::consolidate::consolidate_csv_files;
use crate::core::fetch::Fetcher;
use crate::core::session::HttpSession;
use crate::core::urls::GlpUrls;
use crate::core::{ConfigProvider, ConsolidationReport, Pipeline, RunSummary, Storage};
use crate::domain::model::DownloadTarget;
use crate::utils::error::Result;

pub struct GlpPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> GlpPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn urls(&self) -> GlpUrls {
        GlpUrls::new(
            self.config.base_url(),
            self.config.start_year(),
            self.config.end_year(),
            self.config.semesters_per_year(),
        )
    }

    /// Targets a run would fetch, without touching the network.
    pub fn planned_targets(&self) -> Vec<DownloadTarget> {
        self.urls().targets().collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GlpPipeline<S, C> {
    async fn download(&self) -> Result<RunSummary> {
        let urls = self.urls();
        if urls.len() == 0 {
            tracing::warn!(
                "Range {}..={} with {} semesters per year has no publications",
                self.config.start_year(),
                self.config.end_year(),
                self.config.semesters_per_year()
            );
        } else {
            tracing::info!(
                "Fetching {} publications into {}",
                urls.len(),
                self.storage.root().display()
            );
        }

        let session = HttpSession::open(self.config.user_agent(), self.config.request_timeout())?;
        let summary = Fetcher::new(&session, &self.storage)
            .run(urls.targets())
            .await;
        session.close();

        summary
    }

    async fn consolidate(&self, summary: &RunSummary) -> Result<Option<ConsolidationReport>> {
        if !self.config.consolidate_enabled() {
            tracing::info!("Consolidation disabled, leaving CSV files as they are");
            return Ok(None);
        }

        if summary.failed() > 0 {
            tracing::warn!(
                "{} publications failed this run; consolidating what is on disk",
                summary.failed()
            );
        }

        let inputs = self.storage.list_files("csv").await?;
        if inputs.is_empty() {
            tracing::warn!(
                "No CSV files in {}, nothing to consolidate",
                self.storage.root().display()
            );
            return Ok(None);
        }

        let output = self.storage.root().join(self.config.output_file());
        let separator = self.config.csv_separator()?;
        tracing::debug!(
            "Consolidating {} files into {}",
            inputs.len(),
            output.display()
        );

        tokio::task::spawn_blocking(move || consolidate_csv_files(&inputs, separator, &output))
            .await?
    }
}
