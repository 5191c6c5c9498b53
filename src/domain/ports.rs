use crate::domain::model::{ConsolidationReport, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The download directory, keyed by file name.
pub trait Storage: Send + Sync {
    fn root(&self) -> &Path;

    /// Size in bytes of an existing file, `None` if it does not exist.
    fn file_size(&self, name: &str) -> impl std::future::Future<Output = Result<Option<u64>>> + Send;

    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Files directly under the root with the given extension, sorted by name.
    fn list_files(
        &self,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn download_dir(&self) -> &str;
    fn start_year(&self) -> i32;
    fn end_year(&self) -> i32;
    fn semesters_per_year(&self) -> u32;
    fn output_file(&self) -> String;
    /// Single ASCII byte; anything else is a config error.
    fn csv_separator(&self) -> Result<u8>;
    fn consolidate_enabled(&self) -> bool;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn download(&self) -> Result<RunSummary>;
    async fn consolidate(&self, summary: &RunSummary) -> Result<Option<ConsolidationReport>>;
}
