pub mod consolidate;
pub mod etl;
pub mod fetch;
pub mod pipeline;
pub mod session;
pub mod urls;

pub use crate::domain::model::{ConsolidationReport, DownloadTarget, RunSummary, TargetOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
