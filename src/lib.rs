pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{
    etl::{EtlEngine, EtlOutcome},
    pipeline::GlpPipeline,
    urls::GlpUrls,
};
pub use domain::model::{ConsolidationReport, DownloadTarget, RunSummary, TargetOutcome};
pub use utils::error::{EtlError, Result};
