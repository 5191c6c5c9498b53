pub mod cli;
pub mod toml_config;

use crate::core::session::DEFAULT_USER_AGENT;
use crate::core::urls::{
    DEFAULT_BASE_URL, DEFAULT_END_YEAR, DEFAULT_SEMESTERS_PER_YEAR, DEFAULT_START_YEAR,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOWNLOAD_DIR: &str = "data";
pub const DEFAULT_CSV_SEPARATOR: &str = ";";

/// Years a configuration may name.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// `glp_anp_{start}-{end}.parquet`
pub fn default_output_file(start_year: i32, end_year: i32) -> String {
    format!("glp_anp_{}-{}.parquet", start_year, end_year)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "anp-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Download the ANP semi-annual GLP price surveys and consolidate them into Parquet")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_DOWNLOAD_DIR))]
    pub download_dir: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_START_YEAR))]
    pub start_year: i32,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_END_YEAR))]
    pub end_year: i32,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_SEMESTERS_PER_YEAR))]
    pub semesters_per_year: u32,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_BASE_URL))]
    pub base_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_USER_AGENT))]
    pub user_agent: String,

    /// Parquet file name inside the download directory
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_CSV_SEPARATOR))]
    pub csv_separator: String,

    /// Per-request timeout; the HTTP client default applies when unset
    #[cfg_attr(feature = "cli", arg(long))]
    pub timeout_secs: Option<u64>,

    #[cfg_attr(feature = "cli", arg(long, help = "Only download, do not write the Parquet file"))]
    pub skip_consolidate: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "List the publications without fetching them"))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Print the run summary as JSON"))]
    pub json: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub log_json: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log process CPU and memory per stage"))]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            download_dir: DEFAULT_DOWNLOAD_DIR.to_string(),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            semesters_per_year: DEFAULT_SEMESTERS_PER_YEAR,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_file: None,
            csv_separator: DEFAULT_CSV_SEPARATOR.to_string(),
            timeout_secs: None,
            skip_consolidate: false,
            dry_run: false,
            json: false,
            log_json: false,
            verbose: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn download_dir(&self) -> &str {
        &self.download_dir
    }

    fn start_year(&self) -> i32 {
        self.start_year
    }

    fn end_year(&self) -> i32 {
        self.end_year
    }

    fn semesters_per_year(&self) -> u32 {
        self.semesters_per_year
    }

    fn output_file(&self) -> String {
        self.output_file
            .clone()
            .unwrap_or_else(|| default_output_file(self.start_year, self.end_year))
    }

    fn csv_separator(&self) -> Result<u8> {
        validation::parse_separator("csv_separator", &self.csv_separator)
    }

    fn consolidate_enabled(&self) -> bool {
        !self.skip_consolidate
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Checks shared by every configuration source.
pub(crate) fn validate_common(
    config: &impl ConfigProvider,
    timeout_secs: Option<u64>,
) -> Result<()> {
    validation::validate_url("base_url", config.base_url())?;
    validation::validate_non_empty_string("user_agent", config.user_agent())?;
    validation::validate_path("download_dir", config.download_dir())?;
    validation::validate_range("start_year", config.start_year(), MIN_YEAR, MAX_YEAR)?;
    validation::validate_range("end_year", config.end_year(), MIN_YEAR, MAX_YEAR)?;
    validation::validate_range("semesters_per_year", config.semesters_per_year(), 1, 12)?;
    validation::validate_file_name("output_file", &config.output_file())?;
    config.csv_separator()?;
    if let Some(secs) = timeout_secs {
        validation::validate_positive_number("timeout_secs", secs as usize, 1)?;
    }
    Ok(())
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_common(self, self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_defaults_match_historical_series() {
        let config = CliConfig::default();
        assert_eq!(config.download_dir(), "data");
        assert_eq!(config.start_year(), 2004);
        assert_eq!(config.end_year(), 2024);
        assert_eq!(config.semesters_per_year(), 2);
        assert_eq!(config.output_file(), "glp_anp_2004-2024.parquet");
        assert_eq!(config.csv_separator().unwrap(), b';');
        assert!(config.consolidate_enabled());
        assert!(config.request_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.base_url = "ftp://portal".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.semesters_per_year = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.output_file = Some("../escape.parquet".to_string());
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_multi_byte_separator_is_an_error() {
        let config = CliConfig {
            csv_separator: ";;".to_string(),
            ..CliConfig::default()
        };
        assert!(matches!(
            config.csv_separator(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reversed_range_is_accepted() {
        let config = CliConfig {
            start_year: 2024,
            end_year: 2004,
            ..CliConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_years_outside_supported_range_are_rejected() {
        let config = CliConfig {
            end_year: i32::MAX,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            start_year: 1899,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
            ..CliConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "anp-etl",
            "--download-dir",
            "/tmp/glp",
            "--start-year",
            "2021",
            "--end-year",
            "2022",
            "--skip-consolidate",
        ]);
        assert_eq!(config.download_dir, "/tmp/glp");
        assert_eq!(config.start_year, 2021);
        assert_eq!(config.end_year, 2022);
        assert!(!config.consolidate_enabled());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
