use crate::config::{default_output_file, validate_common, DEFAULT_CSV_SEPARATOR, DEFAULT_DOWNLOAD_DIR};
use crate::core::session::DEFAULT_USER_AGENT;
use crate::core::urls::{
    DEFAULT_BASE_URL, DEFAULT_END_YEAR, DEFAULT_SEMESTERS_PER_YEAR, DEFAULT_START_YEAR,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{parse_separator, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub range: RangeConfig,
    pub download: DownloadConfig,
    pub consolidate: ConsolidateConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub start_year: i32,
    pub end_year: i32,
    pub semesters_per_year: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            semesters_per_year: DEFAULT_SEMESTERS_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub directory: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DOWNLOAD_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidateConfig {
    pub enabled: bool,
    pub output_file: Option<String>,
    pub csv_separator: String,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_file: None,
            csv_separator: DEFAULT_CSV_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// `${VAR}` is replaced by the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn download_dir(&self) -> &str {
        &self.download.directory
    }

    fn start_year(&self) -> i32 {
        self.range.start_year
    }

    fn end_year(&self) -> i32 {
        self.range.end_year
    }

    fn semesters_per_year(&self) -> u32 {
        self.range.semesters_per_year
    }

    fn output_file(&self) -> String {
        self.consolidate
            .output_file
            .clone()
            .unwrap_or_else(|| default_output_file(self.range.start_year, self.range.end_year))
    }

    fn csv_separator(&self) -> Result<u8> {
        parse_separator("consolidate.csv_separator", &self.consolidate.csv_separator)
    }

    fn consolidate_enabled(&self) -> bool {
        self.consolidate.enabled
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_common(self, self.source.timeout_seconds)
    }
}
