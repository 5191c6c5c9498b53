use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Columnar processing error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("Background task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Response for {url} has no Content-Length header")]
    MissingContentLength { url: String },

    #[error("Response for {url} has an invalid Content-Length: {value}")]
    InvalidContentLength { url: String, value: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP session already closed")]
    SessionClosed,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Processing,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_)
            | EtlError::HttpStatus { .. }
            | EtlError::MissingContentLength { .. }
            | EtlError::InvalidContentLength { .. }
            | EtlError::InvalidUrl { .. } => ErrorCategory::Network,
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::SerializationError(_) | EtlError::PolarsError(_) => ErrorCategory::Processing,
            EtlError::TaskJoinError(_) | EtlError::SessionClosed => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::HttpStatus { status, .. } if *status == 404 => {
                "The publication may not exist yet or was renamed on the portal"
            }
            EtlError::ApiError(_) | EtlError::HttpStatus { .. } => {
                "Check network connectivity and run again; completed files are skipped"
            }
            EtlError::MissingContentLength { .. } | EtlError::InvalidContentLength { .. } => {
                "Delete the local file to force a fresh download"
            }
            EtlError::InvalidUrl { .. } => "Check the configured base URL",
            EtlError::IoError(_) => "Check that the download directory exists and is writable",
            EtlError::PolarsError(_) => {
                "Inspect the downloaded CSV files; remove any that are truncated or not CSV"
            }
            EtlError::SerializationError(_) => "Report this as a bug",
            EtlError::TaskJoinError(_) | EtlError::SessionClosed => "Run again",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again (see --help)"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Download problem: {}", self),
            ErrorCategory::Storage => format!("File system problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Processing => format!("Consolidation problem: {}", self),
            ErrorCategory::Runtime => format!("Unexpected runtime failure: {}", self),
        }
    }

    /// Process exit code for a fatal error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
