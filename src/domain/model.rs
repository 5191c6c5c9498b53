use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One semi-annual publication to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadTarget {
    pub year: i32,
    pub semester: u32,
    pub url: String,
}

impl DownloadTarget {
    pub fn new(year: i32, semester: u32, url: impl Into<String>) -> Self {
        Self {
            year,
            semester,
            url: url.into(),
        }
    }

    /// Local file name: the last path segment of the URL.
    pub fn file_name(&self) -> Result<String> {
        let parsed = Url::parse(&self.url).map_err(|e| EtlError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| EtlError::InvalidUrl {
                url: self.url.clone(),
                reason: "URL has no file name".to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    Downloaded { bytes: u64 },
    /// Local file already matched the remote `Content-Length`.
    Skipped { bytes: u64 },
    Failed { reason: String },
}

impl TargetOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, TargetOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReport {
    pub target: DownloadTarget,
    pub file_name: Option<String>,
    pub outcome: TargetOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub targets: Vec<TargetReport>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            targets: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        target: DownloadTarget,
        file_name: Option<String>,
        outcome: TargetOutcome,
    ) {
        self.targets.push(TargetReport {
            target,
            file_name,
            outcome,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(TargetOutcome::is_failed)
    }

    pub fn total(&self) -> usize {
        self.targets.len()
    }

    /// Bytes written to disk during this run.
    pub fn bytes_written(&self) -> u64 {
        self.targets
            .iter()
            .filter_map(|r| match r.outcome {
                TargetOutcome::Downloaded { bytes } => Some(bytes),
                _ => None,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets.iter().filter(|r| r.outcome.is_failed())
    }

    fn count(&self, pred: impl Fn(&TargetOutcome) -> bool) -> usize {
        self.targets.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub input_files: usize,
    pub rows: usize,
    pub columns: usize,
    pub output_path: String,
}
