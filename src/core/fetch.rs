use crate::core::session::HttpSession;
use crate::domain::model::{DownloadTarget, RunSummary, TargetOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Sequential fetch-and-persist over a shared session.
pub struct Fetcher<'a, S: Storage> {
    session: &'a HttpSession,
    storage: &'a S,
}

impl<'a, S: Storage> Fetcher<'a, S> {
    pub fn new(session: &'a HttpSession, storage: &'a S) -> Self {
        Self { session, storage }
    }

    /// Fetches every target in order. A failing target is recorded and the
    /// loop moves on; only a closed session aborts the run.
    pub async fn run<I>(&self, targets: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = DownloadTarget>,
    {
        self.session.client()?;

        let mut summary = RunSummary::start();
        for target in targets {
            let (file_name, outcome) = match target.file_name() {
                Ok(name) => {
                    let outcome = match self.fetch_target(&target, &name).await {
                        Ok(outcome) => outcome,
                        Err(e) => TargetOutcome::Failed {
                            reason: e.to_string(),
                        },
                    };
                    (Some(name), outcome)
                }
                Err(e) => (
                    None,
                    TargetOutcome::Failed {
                        reason: e.to_string(),
                    },
                ),
            };

            log_outcome(&target, file_name.as_deref(), &outcome);
            summary.record(target, file_name, outcome);
        }
        summary.finish();

        tracing::info!(
            "Download pass finished: {} downloaded, {} skipped, {} failed",
            summary.downloaded(),
            summary.skipped(),
            summary.failed()
        );
        Ok(summary)
    }

    /// One GET, then skip or write.
    pub async fn fetch_target(
        &self,
        target: &DownloadTarget,
        file_name: &str,
    ) -> Result<TargetOutcome> {
        let client = self.session.client()?;

        tracing::debug!("Making request to: {}", target.url);
        let response = client.get(&target.url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatus {
                url: target.url.clone(),
                status: status.as_u16(),
            });
        }

        // The header only matters when there is a local copy to compare against
        if let Some(local_size) = self.storage.file_size(file_name).await? {
            let remote_size = declared_length(&target.url, response.headers())?;
            if local_size == remote_size {
                return Ok(TargetOutcome::Skipped { bytes: local_size });
            }
            tracing::debug!(
                "{} changed remotely ({} -> {} bytes)",
                file_name,
                local_size,
                remote_size
            );
        }

        let body = response.bytes().await?;
        self.storage.write_file(file_name, &body).await?;

        Ok(TargetOutcome::Downloaded {
            bytes: body.len() as u64,
        })
    }
}

fn declared_length(url: &str, headers: &HeaderMap) -> Result<u64> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or_else(|| EtlError::MissingContentLength {
            url: url.to_string(),
        })?;

    let text = value.to_str().unwrap_or_default().trim();
    text.parse::<u64>()
        .map_err(|_| EtlError::InvalidContentLength {
            url: url.to_string(),
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        })
}

fn log_outcome(target: &DownloadTarget, file_name: Option<&str>, outcome: &TargetOutcome) {
    let name = file_name.unwrap_or(&target.url);
    match outcome {
        TargetOutcome::Downloaded { bytes } => {
            tracing::info!("⬇️  {} downloaded ({} bytes)", name, bytes)
        }
        TargetOutcome::Skipped { .. } => {
            tracing::info!("{} already downloaded, skipping...", name)
        }
        TargetOutcome::Failed { reason } => {
            tracing::warn!("❌ Failed to download {}: {}", name, reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with(value: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(CONTENT_LENGTH, HeaderValue::from_static(v));
        }
        headers
    }

    #[test]
    fn test_declared_length_parses_header() {
        assert_eq!(declared_length("u", &headers_with(Some("1234"))).unwrap(), 1234);
    }

    #[test]
    fn test_declared_length_missing() {
        assert!(matches!(
            declared_length("u", &headers_with(None)),
            Err(EtlError::MissingContentLength { .. })
        ));
    }

    #[test]
    fn test_declared_length_not_a_number() {
        assert!(matches!(
            declared_length("u", &headers_with(Some("lots"))),
            Err(EtlError::InvalidContentLength { .. })
        ));
    }
}
