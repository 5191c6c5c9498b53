use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Desktop browser UA; the portal rejects some non-browser agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Shared HTTP client for one run.
///
/// Released exactly once: by [`HttpSession::close`] or, on any other exit
/// path, when dropped.
#[derive(Debug)]
pub struct HttpSession {
    client: Option<Client>,
}

impl HttpSession {
    pub fn open(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(user_agent).map_err(|e| EtlError::InvalidConfigValueError {
            field: "user_agent".to_string(),
            value: user_agent.to_string(),
            reason: e.to_string(),
        })?;
        headers.insert(USER_AGENT, agent);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::info!("🌐 HTTP session started.");
        Ok(Self {
            client: Some(client),
        })
    }

    pub fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(EtlError::SessionClosed)
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Returns `true` only for the call that actually released the client.
    pub fn release(&mut self) -> bool {
        match self.client.take() {
            Some(client) => {
                drop(client);
                tracing::info!("🌐 HTTP session closed.");
                true
            }
            None => false,
        }
    }

    pub fn close(mut self) {
        self.release();
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        if self.release() && std::thread::panicking() {
            tracing::warn!("HTTP session released while unwinding");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_happens_once() {
        let mut session = HttpSession::open(DEFAULT_USER_AGENT, None).unwrap();
        assert!(session.is_open());
        assert!(session.client().is_ok());

        assert!(session.release());
        assert!(!session.release());
        assert!(!session.is_open());
        assert!(matches!(session.client(), Err(EtlError::SessionClosed)));
    }

    #[test]
    fn test_invalid_user_agent_fails_to_open() {
        let result = HttpSession::open("bad\nagent", None);
        assert!(matches!(
            result,
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_released_on_unwind() {
        let outcome = std::panic::catch_unwind(|| {
            let session = HttpSession::open(DEFAULT_USER_AGENT, None).unwrap();
            assert!(session.is_open());
            panic!("escaping failure");
        });
        assert!(outcome.is_err());
    }
}
