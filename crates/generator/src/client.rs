use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use ampquote_core::config::RemoteConfig;
use ampquote_core::remote::{QuoteRequest, RemoteQuoteResponse};

/// Ways the remote composition call can fail. Every variant routes to the
/// local fallback; none of them surfaces to the user.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote quote composition is not configured")]
    NotConfigured,
    #[error("remote transport failure: {0}")]
    Transport(String),
    #[error("remote returned HTTP status {0}")]
    Status(u16),
    #[error("remote response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RemoteQuoteClient: Send + Sync {
    async fn compose(&self, request: &QuoteRequest) -> Result<RemoteQuoteResponse, RemoteError>;
}

/// HTTP client for the hosted quote-composition service.
pub struct HttpQuoteClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpQuoteClient {
    pub fn from_config(remote: &RemoteConfig) -> Result<Self, RemoteError> {
        if !remote.enabled {
            return Err(RemoteError::NotConfigured);
        }
        let endpoint = remote
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or(RemoteError::NotConfigured)?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(remote.timeout_secs))
            .build()
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        Ok(Self { http, endpoint, api_key: remote.api_key.clone() })
    }
}

#[async_trait]
impl RemoteQuoteClient for HttpQuoteClient {
    async fn compose(&self, request: &QuoteRequest) -> Result<RemoteQuoteResponse, RemoteError> {
        let mut builder = self.http.post(&self.endpoint).json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key.expose_secret());
        }

        let response =
            builder.send().await.map_err(|error| RemoteError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        response
            .json::<RemoteQuoteResponse>()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))
    }
}

/// Stand-in when no remote service is configured; always reports
/// `NotConfigured`, sending every generation down the local path.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopQuoteClient;

#[async_trait]
impl RemoteQuoteClient for NoopQuoteClient {
    async fn compose(&self, _request: &QuoteRequest) -> Result<RemoteQuoteResponse, RemoteError> {
        Err(RemoteError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use ampquote_core::config::RemoteConfig;

    use super::{HttpQuoteClient, RemoteError};

    #[test]
    fn disabled_remote_config_yields_not_configured() {
        let config = RemoteConfig { enabled: false, endpoint: None, api_key: None, timeout_secs: 30 };
        assert!(matches!(HttpQuoteClient::from_config(&config), Err(RemoteError::NotConfigured)));
    }

    #[test]
    fn enabled_remote_requires_a_non_blank_endpoint() {
        let config = RemoteConfig {
            enabled: true,
            endpoint: Some("   ".to_string()),
            api_key: None,
            timeout_secs: 30,
        };
        assert!(matches!(HttpQuoteClient::from_config(&config), Err(RemoteError::NotConfigured)));

        let config = RemoteConfig {
            enabled: true,
            endpoint: Some("https://quotes.example.co.uk/compose".to_string()),
            api_key: None,
            timeout_secs: 30,
        };
        assert!(HttpQuoteClient::from_config(&config).is_ok());
    }
}
