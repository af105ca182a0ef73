//! Transport to the LUIS prediction API.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AnalyzeError;
use crate::luis::types::AnalysisResult;

/// Issues one prediction request and decodes the JSON response.
///
/// The analyzer owns URI construction; implementations only fetch.
#[async_trait]
pub trait NluClient: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<AnalysisResult, AnalyzeError>;
}

/// reqwest-backed client.
#[derive(Debug, Clone, Default)]
pub struct HttpNluClient {
    client: reqwest::Client,
}

impl HttpNluClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, AnalyzeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NluClient for HttpNluClient {
    async fn fetch(&self, uri: &str) -> Result<AnalysisResult, AnalyzeError> {
        let resp = self
            .client
            .get(uri)
            .send()
            .await
            // reqwest errors carry the URL, which carries the key.
            .map_err(|e| AnalyzeError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AnalyzeError::Transport(e.without_url().to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| AnalyzeError::Parse(e.to_string()))
    }
}
