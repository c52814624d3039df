//! Indicators document served over HTTP.

use super::{DataSourceError, LedgerSource};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Fetches the document with a single GET. No retry: the document is
/// fetched once at startup and a failure blocks initialization.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl LedgerSource for HttpSource {
    async fn fetch_document(&self) -> Result<serde_json::Value, DataSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DataSourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
            });
        }
        debug!(url = %self.url, "Fetched indicators document");

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DataSourceError::ParseError(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
