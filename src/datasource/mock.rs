//! Mock data source for testing without file or network access.

use super::{DataSourceError, LedgerSource};
use async_trait::async_trait;
use serde_json::Value;

/// Mock source that returns a predefined document, or a predefined error.
#[derive(Debug, Clone)]
pub struct MockSource {
    document: Value,
    error: Option<DataSourceError>,
}

impl MockSource {
    /// Create a mock returning an empty JSON object.
    pub fn new() -> Self {
        Self {
            document: Value::Object(Default::default()),
            error: None,
        }
    }

    /// Set the document returned by fetch_document.
    pub fn with_document(mut self, document: Value) -> Self {
        self.document = document;
        self
    }

    /// Make fetch_document fail with `error`.
    pub fn with_error(mut self, error: DataSourceError) -> Self {
        self.error = Some(error);
        self
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerSource for MockSource {
    async fn fetch_document(&self) -> Result<Value, DataSourceError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.document.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
