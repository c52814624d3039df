//! Indicators document read from the local filesystem.

use super::{DataSourceError, LedgerSource};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Reads the document produced by the data-preparation job from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LedgerSource for FileSource {
    async fn fetch_document(&self) -> Result<serde_json::Value, DataSourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DataSourceError::Io(format!("{}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read indicators document");

        serde_json::from_slice(&bytes).map_err(|e| DataSourceError::ParseError(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
