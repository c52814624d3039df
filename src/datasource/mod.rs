//! Data source abstraction for fetching the indicators document.

use async_trait::async_trait;
use std::fmt;

pub mod file;
pub mod http;
pub mod mock;

pub use file::FileSource;
pub use http::HttpSource;
pub use mock::MockSource;

/// Source of the raw indicators document (segments, products, cascades).
///
/// Fetching is the only asynchronous step of the simulator: it happens once
/// at startup and is never retried, since a malformed or missing document does
/// not become valid on a second attempt.
#[async_trait]
pub trait LedgerSource: Send + Sync + fmt::Debug {
    /// Fetch the document as untyped JSON.
    ///
    /// # Returns
    /// The top-level JSON value, keyed by segment name plus `"Total"`.
    async fn fetch_document(&self) -> Result<serde_json::Value, DataSourceError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (e.g., connection refused, DNS failure)
    NetworkError(String),
    /// Non-success HTTP status
    HttpError { status: u16, message: String },
    /// Local file could not be read
    Io(String),
    /// Body is not valid JSON
    ParseError(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::Io(msg) => write!(f, "IO error: {}", msg),
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_error_display() {
        let err = DataSourceError::NetworkError("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = DataSourceError::HttpError {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");

        let err = DataSourceError::Io("no such file".to_string());
        assert_eq!(err.to_string(), "IO error: no such file");

        let err = DataSourceError::ParseError("expected value".to_string());
        assert_eq!(err.to_string(), "Parse error: expected value");
    }
}
