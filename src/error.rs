//! Error types for the bibliographic data source.
//!
//! The analysis core itself is infallible by design: degenerate graphs
//! resolve to default values rather than errors. Only fetching and
//! parsing article data can fail.

use thiserror::Error;

/// Errors raised while fetching or parsing article records.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Network/HTTP request error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// PubMed E-utilities returned an unusable response
    #[error("PubMed API error: {0}")]
    Api(String),

    /// efetch XML payload could not be parsed
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for data-source operations.
pub type Result<T> = std::result::Result<T, DataSourceError>;
