//! Error types for the fallible helpers behind the extraction pipeline.
//!
//! `Extractor::extract` never fails; these errors surface only from the
//! building blocks so that their failure paths stay testable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The page URL parsed but carries no host (e.g. `mailto:` or `file:`).
    #[error("URL '{0}' has no host")]
    MissingHost(String),

    /// An embedded JSON-LD block was not valid JSON.
    #[error("malformed structured data: {0}")]
    StructuredData(#[from] serde_json::Error),
}
