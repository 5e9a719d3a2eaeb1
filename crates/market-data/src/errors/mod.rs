//! Error types for the market data crate.
//!
//! Source clients report failures through [`MarketDataError`]. The service
//! facade treats every variant as "source unavailable" and degrades to the
//! next source or to synthesized data, so these errors are never surfaced to
//! facade callers. They exist so that the fallback decision is made on
//! explicit values and so that logs can say what actually went wrong.

use thiserror::Error;

/// Errors that can occur while talking to an upstream market data source.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request did not complete within the client timeout.
    #[error("Timeout: {source_id}")]
    Timeout {
        /// The source that timed out
        source_id: String,
    },

    /// The source answered with a non-2xx status code.
    #[error("HTTP {status} from {source_id}")]
    HttpStatus {
        /// The source that returned the status
        source_id: String,
        /// The HTTP status code
        status: u16,
    },

    /// A transport-level failure (connection refused, DNS, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded or had an unexpected shape.
    #[error("Parse error: {source_id} - {message}")]
    Parse {
        /// The source that returned the malformed payload
        source_id: String,
        /// What was wrong with it
        message: String,
    },

    /// The source answered but had nothing for the requested symbol.
    #[error("No data for {symbol} from {source_id}")]
    NoData {
        /// The source that had no data
        source_id: String,
        /// The requested symbol or query
        symbol: String,
    },

    /// A configuration value could not be used (bad base URL, client build failure).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MarketDataError {
    /// Returns true if the failure was caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Network(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The source identifier attached to the error, if any.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::Timeout { source_id }
            | Self::HttpStatus { source_id, .. }
            | Self::Parse { source_id, .. }
            | Self::NoData { source_id, .. } => Some(source_id),
            Self::Network(_) | Self::InvalidConfig(_) => None,
        }
    }
}
