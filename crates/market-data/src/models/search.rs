//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

use super::exchange::Exchange;
use super::record::MarketRecord;

/// Lightweight symbol metadata used for search and autocomplete.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Symbol (e.g., "INFY")
    pub symbol: String,

    /// Display name (e.g., "Infosys Limited")
    pub name: String,

    pub exchange: Exchange,

    /// Instrument type (e.g., "EQUITY", "INDEX")
    pub instrument_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl SearchResult {
    /// Create a new search result with required fields.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: Exchange,
        instrument_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange,
            instrument_type: instrument_type.into(),
            industry: None,
        }
    }

    /// Set the industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }
}

impl From<&MarketRecord> for SearchResult {
    fn from(record: &MarketRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            exchange: record.exchange,
            instrument_type: "EQUITY".to_string(),
            industry: record.industry.clone(),
        }
    }
}
