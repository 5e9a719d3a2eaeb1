use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::index::MarketIndex;
use super::search::SearchResult;

/// Trading session state, derived purely from the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    Open,
    PreOpen,
    AfterHours,
    Closed,
}

impl MarketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketStatus::Open => "OPEN",
            MarketStatus::PreOpen => "PRE_OPEN",
            MarketStatus::AfterHours => "AFTER_HOURS",
            MarketStatus::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate market snapshot for dashboard views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub indices: Vec<MarketIndex>,
    pub status: MarketStatus,
    pub last_updated: DateTime<Utc>,
    pub gainers: Vec<SearchResult>,
    pub losers: Vec<SearchResult>,
    pub most_active: Vec<SearchResult>,
}
