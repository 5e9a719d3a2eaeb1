//! Cache key derivation and the values the service stores.

use crate::models::{Exchange, MarketIndex, MarketOverview, MarketRecord, SearchResult};

/// Builds deterministic keys of the form `operation:param:param`.
///
/// Parameters are normalized so that requests differing only in case or
/// surrounding whitespace share an entry.
pub struct CacheKey;

impl CacheKey {
    pub const INDICES: &'static str = "indices";
    pub const OVERVIEW: &'static str = "overview";

    /// Key for a single-symbol lookup, scoped by the requested preference.
    pub fn stock(symbol: &str, preferred: Option<Exchange>) -> String {
        let preference = preferred.map(|e| e.as_str()).unwrap_or("AUTO");
        format!("stock:{}:{}", symbol.trim().to_uppercase(), preference)
    }

    /// Prefix shared by every preference variant of a symbol's key.
    pub fn stock_prefix(symbol: &str) -> String {
        format!("stock:{}:", symbol.trim().to_uppercase())
    }

    pub fn search(query: &str) -> String {
        format!("search:{}", query.trim().to_lowercase())
    }
}

/// Value type held by the service's cache.
#[derive(Debug, Clone)]
pub enum CachedPayload {
    Record(MarketRecord),
    Indices(Vec<MarketIndex>),
    Search(Vec<SearchResult>),
    Overview(MarketOverview),
}
