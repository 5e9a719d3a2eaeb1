//! Source trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Exchange, MarketIndex, MarketRecord, SearchResult};

/// An upstream quote source for one exchange.
///
/// Implementations never panic or retry; any `Err` means "this source is
/// unavailable right now" and the service decides what to fall back to.
#[async_trait]
pub trait ExchangeSource: Send + Sync {
    /// The exchange every record from this source belongs to.
    fn exchange(&self) -> Exchange;

    /// Fetch and normalize a quote for one symbol.
    async fn fetch_symbol(&self, symbol: &str) -> Result<MarketRecord, MarketDataError>;

    /// Fetch and normalize the exchange's index snapshot.
    async fn fetch_indices(&self) -> Result<Vec<MarketIndex>, MarketDataError>;
}

/// A backend symbol search endpoint.
#[async_trait]
pub trait SymbolSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError>;
}
