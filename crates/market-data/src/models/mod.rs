//! Market data models
//!
//! This module contains the core data types shared by the sources, the
//! synthesizer and the service facade:
//! - `exchange` - The two supported exchanges (NSE, BSE)
//! - `record` - Normalized per-symbol quote (MarketRecord) and its Provenance
//! - `index` - Composite index snapshot (MarketIndex)
//! - `search` - Symbol search metadata (SearchResult)
//! - `overview` - Market session status and aggregate snapshot (MarketOverview)

mod exchange;
mod index;
mod overview;
mod record;
mod search;

pub use exchange::Exchange;
pub use index::MarketIndex;
pub use overview::{MarketOverview, MarketStatus};
pub use record::{percent_change, MarketRecord, Provenance};
pub use search::SearchResult;
