//! Indian Market Data Crate
//!
//! This crate provides stock quotes, index snapshots, symbol search and
//! session status for the National Stock Exchange (NSE) and the Bombay Stock
//! Exchange (BSE).
//!
//! # Overview
//!
//! The market data crate supports:
//! - Per-exchange HTTP sources with a shared normalized record shape
//! - Exchange fallback (preferred exchange, then the other one)
//! - Synthesized stand-in data when every source is down
//! - A TTL cache shared by all read operations
//! - IST session status (open, pre-open, after-hours, closed)
//!
//! # Architecture
//!
//! ```text
//! +------------------------+
//! |  IndianMarketService   |  (facade: fallback + caching)
//! +------------------------+
//!      |            |
//!      v            v
//! +----------+  +------------------+
//! | TtlCache |  |  ExchangeSource  |  (NseClient, BseClient)
//! +----------+  +------------------+
//!                   |  on failure
//!                   v
//!          +---------------------+
//!          | MockDataSynthesizer |  (Provenance::Mock)
//!          +---------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketRecord`] - Normalized quote for one symbol on one exchange
//! - [`MarketIndex`] - Composite index value such as NIFTY 50
//! - [`MarketOverview`] - Indices, session status and top movers
//! - [`SearchResult`] - Symbol search hit
//! - [`Provenance`] - Whether numbers are live or synthesized

pub mod cache;
pub mod clock;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod session;
pub mod sources;
pub mod synth;

pub use cache::{CacheKey, CachedPayload, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheTtls, MarketDataConfig};
pub use errors::MarketDataError;
pub use models::{
    Exchange, MarketIndex, MarketOverview, MarketRecord, MarketStatus, Provenance, SearchResult,
};
pub use service::IndianMarketService;
pub use session::market_status_at;
pub use sources::{BseClient, ExchangeSource, HttpSymbolSearch, NseClient, SymbolSearch};
pub use synth::MockDataSynthesizer;
