//! In-memory caching for market data lookups
//!
//! - `ttl_cache` - Generic key/value store with per-entry TTL and lazy eviction
//! - `keys` - Deterministic cache keys and the payload type stored by the service

pub mod keys;
pub mod ttl_cache;

pub use keys::{CacheKey, CachedPayload};
pub use ttl_cache::{TtlCache, DEFAULT_TTL};
