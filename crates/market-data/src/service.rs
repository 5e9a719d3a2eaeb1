//! Indian Market Service - Facade for all Indian market data operations
//!
//! Coordinates the exchange sources, the symbol search backend, the mock
//! synthesizer and the TTL cache behind one interface. Every public read is
//! total: when the sources fail the caller gets synthesized data tagged
//! [`Provenance::Mock`](crate::models::Provenance::Mock) instead of an error.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::cache::{CacheKey, CachedPayload, TtlCache};
use crate::clock::{Clock, SystemClock};
use crate::config::{CacheTtls, MarketDataConfig};
use crate::errors::MarketDataError;
use crate::models::{
    Exchange, MarketIndex, MarketOverview, MarketRecord, MarketStatus, SearchResult,
};
use crate::session;
use crate::sources::{BseClient, ExchangeSource, HttpSymbolSearch, NseClient, SymbolSearch};
use crate::synth::{catalog, MockDataSynthesizer};

/// Length of each mover list in the overview.
const MOVERS_LIMIT: usize = 5;

/// Indian market service providing unified access to NSE and BSE data
pub struct IndianMarketService {
    nse: Arc<dyn ExchangeSource>,
    bse: Arc<dyn ExchangeSource>,
    search: Arc<dyn SymbolSearch>,
    synthesizer: MockDataSynthesizer,
    cache: Arc<TtlCache<CachedPayload>>,
    clock: Arc<dyn Clock>,
    ttls: CacheTtls,
    /// Serve synthesized data without touching any source
    offline: bool,
}

impl IndianMarketService {
    /// Assemble a service from explicit parts.
    ///
    /// The cache should read time from the same `clock` so TTLs and the
    /// session status agree.
    pub fn new(
        nse: Arc<dyn ExchangeSource>,
        bse: Arc<dyn ExchangeSource>,
        search: Arc<dyn SymbolSearch>,
        synthesizer: MockDataSynthesizer,
        cache: Arc<TtlCache<CachedPayload>>,
        clock: Arc<dyn Clock>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            nse,
            bse,
            search,
            synthesizer,
            cache,
            clock,
            ttls,
            offline: false,
        }
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Build the HTTP-backed service described by `config`.
    pub fn from_config(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        config.validate()?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let nse = NseClient::new(&config.base_url, config.request_timeout).with_clock(clock.clone());
        let bse = BseClient::new(&config.base_url, config.request_timeout).with_clock(clock.clone());
        let search = HttpSymbolSearch::new(&config.base_url, config.request_timeout);
        let synthesizer = match config.mock_seed {
            Some(seed) => MockDataSynthesizer::with_seed(seed, clock.clone()),
            None => MockDataSynthesizer::with_clock(clock.clone()),
        };
        let cache = Arc::new(TtlCache::with_clock(clock.clone(), config.ttls.quote));

        info!(
            "Indian market service configured: base_url={}, offline={}",
            config.base_url, config.offline
        );

        Ok(Self::new(
            Arc::new(nse),
            Arc::new(bse),
            Arc::new(search),
            synthesizer,
            cache,
            clock,
            config.ttls.clone(),
        )
        .with_offline(config.offline))
    }

    fn source_for(&self, exchange: Exchange) -> &Arc<dyn ExchangeSource> {
        match exchange {
            Exchange::Nse => &self.nse,
            Exchange::Bse => &self.bse,
        }
    }

    // ========================================================================
    // Quote Methods
    // ========================================================================

    /// Get a quote for `symbol`, trying the preferred exchange first.
    ///
    /// Without a preference NSE is tried first. Returns `None` only for a
    /// blank symbol; otherwise a live record or a synthesized one.
    pub async fn get_stock(
        &self,
        symbol: &str,
        preferred: Option<Exchange>,
    ) -> Option<MarketRecord> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }

        let key = CacheKey::stock(symbol, preferred);
        if let Some(CachedPayload::Record(record)) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return Some(record);
        }

        let record = self.fetch_stock_uncached(symbol, preferred).await;
        self.cache.set_with_ttl(
            key,
            CachedPayload::Record(record.clone()),
            self.ttls.quote,
        );
        Some(record)
    }

    async fn fetch_stock_uncached(&self, symbol: &str, preferred: Option<Exchange>) -> MarketRecord {
        let first = preferred.unwrap_or(Exchange::Nse);

        if !self.offline {
            for exchange in [first, first.other()] {
                debug!("Fetching {} from {}", symbol, exchange);
                match self.source_for(exchange).fetch_symbol(symbol).await {
                    Ok(record) => return record,
                    Err(e) => warn!("{} lookup failed for {}: {}", exchange, symbol, e),
                }
            }
            warn!("No live source answered for {}, synthesizing", symbol);
        }

        self.synthesizer.synthesize(symbol, first)
    }

    /// Drop every cached variant of `symbol` so the next read refetches.
    pub fn invalidate_symbol(&self, symbol: &str) {
        self.cache.invalidate_prefix(&CacheKey::stock_prefix(symbol));
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Indian market cache cleared");
    }

    /// Number of entries currently held in the cache.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    // ========================================================================
    // Index Methods
    // ========================================================================

    /// Snapshot of the major indices from both exchanges, NSE first.
    ///
    /// The two sources are queried concurrently. If neither returns any rows
    /// the synthesized index set is returned instead.
    pub async fn get_indices(&self) -> Vec<MarketIndex> {
        if let Some(CachedPayload::Indices(indices)) = self.cache.get(CacheKey::INDICES) {
            debug!("Cache hit for {}", CacheKey::INDICES);
            return indices;
        }

        let indices = self.fetch_indices_uncached().await;
        self.cache.set_with_ttl(
            CacheKey::INDICES,
            CachedPayload::Indices(indices.clone()),
            self.ttls.indices,
        );
        indices
    }

    async fn fetch_indices_uncached(&self) -> Vec<MarketIndex> {
        if self.offline {
            return self.synthesizer.synthesize_indices();
        }

        let (nse, bse) = futures::join!(self.nse.fetch_indices(), self.bse.fetch_indices());

        let mut indices = Vec::new();
        for (exchange, result) in [(Exchange::Nse, nse), (Exchange::Bse, bse)] {
            match result {
                Ok(rows) => indices.extend(rows),
                Err(e) => warn!("{} indices unavailable: {}", exchange, e),
            }
        }

        if indices.is_empty() {
            warn!("No live index data, synthesizing");
            return self.synthesizer.synthesize_indices();
        }
        indices
    }

    // ========================================================================
    // Overview & Status
    // ========================================================================

    /// Current session status, in IST.
    pub fn market_status(&self) -> MarketStatus {
        session::market_status_at(self.clock.now())
    }

    /// Indices, session status and top movers in one snapshot.
    pub async fn get_market_overview(&self) -> MarketOverview {
        if let Some(CachedPayload::Overview(overview)) = self.cache.get(CacheKey::OVERVIEW) {
            debug!("Cache hit for {}", CacheKey::OVERVIEW);
            return overview;
        }

        let indices = self.get_indices().await;
        let (gainers, losers, most_active) = self.compute_movers();
        let overview = MarketOverview {
            indices,
            status: self.market_status(),
            last_updated: self.clock.now(),
            gainers,
            losers,
            most_active,
        };

        self.cache.set_with_ttl(
            CacheKey::OVERVIEW,
            CachedPayload::Overview(overview.clone()),
            self.ttls.overview,
        );
        overview
    }

    /// Movers ranked from the live quotes currently in the cache.
    ///
    /// Any list with no qualifying records falls back to the static catalog
    /// list. Synthesized records never rank.
    fn compute_movers(&self) -> (Vec<SearchResult>, Vec<SearchResult>, Vec<SearchResult>) {
        let mut live: HashMap<(String, Exchange), MarketRecord> = HashMap::new();
        for payload in self.cache.fresh_values() {
            if let CachedPayload::Record(record) = payload {
                if !record.is_mock() {
                    live.insert((record.symbol.clone(), record.exchange), record);
                }
            }
        }
        let mut records: Vec<MarketRecord> = live.into_values().collect();
        records.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let mut gainers: Vec<&MarketRecord> = records
            .iter()
            .filter(|r| r.change_percent > Decimal::ZERO)
            .collect();
        gainers.sort_by(|a, b| b.change_percent.cmp(&a.change_percent));

        let mut losers: Vec<&MarketRecord> = records
            .iter()
            .filter(|r| r.change_percent < Decimal::ZERO)
            .collect();
        losers.sort_by(|a, b| a.change_percent.cmp(&b.change_percent));

        let mut most_active: Vec<&MarketRecord> =
            records.iter().filter(|r| r.volume.is_some()).collect();
        most_active.sort_by(|a, b| b.volume.cmp(&a.volume));

        (
            ranked_or(gainers, catalog::static_gainers),
            ranked_or(losers, catalog::static_losers),
            ranked_or(most_active, catalog::static_most_active),
        )
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Search symbols and company names.
    ///
    /// Uses the backend search when reachable; on failure (or offline) the
    /// static catalog is matched instead. A blank query returns nothing.
    pub async fn search_symbols(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let key = CacheKey::search(query);
        if let Some(CachedPayload::Search(results)) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return results;
        }

        let results = if self.offline {
            catalog::search(query)
        } else {
            match self.search.search(query).await {
                Ok(results) => results,
                Err(e) => {
                    warn!("Symbol search failed for '{}': {}, using catalog", query, e);
                    catalog::search(query)
                }
            }
        };

        self.cache.set_with_ttl(
            key,
            CachedPayload::Search(results.clone()),
            self.ttls.search,
        );
        results
    }
}

fn ranked_or(ranked: Vec<&MarketRecord>, fallback: fn() -> Vec<SearchResult>) -> Vec<SearchResult> {
    if ranked.is_empty() {
        return fallback();
    }
    ranked
        .into_iter()
        .take(MOVERS_LIMIT)
        .map(SearchResult::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::Provenance;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    type CallLog = Arc<Mutex<Vec<Exchange>>>;

    struct FakeSource {
        exchange: Exchange,
        healthy: bool,
        change_percent: Decimal,
        volume: Option<u64>,
        symbol_calls: AtomicUsize,
        index_calls: AtomicUsize,
        log: CallLog,
    }

    impl FakeSource {
        fn new(exchange: Exchange, healthy: bool, log: CallLog) -> Self {
            Self {
                exchange,
                healthy,
                change_percent: dec!(1.5),
                volume: None,
                symbol_calls: AtomicUsize::new(0),
                index_calls: AtomicUsize::new(0),
                log,
            }
        }

        fn unavailable(&self) -> MarketDataError {
            MarketDataError::HttpStatus {
                source_id: self.exchange.as_str().to_string(),
                status: 503,
            }
        }
    }

    #[async_trait]
    impl ExchangeSource for FakeSource {
        fn exchange(&self) -> Exchange {
            self.exchange
        }

        async fn fetch_symbol(&self, symbol: &str) -> Result<MarketRecord, MarketDataError> {
            self.symbol_calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(self.exchange);
            if !self.healthy {
                return Err(self.unavailable());
            }
            Ok(MarketRecord {
                symbol: symbol.to_uppercase(),
                name: format!("{} Live", symbol),
                exchange: self.exchange,
                price: dec!(101.5),
                change: dec!(1.5),
                change_percent: self.change_percent,
                previous_close: dec!(100),
                open: None,
                high: None,
                low: None,
                volume: self.volume,
                sector: None,
                industry: None,
                last_updated: Utc::now(),
                provenance: Provenance::Live,
            })
        }

        async fn fetch_indices(&self) -> Result<Vec<MarketIndex>, MarketDataError> {
            self.index_calls.fetch_add(1, Ordering::SeqCst);
            if !self.healthy {
                return Err(self.unavailable());
            }
            Ok(vec![MarketIndex {
                name: format!("{} LIVE", self.exchange),
                value: dec!(1000),
                change: dec!(10),
                change_percent: dec!(1.01),
                open: dec!(990),
                high: dec!(1005),
                low: dec!(985),
                previous_close: dec!(990),
                exchange: self.exchange,
                provenance: Provenance::Live,
            }])
        }
    }

    struct FakeSearch {
        healthy: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SymbolSearch for FakeSearch {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.healthy {
                return Err(MarketDataError::Timeout {
                    source_id: "SEARCH".to_string(),
                });
            }
            Ok(vec![SearchResult::new(
                query.to_uppercase(),
                "Backend Result",
                Exchange::Nse,
                "EQUITY",
            )])
        }
    }

    struct Harness {
        service: IndianMarketService,
        nse: Arc<FakeSource>,
        bse: Arc<FakeSource>,
        search: Arc<FakeSearch>,
        clock: Arc<ManualClock>,
        log: CallLog,
    }

    /// Wednesday 2024-06-05, 12:00 IST.
    fn midday() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 5, 6, 30, 0).unwrap()
    }

    fn harness_with(nse: FakeSource, bse: FakeSource, search_healthy: bool, log: CallLog) -> Harness {
        let clock = Arc::new(ManualClock::new(midday()));
        let nse = Arc::new(nse);
        let bse = Arc::new(bse);
        let search = Arc::new(FakeSearch {
            healthy: search_healthy,
            calls: AtomicUsize::new(0),
        });
        let ttls = CacheTtls::default();
        let cache = Arc::new(TtlCache::with_clock(clock.clone(), ttls.quote));
        let service = IndianMarketService::new(
            nse.clone(),
            bse.clone(),
            search.clone(),
            MockDataSynthesizer::with_seed(7, clock.clone()),
            cache,
            clock.clone(),
            ttls,
        );
        Harness {
            service,
            nse,
            bse,
            search,
            clock,
            log,
        }
    }

    fn harness(nse_healthy: bool, bse_healthy: bool, search_healthy: bool) -> Harness {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        harness_with(
            FakeSource::new(Exchange::Nse, nse_healthy, log.clone()),
            FakeSource::new(Exchange::Bse, bse_healthy, log.clone()),
            search_healthy,
            log,
        )
    }

    #[tokio::test]
    async fn test_falls_back_to_second_exchange() {
        let h = harness(false, true, true);

        let record = h.service.get_stock("RELIANCE", None).await.unwrap();

        assert_eq!(record.exchange, Exchange::Bse);
        assert_eq!(record.provenance, Provenance::Live);
        assert_eq!(record.price, dec!(101.5));
        assert_eq!(*h.log.lock().unwrap(), vec![Exchange::Nse, Exchange::Bse]);
    }

    #[tokio::test]
    async fn test_synthesizes_when_all_sources_fail() {
        let h = harness(false, false, true);

        let record = h.service.get_stock("RELIANCE", None).await.unwrap();

        assert!(record.is_mock());
        assert_eq!(record.symbol, "RELIANCE");
        assert_eq!(record.exchange, Exchange::Nse);
        assert!(record.price > Decimal::ZERO);
        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.bse.symbol_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_preferred_exchange_is_tried_first() {
        let h = harness(true, true, true);

        let record = h.service.get_stock("TCS", Some(Exchange::Bse)).await.unwrap();
        assert_eq!(record.exchange, Exchange::Bse);
        assert_eq!(*h.log.lock().unwrap(), vec![Exchange::Bse]);

        h.log.lock().unwrap().clear();
        let record = h.service.get_stock("TCS", Some(Exchange::Nse)).await.unwrap();
        assert_eq!(record.exchange, Exchange::Nse);
        assert_eq!(*h.log.lock().unwrap(), vec![Exchange::Nse]);

        h.log.lock().unwrap().clear();
        h.service.get_stock("INFY", None).await.unwrap();
        assert_eq!(*h.log.lock().unwrap(), vec![Exchange::Nse]);
    }

    #[tokio::test]
    async fn test_preferred_bse_falls_back_to_nse_and_mock_keeps_preference() {
        let h = harness(true, false, true);
        let record = h.service.get_stock("TCS", Some(Exchange::Bse)).await.unwrap();
        assert_eq!(record.exchange, Exchange::Nse);
        assert_eq!(*h.log.lock().unwrap(), vec![Exchange::Bse, Exchange::Nse]);

        let h = harness(false, false, true);
        let record = h.service.get_stock("TCS", Some(Exchange::Bse)).await.unwrap();
        assert!(record.is_mock());
        assert_eq!(record.exchange, Exchange::Bse);
    }

    #[tokio::test]
    async fn test_repeat_lookup_within_ttl_hits_network_once() {
        let h = harness(true, true, true);

        let first = h.service.get_stock("RELIANCE", None).await.unwrap();
        let second = h.service.get_stock(" reliance ", None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 1);

        h.clock.advance(Duration::from_millis(30_000));
        h.service.get_stock("RELIANCE", None).await.unwrap();
        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_synthesized_records_are_cached() {
        let h = harness(false, false, true);

        let first = h.service.get_stock("XYZCORP", None).await.unwrap();
        let second = h.service.get_stock("XYZCORP", None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.bse.symbol_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_preference_is_part_of_cache_key() {
        let h = harness(true, true, true);

        h.service.get_stock("TCS", None).await.unwrap();
        h.service.get_stock("TCS", Some(Exchange::Bse)).await.unwrap();

        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.bse.symbol_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_symbol_forces_refetch() {
        let h = harness(true, true, true);

        h.service.get_stock("TCS", None).await.unwrap();
        h.service.get_stock("TCS", Some(Exchange::Nse)).await.unwrap();
        h.service.invalidate_symbol("tcs");
        h.service.get_stock("TCS", None).await.unwrap();

        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_blank_symbol_returns_none_without_io() {
        let h = harness(true, true, true);

        assert!(h.service.get_stock("   ", None).await.is_none());
        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.service.cached_entries(), 0);
    }

    #[tokio::test]
    async fn test_offline_mode_never_calls_sources() {
        let h = harness(true, true, true);
        let service = h.service.with_offline(true);

        let record = service.get_stock("RELIANCE", None).await.unwrap();
        let indices = service.get_indices().await;
        let results = service.search_symbols("tcs").await;

        assert!(record.is_mock());
        assert!(indices.iter().all(|i| i.provenance == Provenance::Mock));
        assert!(results.iter().any(|r| r.symbol == "TCS"));
        assert_eq!(h.nse.symbol_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.nse.index_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_indices_merge_nse_first_and_cache() {
        let h = harness(true, true, true);

        let indices = h.service.get_indices().await;
        assert_eq!(indices.len(), 2);
        assert_eq!(indices[0].exchange, Exchange::Nse);
        assert_eq!(indices[1].exchange, Exchange::Bse);

        h.service.get_indices().await;
        assert_eq!(h.nse.index_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.bse.index_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_indices_keep_partial_live_data() {
        let h = harness(false, true, true);

        let indices = h.service.get_indices().await;

        assert_eq!(indices.len(), 1);
        assert_eq!(indices[0].exchange, Exchange::Bse);
        assert_eq!(indices[0].provenance, Provenance::Live);
    }

    #[tokio::test]
    async fn test_indices_synthesized_when_both_fail() {
        let h = harness(false, false, true);

        let indices = h.service.get_indices().await;

        assert!(!indices.is_empty());
        assert!(indices.iter().all(|i| i.provenance == Provenance::Mock));
        assert!(indices.iter().any(|i| i.name == "NIFTY 50"));
        assert!(indices.iter().any(|i| i.name == "SENSEX"));
    }

    #[tokio::test]
    async fn test_search_uses_backend_when_available() {
        let h = harness(true, true, true);

        let results = h.service.search_symbols("reli").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Backend Result");

        h.service.search_symbols(" RELI ").await;
        assert_eq!(h.search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_falls_back_to_catalog() {
        let h = harness(true, true, false);

        let results = h.service.search_symbols("TCS").await;
        assert!(results.iter().any(|r| r.symbol == "TCS"));

        let results = h.service.search_symbols("zzzz-no-match").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_returns_empty_without_io() {
        let h = harness(true, true, true);

        assert!(h.service.search_symbols("  ").await.is_empty());
        assert_eq!(h.search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_market_status_follows_clock() {
        let h = harness(true, true, true);
        assert_eq!(h.service.market_status(), MarketStatus::Open);

        // 09:14 IST
        h.clock.set(Utc.with_ymd_and_hms(2024, 6, 5, 3, 44, 0).unwrap());
        assert_eq!(h.service.market_status(), MarketStatus::PreOpen);

        // Saturday midday
        h.clock.set(Utc.with_ymd_and_hms(2024, 6, 8, 6, 30, 0).unwrap());
        assert_eq!(h.service.market_status(), MarketStatus::Closed);
    }

    #[tokio::test]
    async fn test_overview_uses_static_movers_without_live_quotes() {
        let h = harness(false, false, true);
        h.service.get_stock("RELIANCE", None).await.unwrap();

        let overview = h.service.get_market_overview().await;

        assert_eq!(overview.status, MarketStatus::Open);
        assert_eq!(overview.gainers, catalog::static_gainers());
        assert_eq!(overview.losers, catalog::static_losers());
        assert_eq!(overview.most_active, catalog::static_most_active());
        assert!(!overview.indices.is_empty());
    }

    #[tokio::test]
    async fn test_overview_ranks_live_cached_quotes() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let mut nse = FakeSource::new(Exchange::Nse, true, log.clone());
        nse.volume = Some(5_000_000);
        let h = harness_with(nse, FakeSource::new(Exchange::Bse, true, log.clone()), true, log);

        h.service.get_stock("TCS", None).await.unwrap();
        h.service.get_stock("TCS", Some(Exchange::Nse)).await.unwrap();
        h.service.get_stock("INFY", None).await.unwrap();

        let overview = h.service.get_market_overview().await;

        let gainers: Vec<&str> = overview.gainers.iter().map(|g| g.symbol.as_str()).collect();
        assert_eq!(gainers, vec!["INFY", "TCS"]);
        assert_eq!(overview.most_active.len(), 2);
        // No live decliners, so the static list stands in.
        assert_eq!(overview.losers, catalog::static_losers());
    }

    #[tokio::test]
    async fn test_overview_is_cached_until_ttl() {
        let h = harness(true, true, true);

        let first = h.service.get_market_overview().await;
        h.clock.advance(Duration::from_secs(10));
        let second = h.service.get_market_overview().await;
        assert_eq!(first, second);

        h.clock.advance(Duration::from_secs(20));
        let third = h.service.get_market_overview().await;
        assert!(third.last_updated > first.last_updated);
    }

    #[tokio::test]
    async fn test_clear_cache_empties_everything() {
        let h = harness(true, true, true);
        h.service.get_stock("TCS", None).await.unwrap();
        h.service.get_indices().await;

        h.service.clear_cache();

        assert_eq!(h.service.cached_entries(), 0);
    }

    async fn service_over_nse_payload(payload: serde_json::Value) -> (IndianMarketService, wiremock::MockServer) {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stocks/nse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let clock = Arc::new(ManualClock::new(midday()));
        let ttls = CacheTtls::default();
        let service = IndianMarketService::new(
            Arc::new(NseClient::new(server.uri(), Duration::from_secs(5))),
            Arc::new(FakeSource::new(Exchange::Bse, false, log)),
            Arc::new(FakeSearch {
                healthy: true,
                calls: AtomicUsize::new(0),
            }),
            MockDataSynthesizer::with_seed(7, clock.clone()),
            Arc::new(TtlCache::with_clock(clock.clone(), ttls.quote)),
            clock,
            ttls,
        );
        (service, server)
    }

    #[tokio::test]
    async fn test_tiny_previous_close_from_upstream_returns_live_record() {
        let (service, _server) = service_over_nse_payload(serde_json::json!({
            "lastPrice": "1000",
            "previousClose": "0.000000000000000000000001"
        }))
        .await;

        let record = service.get_stock("TINY", None).await.unwrap();

        assert_eq!(record.provenance, Provenance::Live);
        assert_eq!(record.change_percent, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_out_of_range_upstream_prices_fall_back_to_mock() {
        let (service, _server) = service_over_nse_payload(serde_json::json!({
            "lastPrice": "79228162514264337593543950335",
            "change": "-1"
        }))
        .await;

        let record = service.get_stock("HUGE", None).await.unwrap();

        assert!(record.is_mock());
        assert!(record.price > Decimal::ZERO);
    }
}
