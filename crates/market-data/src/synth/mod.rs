//! Mock data synthesizer.
//!
//! Produces plausible stand-in records when no live source answers, so
//! callers always have something to render. Everything produced here is
//! tagged [`Provenance::Mock`].

pub mod catalog;

use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::clock::{Clock, SystemClock};
use crate::models::{percent_change, Exchange, MarketIndex, MarketRecord, Provenance};

/// Price range for symbols not in the catalog.
const BASE_PRICE_RANGE: std::ops::Range<f64> = 100.0..3100.0;
/// Absolute change range in INR.
const CHANGE_RANGE: std::ops::Range<f64> = -50.0..50.0;
/// Catalog prices are jittered by up to this fraction.
const REFERENCE_JITTER: f64 = 0.05;
const VOLUME_RANGE: std::ops::Range<u64> = 100_000..10_000_000;

const GENERIC_SECTOR: &str = "Diversified";

/// (name, exchange, previous close, value)
const MOCK_INDICES: &[(&str, Exchange, f64, f64)] = &[
    ("NIFTY 50", Exchange::Nse, 22_055.70, 22_147.00),
    ("NIFTY BANK", Exchange::Nse, 47_624.25, 47_485.10),
    ("NIFTY IT", Exchange::Nse, 35_120.40, 35_388.55),
    ("SENSEX", Exchange::Bse, 72_831.94, 73_095.22),
    ("BSE 100", Exchange::Bse, 23_112.36, 23_180.47),
];

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(2)
}

/// Randomized generator for stand-in market data.
pub struct MockDataSynthesizer {
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl MockDataSynthesizer {
    /// Entropy-seeded synthesizer on the system clock.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), Arc::new(SystemClock))
    }

    /// Deterministic synthesizer, for tests and reproducible demos.
    pub fn with_seed(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), clock)
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(StdRng::from_entropy(), clock)
    }

    fn with_rng(rng: StdRng, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock,
        }
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Synthesize a quote for `symbol` as if it came from `exchange`.
    ///
    /// Percent change is derived from the change and previous close, never
    /// drawn independently, so the three numbers always agree.
    pub fn synthesize(&self, symbol: &str, exchange: Exchange) -> MarketRecord {
        let symbol = symbol.trim().to_uppercase();
        let entry = catalog::lookup(&symbol);
        let mut rng = self.lock_rng();

        let base = match entry {
            Some(e) => {
                e.reference_price * (1.0 + rng.gen_range(-REFERENCE_JITTER..REFERENCE_JITTER))
            }
            None => rng.gen_range(BASE_PRICE_RANGE),
        };
        let change = rng.gen_range(CHANGE_RANGE);
        let price = base + change;
        let open = base * (1.0 + rng.gen_range(-0.01..0.01));
        let high = open.max(price) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(price) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = match exchange {
            Exchange::Nse => Some(rng.gen_range(VOLUME_RANGE)),
            Exchange::Bse => None,
        };
        drop(rng);

        let previous_close = to_decimal(base);
        let price = to_decimal(price);
        let change = price - previous_close;

        let (name, sector, industry) = match entry {
            Some(e) => (
                e.name.to_string(),
                e.sector.to_string(),
                Some(e.industry.to_string()),
            ),
            None => (format!("{} Limited", symbol), GENERIC_SECTOR.to_string(), None),
        };

        MarketRecord {
            symbol,
            name,
            exchange,
            price,
            change,
            change_percent: percent_change(change, previous_close),
            previous_close,
            open: Some(to_decimal(open)),
            high: Some(to_decimal(high)),
            low: Some(to_decimal(low)),
            volume,
            sector: Some(sector),
            industry,
            last_updated: self.clock.now(),
            provenance: Provenance::Mock,
        }
    }

    /// Fixed set of representative indices for both exchanges.
    pub fn synthesize_indices(&self) -> Vec<MarketIndex> {
        MOCK_INDICES
            .iter()
            .map(|&(name, exchange, previous_close, value)| {
                let previous_close = to_decimal(previous_close);
                let value = to_decimal(value);
                let change = value - previous_close;
                let open = previous_close;
                MarketIndex {
                    name: name.to_string(),
                    value,
                    change,
                    change_percent: percent_change(change, previous_close),
                    open,
                    high: value.max(open),
                    low: value.min(open),
                    previous_close,
                    exchange,
                    provenance: Provenance::Mock,
                }
            })
            .collect()
    }
}

impl Default for MockDataSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
