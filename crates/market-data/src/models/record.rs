use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::exchange::Exchange;

/// Where a record's numbers came from.
///
/// `Mock` marks data produced by the synthesizer; callers must not make any
/// correctness assumptions about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Mock,
}

/// Normalized quote for one symbol on one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    /// Trading symbol (e.g., "RELIANCE") or BSE scrip code
    pub symbol: String,

    /// Display name (e.g., "Reliance Industries Limited")
    pub name: String,

    /// Exchange that produced this record
    pub exchange: Exchange,

    /// Last traded price
    pub price: Decimal,

    /// Absolute change from previous close
    pub change: Decimal,

    /// Percent change from previous close
    pub change_percent: Decimal,

    pub previous_close: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    /// Traded volume. BSE does not report it, so it stays `None` there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    pub last_updated: DateTime<Utc>,

    pub provenance: Provenance,
}

/// Percent change relative to the previous close, rounded to 2 dp.
///
/// Returns zero when the previous close is zero or the ratio does not fit.
pub fn percent_change(change: Decimal, previous_close: Decimal) -> Decimal {
    change
        .checked_div(previous_close)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(2))
        .unwrap_or_default()
}

impl MarketRecord {
    pub fn is_mock(&self) -> bool {
        self.provenance == Provenance::Mock
    }
}
