use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::exchange::Exchange;
use super::record::Provenance;

/// A composite market indicator such as NIFTY 50 or SENSEX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub name: String,
    pub value: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub previous_close: Decimal,
    pub exchange: Exchange,
    pub provenance: Provenance,
}
