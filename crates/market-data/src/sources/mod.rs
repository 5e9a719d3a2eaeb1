//! Upstream market data sources.
//!
//! This module contains:
//! - The `ExchangeSource` and `SymbolSearch` traits the service talks to
//! - HTTP clients for the NSE and BSE routes and the search route
//! - Shared HTTP plumbing and lenient payload deserializers
//!
//! Each client maps its upstream's JSON shape onto the shared models and
//! tags everything it produces as live data from its own exchange. Fields an
//! upstream does not provide stay `None`; nothing is guessed.

pub mod bse;
pub mod de;
pub mod http;
pub mod nse;
pub mod search;
mod traits;

use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::percent_change;

pub use bse::BseClient;
pub use nse::NseClient;
pub use search::HttpSymbolSearch;
pub use traits::{ExchangeSource, SymbolSearch};

/// Fill in whichever of change / percent / previous close the upstream
/// omitted, using the ones it did send.
///
/// Returns `(change, change_percent, previous_close)`, or `None` when the
/// upstream numbers are too extreme to derive the missing ones.
pub(crate) fn reconcile_prices(
    price: Decimal,
    change: Option<Decimal>,
    change_percent: Option<Decimal>,
    previous_close: Option<Decimal>,
) -> Option<(Decimal, Decimal, Decimal)> {
    let previous_close = match (previous_close, change) {
        (Some(prev), _) => prev,
        (None, Some(c)) => price.checked_sub(c)?,
        (None, None) => price,
    };
    let change = match change {
        Some(c) => c,
        None => price.checked_sub(previous_close)?,
    };
    let change_percent = change_percent.unwrap_or_else(|| percent_change(change, previous_close));
    Some((change, change_percent, previous_close))
}

/// Error for a quote whose price fields cannot be reconciled.
pub(crate) fn unreconcilable(source_id: &str, symbol: &str) -> MarketDataError {
    MarketDataError::Parse {
        source_id: source_id.to_string(),
        message: format!("Price fields out of range for {}", symbol),
    }
}
