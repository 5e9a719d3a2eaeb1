//! BSE route client.
//!
//! # Routes
//!
//! - Quote by scrip code: `GET {base}/api/stocks/bse?code={NNNNNN}`
//! - Quote by symbol: `GET {base}/api/stocks/bse?symbol={SYMBOL}`
//! - Indices: `GET {base}/api/stocks/bse?type=indices`
//!
//! An all-digit input is treated as a scrip code.

pub mod models;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::clock::{Clock, SystemClock};
use crate::errors::MarketDataError;
use crate::models::{Exchange, MarketIndex, MarketRecord, Provenance};
use crate::sources::de::parse_exchange_time;
use crate::sources::http::{build_client, endpoint, get_json};
use crate::sources::{reconcile_prices, unreconcilable, ExchangeSource};

use models::{BseIndexRow, BseIndicesResponse, BseQuoteResponse};

const SOURCE_ID: &str = "BSE";
const ROUTE: &str = "/api/stocks/bse";

/// True if `symbol` looks like a BSE scrip code.
pub fn is_scrip_code(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_digit())
}

/// Client for the BSE quote and indices routes.
pub struct BseClient {
    client: Client,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl BseClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: base_url.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for records whose payload carries no timestamp.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn quote_url(&self, symbol: &str) -> String {
        let param = if is_scrip_code(symbol) { "code" } else { "symbol" };
        format!(
            "{}?{}={}",
            endpoint(&self.base_url, ROUTE),
            param,
            urlencoding::encode(symbol)
        )
    }

    fn indices_url(&self) -> String {
        format!("{}?type=indices", endpoint(&self.base_url, ROUTE))
    }

    fn normalize_quote(
        &self,
        requested: &str,
        resp: BseQuoteResponse,
    ) -> Result<MarketRecord, MarketDataError> {
        let price = resp.current_value.ok_or_else(|| MarketDataError::NoData {
            source_id: SOURCE_ID.to_string(),
            symbol: requested.to_string(),
        })?;

        let (change, change_percent, previous_close) =
            reconcile_prices(price, resp.change, resp.p_change, resp.previous_close)
                .ok_or_else(|| unreconcilable(SOURCE_ID, requested))?;

        // Prefer the trading symbol; fall back to the scrip code the caller used.
        let symbol = resp
            .symbol
            .or(resp.scrip_code)
            .unwrap_or_else(|| requested.to_uppercase());
        let name = resp.company_name.unwrap_or_else(|| symbol.clone());

        let last_updated = resp
            .updated_on
            .and_then(|raw| parse_exchange_time(&raw))
            .unwrap_or_else(|| self.clock.now());

        Ok(MarketRecord {
            symbol,
            name,
            exchange: Exchange::Bse,
            price,
            change,
            change_percent,
            previous_close,
            open: resp.open,
            high: resp.high,
            low: resp.low,
            volume: None,
            sector: resp.sector,
            industry: resp.industry,
            last_updated,
            provenance: Provenance::Live,
        })
    }

    fn normalize_index(row: BseIndexRow) -> Option<MarketIndex> {
        let value = row.current_value?;
        let (change, change_percent, previous_close) =
            reconcile_prices(value, row.change, row.percent_change, row.previous_close)?;

        Some(MarketIndex {
            name: row.name,
            value,
            change,
            change_percent,
            open: row.open.unwrap_or(previous_close),
            high: row.high.unwrap_or(value),
            low: row.low.unwrap_or(value),
            previous_close,
            exchange: Exchange::Bse,
            provenance: Provenance::Live,
        })
    }
}

#[async_trait]
impl ExchangeSource for BseClient {
    fn exchange(&self) -> Exchange {
        Exchange::Bse
    }

    async fn fetch_symbol(&self, symbol: &str) -> Result<MarketRecord, MarketDataError> {
        let resp: BseQuoteResponse =
            get_json(&self.client, &self.quote_url(symbol.trim()), SOURCE_ID).await?;
        self.normalize_quote(symbol.trim(), resp)
    }

    async fn fetch_indices(&self) -> Result<Vec<MarketIndex>, MarketDataError> {
        let resp: BseIndicesResponse =
            get_json(&self.client, &self.indices_url(), SOURCE_ID).await?;
        Ok(resp
            .indices
            .into_iter()
            .filter_map(Self::normalize_index)
            .collect())
    }
}
