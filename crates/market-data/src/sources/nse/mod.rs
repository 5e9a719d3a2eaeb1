//! NSE route client.
//!
//! # Routes
//!
//! - Quote: `GET {base}/api/stocks/nse?symbol={SYMBOL}`
//! - Indices: `GET {base}/api/stocks/nse?type=indices`

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

use models::{NseIndexRow, NseIndicesResponse, NseQuoteResponse};

const SOURCE_ID: &str = "NSE";
const ROUTE: &str = "/api/stocks/nse";

/// Client for the NSE quote and indices routes.
pub struct NseClient {
    client: Client,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl NseClient {
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
        format!(
            "{}?symbol={}",
            endpoint(&self.base_url, ROUTE),
            urlencoding::encode(symbol)
        )
    }

    fn indices_url(&self) -> String {
        format!("{}?type=indices", endpoint(&self.base_url, ROUTE))
    }

    /// Map either payload shape onto a [`MarketRecord`].
    fn normalize_quote(
        &self,
        requested: &str,
        resp: NseQuoteResponse,
    ) -> Result<MarketRecord, MarketDataError> {
        let price_info = resp.price_info.unwrap_or_default();
        let info = resp.info.unwrap_or_default();
        let metadata = resp.metadata.unwrap_or_default();
        let industry_info = resp.industry_info.unwrap_or_default();
        let high_low = price_info.intra_day_high_low.unwrap_or_default();

        let price = price_info
            .last_price
            .or(resp.last_price)
            .ok_or_else(|| MarketDataError::NoData {
                source_id: SOURCE_ID.to_string(),
                symbol: requested.to_string(),
            })?;

        let (change, change_percent, previous_close) = reconcile_prices(
            price,
            price_info.change.or(resp.change),
            price_info.p_change.or(resp.p_change),
            price_info.previous_close.or(resp.previous_close),
        )
        .ok_or_else(|| unreconcilable(SOURCE_ID, requested))?;

        let symbol = info
            .symbol
            .or(resp.symbol)
            .unwrap_or_else(|| requested.to_uppercase());
        let name = info
            .company_name
            .or(resp.company_name)
            .unwrap_or_else(|| symbol.clone());

        let last_updated = metadata
            .last_update_time
            .or(resp.last_update_time)
            .and_then(|raw| parse_exchange_time(&raw))
            .unwrap_or_else(|| self.clock.now());

        Ok(MarketRecord {
            symbol,
            name,
            exchange: Exchange::Nse,
            price,
            change,
            change_percent,
            previous_close,
            open: price_info.open.or(resp.open),
            high: high_low.max.or(resp.day_high),
            low: high_low.min.or(resp.day_low),
            volume: resp
                .pre_open_market
                .and_then(|p| p.total_traded_volume)
                .or(resp.total_traded_volume),
            sector: industry_info.sector.or(resp.sector),
            industry: industry_info
                .industry
                .or(info.industry)
                .or(metadata.industry)
                .or(resp.industry),
            last_updated,
            provenance: Provenance::Live,
        })
    }

    fn normalize_index(row: NseIndexRow) -> Option<MarketIndex> {
        let value = row.last?;
        let (change, change_percent, previous_close) =
            reconcile_prices(value, row.variation, row.percent_change, row.previous_close)?;

        Some(MarketIndex {
            name: row.index,
            value,
            change,
            change_percent,
            open: row.open.unwrap_or(previous_close),
            high: row.high.unwrap_or(value),
            low: row.low.unwrap_or(value),
            previous_close,
            exchange: Exchange::Nse,
            provenance: Provenance::Live,
        })
    }
}

#[async_trait]
impl ExchangeSource for NseClient {
    fn exchange(&self) -> Exchange {
        Exchange::Nse
    }

    async fn fetch_symbol(&self, symbol: &str) -> Result<MarketRecord, MarketDataError> {
        let resp: NseQuoteResponse =
            get_json(&self.client, &self.quote_url(symbol.trim()), SOURCE_ID).await?;
        self.normalize_quote(symbol.trim(), resp)
    }

    async fn fetch_indices(&self) -> Result<Vec<MarketIndex>, MarketDataError> {
        let resp: NseIndicesResponse =
            get_json(&self.client, &self.indices_url(), SOURCE_ID).await?;
        Ok(resp
            .data
            .into_iter()
            .filter_map(Self::normalize_index)
            .collect())
    }
}
