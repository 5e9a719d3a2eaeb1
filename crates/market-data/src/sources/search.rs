//! Backend symbol search client.
//!
//! `GET {base}/api/stocks/indian-search?q={QUERY}` returning
//! `{"results": [{"symbol", "name", "exchange", "type", "industry"}]}`.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Exchange, SearchResult};
use crate::sources::http::{build_client, endpoint, get_json};
use crate::sources::SymbolSearch;

const SOURCE_ID: &str = "SEARCH";
const ROUTE: &str = "/api/stocks/indian-search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchRow>,
}

#[derive(Debug, Deserialize)]
struct SearchRow {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
    #[serde(default, rename = "type")]
    instrument_type: Option<String>,
    #[serde(default)]
    industry: Option<String>,
}

impl SearchRow {
    /// Rows naming an exchange other than NSE/BSE are dropped.
    fn into_result(self) -> Option<SearchResult> {
        let exchange = match self.exchange.as_deref() {
            Some(raw) => match raw.parse::<Exchange>() {
                Ok(exchange) => exchange,
                Err(e) => {
                    debug!("Skipping search row {}: {}", self.symbol, e);
                    return None;
                }
            },
            None => Exchange::Nse,
        };

        Some(SearchResult {
            name: self.name.unwrap_or_else(|| self.symbol.clone()),
            symbol: self.symbol,
            exchange,
            instrument_type: self
                .instrument_type
                .map(|t| t.to_uppercase())
                .unwrap_or_else(|| "EQUITY".to_string()),
            industry: self.industry,
        })
    }
}

/// Client for the backend search route.
pub struct HttpSymbolSearch {
    client: Client,
    base_url: String,
}

impl HttpSymbolSearch {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}",
            endpoint(&self.base_url, ROUTE),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl SymbolSearch for HttpSymbolSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let resp: SearchResponse =
            get_json(&self.client, &self.search_url(query.trim()), SOURCE_ID).await?;
        Ok(resp
            .results
            .into_iter()
            .filter_map(SearchRow::into_result)
            .collect())
    }
}
