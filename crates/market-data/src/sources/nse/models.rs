//! NSE route payloads.
//!
//! The quote route forwards NSE's nested `quote-equity` document
//! (`info` / `metadata` / `priceInfo` / `industryInfo`), but some deployments
//! flatten it. Both shapes deserialize into [`NseQuoteResponse`]; nested
//! values take precedence during normalization.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::sources::de::{flexible_decimal, flexible_u64};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NseQuoteResponse {
    #[serde(default)]
    pub info: Option<NseInfo>,
    #[serde(default)]
    pub metadata: Option<NseMetadata>,
    #[serde(default)]
    pub price_info: Option<NsePriceInfo>,
    #[serde(default)]
    pub industry_info: Option<NseIndustryInfo>,
    #[serde(default)]
    pub pre_open_market: Option<NsePreOpenMarket>,

    // Flat shape
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub last_price: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub p_change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub previous_close: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub open: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub day_high: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub day_low: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_u64")]
    pub total_traded_volume: Option<u64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub last_update_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NseInfo {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NseMetadata {
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub last_update_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsePriceInfo {
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub last_price: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub p_change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub previous_close: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub intra_day_high_low: Option<NseHighLow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NseHighLow {
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub min: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub max: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NseIndustryInfo {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub basic_industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsePreOpenMarket {
    #[serde(default, deserialize_with = "flexible_u64")]
    pub total_traded_volume: Option<u64>,
}

/// `GET /api/stocks/nse?type=indices`
#[derive(Debug, Deserialize)]
pub struct NseIndicesResponse {
    #[serde(default)]
    pub data: Vec<NseIndexRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NseIndexRow {
    pub index: String,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub last: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub variation: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub percent_change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub open: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub high: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub low: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub previous_close: Option<Decimal>,
}
