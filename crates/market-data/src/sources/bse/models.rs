//! BSE route payloads.
//!
//! BSE answers with a flat document whose numeric fields are usually
//! formatted strings (`"2,850.55"`). It does not report traded volume.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::sources::de::{flexible_decimal, flexible_string};

/// `GET /api/stocks/bse?symbol=..` or `?code=..`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BseQuoteResponse {
    #[serde(default, deserialize_with = "flexible_string")]
    pub scrip_code: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub current_value: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub p_change: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub previous_close: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub open: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub high: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub low: Option<Decimal>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
}

/// `GET /api/stocks/bse?type=indices`
#[derive(Debug, Deserialize)]
pub struct BseIndicesResponse {
    #[serde(default)]
    pub indices: Vec<BseIndexRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BseIndexRow {
    pub name: String,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub current_value: Option<Decimal>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub change: Option<Decimal>,
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
