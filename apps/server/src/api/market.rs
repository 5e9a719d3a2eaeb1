use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use indian_market_data::{
    Exchange, MarketIndex, MarketOverview, MarketRecord, MarketStatus, SearchResult,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct StockQuery {
    exchange: Option<String>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct StatusResponse {
    status: MarketStatus,
}

fn parse_exchange(raw: Option<&str>) -> ApiResult<Option<Exchange>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value
            .parse::<Exchange>()
            .map(Some)
            .map_err(ApiError::BadRequest),
        None => Ok(None),
    }
}

async fn get_stock(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<StockQuery>,
) -> ApiResult<Json<MarketRecord>> {
    let preferred = parse_exchange(q.exchange.as_deref())?;
    state
        .market_service
        .get_stock(&symbol, preferred)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No data for symbol '{}'", symbol.trim())))
}

async fn invalidate_stock(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.market_service.invalidate_symbol(&symbol);
    StatusCode::NO_CONTENT
}

async fn get_indices(State(state): State<Arc<AppState>>) -> Json<Vec<MarketIndex>> {
    Json(state.market_service.get_indices().await)
}

async fn get_overview(State(state): State<Arc<AppState>>) -> Json<MarketOverview> {
    Json(state.market_service.get_market_overview().await)
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.market_service.market_status(),
    })
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> Json<Vec<SearchResult>> {
    Json(state.market_service.search_symbols(&q.q).await)
}

async fn clear_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.market_service.clear_cache();
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market/stocks/{symbol}", get(get_stock))
        .route("/market/stocks/{symbol}/cache", delete(invalidate_stock))
        .route("/market/indices", get(get_indices))
        .route("/market/overview", get(get_overview))
        .route("/market/status", get(get_status))
        .route("/market/search", get(search))
        .route("/market/cache", delete(clear_cache))
}
