use std::sync::Arc;

use crate::config::Config;
use indian_market_data::IndianMarketService;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub market_service: Arc<IndianMarketService>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let market_service = IndianMarketService::from_config(&config.market)?;
    if config.market.offline {
        tracing::warn!("Offline mode: all market data is synthesized");
    }
    Ok(Arc::new(AppState {
        market_service: Arc::new(market_service),
    }))
}
