use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use indian_market_data::MarketDataConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    /// Upper bound on a whole HTTP request, including source fallbacks.
    pub request_timeout: Duration,
    /// `json` or `text`
    pub log_format: String,
    pub market: MarketDataConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any `IMD_*` variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = var("IMD_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8088".to_string())
            .parse()
            .context("Invalid IMD_LISTEN_ADDR")?;
        let cors_allow = var("IMD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let source_timeout_secs: u64 = var("IMD_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".into())
            .trim()
            .parse()
            .context("Invalid IMD_REQUEST_TIMEOUT_SECS")?;
        let offline = var("IMD_OFFLINE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let mock_seed = match var("IMD_MOCK_SEED") {
            Some(raw) => Some(raw.trim().parse().context("Invalid IMD_MOCK_SEED")?),
            None => None,
        };
        let log_format = var("IMD_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        let market = MarketDataConfig {
            base_url: var("IMD_API_BASE_URL")
                .unwrap_or_else(|| indian_market_data::config::DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(source_timeout_secs),
            offline,
            mock_seed,
            ..Default::default()
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            // Worst case is one timed-out call per exchange before the mock.
            request_timeout: market.request_timeout * 2 + Duration::from_secs(5),
            log_format,
            market,
        })
    }
}
