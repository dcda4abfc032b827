//! Application configuration.

use crate::error::{AppError, AppResult};
use pmm_candles::CandlesConfig;
use pmm_strategy::StrategyConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Paper market simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperConfig {
    /// Starting base asset balance, in base units.
    #[serde(default = "default_initial_base_balance")]
    pub initial_base_balance: Decimal,

    /// Starting quote asset balance, in quote units.
    #[serde(default = "default_initial_quote_balance")]
    pub initial_quote_balance: Decimal,

    /// Starting price of the simulated random walk.
    #[serde(default = "default_initial_price")]
    pub initial_price: f64,

    /// Half-spread of the simulated book around the last print, in bps.
    #[serde(default = "default_book_half_spread_bps")]
    pub book_half_spread_bps: Decimal,

    /// Maximum per-step price move of the random walk, in bps.
    #[serde(default = "default_step_bps")]
    pub step_bps: f64,

    /// Random walk seed, for reproducible sessions.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            initial_base_balance: default_initial_base_balance(),
            initial_quote_balance: default_initial_quote_balance(),
            initial_price: default_initial_price(),
            book_half_spread_bps: default_book_half_spread_bps(),
            step_bps: default_step_bps(),
            seed: default_seed(),
        }
    }
}

fn default_initial_base_balance() -> Decimal {
    Decimal::new(100, 0)
}
fn default_initial_quote_balance() -> Decimal {
    Decimal::new(10_000, 0)
}
fn default_initial_price() -> f64 {
    150.0
}
fn default_book_half_spread_bps() -> Decimal {
    Decimal::new(5, 0)
}
fn default_step_bps() -> f64 {
    10.0
}
fn default_seed() -> u64 {
    42
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Strategy parameters.
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Candle feed parameters.
    #[serde(default)]
    pub candles: CandlesConfig,

    /// Paper market simulation parameters.
    #[serde(default)]
    pub paper: PaperConfig,

    /// Simulation step cadence in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seconds between status report log lines.
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyConfig::default(),
            candles: CandlesConfig::default(),
            paper: PaperConfig::default(),
            tick_interval_ms: default_tick_interval_ms(),
            status_interval_secs: default_status_interval_secs(),
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_status_interval_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("PMM_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
