//! Strategy configuration.
//!
//! All tunables live in one immutable struct handed to the calculator and
//! the tick adapter at construction time.

use crate::error::{StrategyError, StrategyResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Trading pair in `BASE-QUOTE` form (e.g. "SOL-USDT").
    #[serde(default = "default_trading_pair")]
    pub trading_pair: String,

    /// Order size per side in base units.
    #[serde(default = "default_order_amount")]
    pub order_amount: Decimal,

    /// Seconds between full quote refreshes (cancel + re-place).
    #[serde(default = "default_order_refresh_secs")]
    pub order_refresh_secs: u64,

    /// Bid spread used when the calculator falls back (fraction of price).
    #[serde(default = "default_spread")]
    pub default_bid_spread: Decimal,

    /// Ask spread used when the calculator falls back (fraction of price).
    #[serde(default = "default_spread")]
    pub default_ask_spread: Decimal,

    /// Floor applied to every computed spread (fraction of price).
    #[serde(default = "default_spread")]
    pub min_spread: Decimal,

    /// Scales volatility (NATR fraction) into the base spread.
    #[serde(default = "default_volatility_multiplier")]
    pub volatility_multiplier: Decimal,

    /// Inventory skew strength (0.0 = no skew, 1.0 = full deviation applied).
    #[serde(default = "default_inventory_skew_factor")]
    pub inventory_skew_factor: Decimal,

    /// Risk aversion parameter declared by the reference strategy.
    ///
    /// Does not enter the spread formula; kept so configurations remain
    /// compatible with a future model that prices it in.
    #[serde(default = "default_risk_aversion")]
    pub risk_aversion: Decimal,
}

impl StrategyConfig {
    /// Validate invariants the spread formula relies on.
    pub fn validate(&self) -> StrategyResult<()> {
        if self.min_spread <= Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "min_spread must be positive".to_string(),
            ));
        }
        if self.default_bid_spread <= Decimal::ZERO || self.default_ask_spread <= Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "default spreads must be positive".to_string(),
            ));
        }
        if self.order_amount <= Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "order_amount must be positive".to_string(),
            ));
        }
        if self.volatility_multiplier < Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "volatility_multiplier must be non-negative".to_string(),
            ));
        }
        if self.inventory_skew_factor < Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "inventory_skew_factor must be non-negative".to_string(),
            ));
        }
        if self.order_refresh_secs == 0 {
            return Err(StrategyError::InvalidConfig(
                "order_refresh_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            trading_pair: default_trading_pair(),
            order_amount: default_order_amount(),
            order_refresh_secs: default_order_refresh_secs(),
            default_bid_spread: default_spread(),
            default_ask_spread: default_spread(),
            min_spread: default_spread(),
            volatility_multiplier: default_volatility_multiplier(),
            inventory_skew_factor: default_inventory_skew_factor(),
            risk_aversion: default_risk_aversion(),
        }
    }
}

fn default_trading_pair() -> String {
    "SOL-USDT".to_string()
}
fn default_order_amount() -> Decimal {
    Decimal::ONE
}
fn default_order_refresh_secs() -> u64 {
    15
}
fn default_spread() -> Decimal {
    Decimal::new(1, 3) // 0.001 = 10 bps
}
fn default_volatility_multiplier() -> Decimal {
    Decimal::new(5, 0)
}
fn default_inventory_skew_factor() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_risk_aversion() -> Decimal {
    Decimal::new(9, 1) // 0.9
}
