//! Volatility- and inventory-aware spread calculation.
//!
//! The model:
//! 1. Scale volatility into a base spread, floored at `min_spread`.
//! 2. Measure inventory deviation from the 50/50 target.
//! 3. Skew the two sides in opposite directions: widen the side whose fill
//!    would add to the overweight asset, tighten the side that reduces it.
//! 4. Floor both sides at `min_spread`. No ceiling: pathological inputs can
//!    exceed 100% and the caller is expected to sanity-check.

use crate::config::StrategyConfig;
use crate::error::StrategyResult;
use crate::observation::MarketObservation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Fractional bid/ask offsets from the reference price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadPair {
    pub bid: Decimal,
    pub ask: Decimal,
}

impl SpreadPair {
    pub fn new(bid: Decimal, ask: Decimal) -> Self {
        Self { bid, ask }
    }

    pub fn is_symmetric(&self) -> bool {
        self.bid == self.ask
    }
}

/// Why the calculator declined to compute spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No candle data has arrived yet.
    NoCandles,
    /// Candles exist but the volatility indicator is not yet computable.
    IndicatorUnavailable,
    /// The volatility input is negative or otherwise unusable.
    InvalidVolatility,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandles => write!(f, "no candle data available yet"),
            Self::IndicatorUnavailable => write!(f, "volatility indicator unavailable"),
            Self::InvalidVolatility => write!(f, "volatility input invalid"),
        }
    }
}

/// Result of a spread evaluation.
///
/// Data problems surface as an explicit `Fallback` variant rather than an
/// error: the caller logs the reason and quotes the configured defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadOutcome {
    /// Spreads computed from live market data.
    Computed(SpreadPair),
    /// Input data unavailable or invalid; quote the configured defaults.
    Fallback(FallbackReason),
}

impl SpreadOutcome {
    /// The spreads to quote, substituting the configured defaults on fallback.
    pub fn resolve(&self, config: &StrategyConfig) -> SpreadPair {
        match self {
            Self::Computed(pair) => *pair,
            Self::Fallback(_) => {
                SpreadPair::new(config.default_bid_spread, config.default_ask_spread)
            }
        }
    }

    /// The fallback reason, if any.
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Computed(_) => None,
            Self::Fallback(reason) => Some(*reason),
        }
    }
}

/// Compute bid/ask spreads from volatility and inventory.
///
/// # Arguments
/// * `volatility` - NATR as a fraction of price, `>= 0`
/// * `inventory_ratio` - base-asset share of portfolio value; clamped to [0, 1]
/// * `config` - strategy parameters (`min_spread`, `volatility_multiplier`,
///   `inventory_skew_factor`)
///
/// The deviation of the inventory ratio from 0.5 drives the skew: a long
/// book (ratio above 0.5) tightens the bid and widens the ask so sells are
/// favoured; a short book mirrors that.
pub fn compute_spreads(
    volatility: Decimal,
    inventory_ratio: Decimal,
    config: &StrategyConfig,
) -> SpreadPair {
    let base_spread = (volatility * config.volatility_multiplier).max(config.min_spread);

    let ratio = inventory_ratio.clamp(Decimal::ZERO, Decimal::ONE);
    let deviation = ratio - dec!(0.5);
    let skew = deviation.abs() * config.inventory_skew_factor;

    let (bid, ask) = if deviation > Decimal::ZERO {
        // Long: quote the bid further away, the ask closer
        (
            base_spread * (Decimal::ONE - skew),
            base_spread * (Decimal::ONE + skew),
        )
    } else {
        // Short or neutral: mirror image
        (
            base_spread * (Decimal::ONE + skew),
            base_spread * (Decimal::ONE - skew),
        )
    };

    SpreadPair::new(bid.max(config.min_spread), ask.max(config.min_spread))
}

/// Spread calculator bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct SpreadCalculator {
    config: StrategyConfig,
}

impl SpreadCalculator {
    /// Create a calculator, validating the configuration.
    pub fn new(config: StrategyConfig) -> StrategyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Evaluate spreads for one observation.
    ///
    /// Missing or invalid volatility produces a `Fallback`, never a panic or
    /// an error: stale defaults are always a safe quote.
    pub fn evaluate(&self, observation: &MarketObservation) -> SpreadOutcome {
        let volatility = match observation.volatility {
            Some(v) if v >= Decimal::ZERO => v,
            Some(_) => return SpreadOutcome::Fallback(FallbackReason::InvalidVolatility),
            None => return SpreadOutcome::Fallback(FallbackReason::IndicatorUnavailable),
        };

        SpreadOutcome::Computed(compute_spreads(
            volatility,
            observation.inventory_ratio(),
            &self.config,
        ))
    }

    /// The statically configured default spreads.
    pub fn default_spreads(&self) -> SpreadPair {
        SpreadPair::new(
            self.config.default_bid_spread,
            self.config.default_ask_spread,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StrategyConfig {
        StrategyConfig {
            min_spread: dec!(0.001),
            volatility_multiplier: dec!(5),
            inventory_skew_factor: dec!(0.5),
            default_bid_spread: dec!(0.002),
            default_ask_spread: dec!(0.003),
            ..Default::default()
        }
    }

    #[test]
    fn test_neutral_inventory_symmetric() {
        let config = test_config();
        let spreads = compute_spreads(dec!(0.002), dec!(0.5), &config);

        // base_spread = max(0.001, 0.002 * 5) = 0.01, no skew at 0.5
        assert!(spreads.is_symmetric());
        assert_eq!(spreads.bid, dec!(0.01));
        assert_eq!(spreads.ask, dec!(0.01));
    }

    #[test]
    fn test_long_inventory_worked_example() {
        let config = test_config();
        let spreads = compute_spreads(dec!(0.002), dec!(0.7), &config);

        // base_spread = 0.01, deviation = 0.2
        // bid = 0.01 * (1 - 0.2 * 0.5) = 0.009
        // ask = 0.01 * (1 + 0.2 * 0.5) = 0.011
        assert_eq!(spreads.bid, dec!(0.009));
        assert_eq!(spreads.ask, dec!(0.011));
    }

    #[test]
    fn test_short_inventory_mirrors_long() {
        let config = test_config();
        let spreads = compute_spreads(dec!(0.002), dec!(0.3), &config);

        // Mirror of the 0.7 case: bid widens, ask tightens
        assert_eq!(spreads.bid, dec!(0.011));
        assert_eq!(spreads.ask, dec!(0.009));
    }

    #[test]
    fn test_mirror_symmetry_swaps_sides() {
        let config = test_config();
        for d in [dec!(0.1), dec!(0.25), dec!(0.4)] {
            let long = compute_spreads(dec!(0.004), dec!(0.5) + d, &config);
            let short = compute_spreads(dec!(0.004), dec!(0.5) - d, &config);

            assert_eq!(long.bid, short.ask);
            assert_eq!(long.ask, short.bid);
        }
    }

    #[test]
    fn test_zero_volatility_floored() {
        let config = test_config();
        let spreads = compute_spreads(Decimal::ZERO, dec!(0.5), &config);

        assert_eq!(spreads.bid, config.min_spread);
        assert_eq!(spreads.ask, config.min_spread);
    }

    #[test]
    fn test_spreads_never_below_floor() {
        let config = test_config();
        for vol in [dec!(0), dec!(0.0001), dec!(0.002), dec!(0.05)] {
            for ratio in [dec!(0), dec!(0.25), dec!(0.5), dec!(0.75), dec!(1)] {
                let spreads = compute_spreads(vol, ratio, &config);
                assert!(spreads.bid >= config.min_spread, "bid below floor");
                assert!(spreads.ask >= config.min_spread, "ask below floor");
            }
        }
    }

    #[test]
    fn test_skew_monotonic_above_neutral() {
        let config = test_config();
        let mut prev = compute_spreads(dec!(0.002), dec!(0.5), &config);
        for step in 1..=10u32 {
            let ratio = dec!(0.5) + Decimal::new(step as i64 * 5, 2); // 0.55 .. 1.0
            let spreads = compute_spreads(dec!(0.002), ratio, &config);

            assert!(spreads.ask >= prev.ask, "ask must not shrink as ratio rises");
            assert!(spreads.bid <= prev.bid, "bid must not grow as ratio rises");
            prev = spreads;
        }
    }

    #[test]
    fn test_out_of_range_ratio_clamped() {
        let config = test_config();
        let clamped = compute_spreads(dec!(0.002), dec!(1.8), &config);
        let full = compute_spreads(dec!(0.002), Decimal::ONE, &config);
        assert_eq!(clamped, full);
    }

    #[test]
    fn test_extreme_skew_floor_clamps_tight_side() {
        let config = StrategyConfig {
            min_spread: dec!(0.001),
            inventory_skew_factor: dec!(2.5),
            ..test_config()
        };
        // deviation 0.5, skew = 1.25: tight side would go negative
        let spreads = compute_spreads(dec!(0.002), Decimal::ONE, &config);
        assert_eq!(spreads.bid, config.min_spread);
        assert!(spreads.ask > spreads.bid);
    }

    #[test]
    fn test_evaluate_computes_from_observation() {
        let calc = SpreadCalculator::new(test_config()).unwrap();
        let obs = MarketObservation::new(Some(dec!(0.002)), dec!(7000), dec!(3000));

        match calc.evaluate(&obs) {
            SpreadOutcome::Computed(spreads) => {
                assert_eq!(spreads.bid, dec!(0.009));
                assert_eq!(spreads.ask, dec!(0.011));
            }
            SpreadOutcome::Fallback(reason) => panic!("unexpected fallback: {reason}"),
        }
    }

    #[test]
    fn test_evaluate_missing_volatility_falls_back() {
        let calc = SpreadCalculator::new(test_config()).unwrap();
        let obs = MarketObservation::new(None, dec!(100), dec!(100));

        let outcome = calc.evaluate(&obs);
        assert_eq!(
            outcome.fallback_reason(),
            Some(FallbackReason::IndicatorUnavailable)
        );

        // Defaults pass through unchanged
        let spreads = outcome.resolve(calc.config());
        assert_eq!(spreads.bid, dec!(0.002));
        assert_eq!(spreads.ask, dec!(0.003));
    }

    #[test]
    fn test_evaluate_negative_volatility_falls_back() {
        let calc = SpreadCalculator::new(test_config()).unwrap();
        let obs = MarketObservation::new(Some(dec!(-0.01)), dec!(100), dec!(100));

        assert_eq!(
            calc.evaluate(&obs).fallback_reason(),
            Some(FallbackReason::InvalidVolatility)
        );
    }

    #[test]
    fn test_calculator_rejects_invalid_config() {
        let config = StrategyConfig {
            min_spread: Decimal::ZERO,
            ..Default::default()
        };
        assert!(SpreadCalculator::new(config).is_err());
    }

    #[test]
    fn test_resolve_passes_computed_through() {
        let config = test_config();
        let outcome = SpreadOutcome::Computed(SpreadPair::new(dec!(0.004), dec!(0.006)));
        let spreads = outcome.resolve(&config);
        assert_eq!(spreads.bid, dec!(0.004));
        assert_eq!(spreads.ask, dec!(0.006));
    }
}
