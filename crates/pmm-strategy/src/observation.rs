//! Per-tick market observation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Snapshot of everything the spread calculator needs for one tick.
///
/// Rebuilt from fresh host data on every cycle; nothing here persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketObservation {
    /// NATR over the lookback window, as a fraction of price.
    /// `None` when the indicator could not be computed.
    pub volatility: Option<Decimal>,
    /// Base asset balance, in base units.
    pub base_balance: Decimal,
    /// Quote asset balance valued at the current mid price, in quote units.
    pub quote_value: Decimal,
}

impl MarketObservation {
    pub fn new(volatility: Option<Decimal>, base_balance: Decimal, quote_value: Decimal) -> Self {
        Self {
            volatility,
            base_balance,
            quote_value,
        }
    }

    /// Total portfolio value expressed in base units of account.
    pub fn total_value(&self) -> Decimal {
        self.base_balance + self.quote_value
    }

    /// Fraction of portfolio value held in the base asset, clamped to [0, 1].
    ///
    /// An empty (or negatively-valued) portfolio has no meaningful ratio and
    /// reports 0.5, which the skew formula treats as neutral.
    pub fn inventory_ratio(&self) -> Decimal {
        let total = self.total_value();
        if total <= Decimal::ZERO {
            return dec!(0.5);
        }
        (self.base_balance / total).clamp(Decimal::ZERO, Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_ratio_balanced() {
        let obs = MarketObservation::new(None, dec!(5000), dec!(5000));
        assert_eq!(obs.inventory_ratio(), dec!(0.5));
    }

    #[test]
    fn test_inventory_ratio_base_heavy() {
        let obs = MarketObservation::new(None, dec!(7000), dec!(3000));
        assert_eq!(obs.inventory_ratio(), dec!(0.7));
    }

    #[test]
    fn test_inventory_ratio_empty_portfolio_neutral() {
        let obs = MarketObservation::new(None, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(obs.inventory_ratio(), dec!(0.5));
    }

    #[test]
    fn test_inventory_ratio_all_base() {
        let obs = MarketObservation::new(None, dec!(100), Decimal::ZERO);
        assert_eq!(obs.inventory_ratio(), Decimal::ONE);
    }

    #[test]
    fn test_total_value() {
        let obs = MarketObservation::new(None, dec!(150), dec!(850));
        assert_eq!(obs.total_value(), dec!(1000));
    }
}
