//! OHLCV candle type.

use pmm_core::{Price, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening time of the bar (Unix milliseconds).
    pub time_open: u64,
    /// Closing time of the bar (Unix milliseconds).
    pub time_close: u64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Size,
}

impl Candle {
    pub fn new(
        time_open: u64,
        time_close: u64,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Size,
    ) -> Self {
        Self {
            time_open,
            time_close,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True range against the previous bar's close:
    /// `max(high - low, |high - prev_close|, |low - prev_close|)`.
    pub fn true_range(&self, prev_close: Price) -> Decimal {
        let hl = self.high.inner() - self.low.inner();
        let hc = (self.high.inner() - prev_close.inner()).abs();
        let lc = (self.low.inner() - prev_close.inner()).abs();
        hl.max(hc).max(lc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle(high: Decimal, low: Decimal, close: Decimal) -> Candle {
        Candle::new(
            0,
            60_000,
            Price::new(close),
            Price::new(high),
            Price::new(low),
            Price::new(close),
            Size::new(dec!(10)),
        )
    }

    #[test]
    fn test_true_range_within_bar() {
        // Previous close inside the bar's range: high-low dominates
        let c = candle(dec!(101), dec!(99), dec!(100));
        assert_eq!(c.true_range(Price::new(dec!(100))), dec!(2));
    }

    #[test]
    fn test_true_range_gap_up() {
        // Bar gapped above the previous close: |high - prev_close| dominates
        let c = candle(dec!(110), dec!(108), dec!(109));
        assert_eq!(c.true_range(Price::new(dec!(100))), dec!(10));
    }

    #[test]
    fn test_true_range_gap_down() {
        let c = candle(dec!(92), dec!(90), dec!(91));
        assert_eq!(c.true_range(Price::new(dec!(100))), dec!(10));
    }
}
