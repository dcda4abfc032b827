//! Synthetic market simulation for paper trading.

use pmm_candles::Candle;
use pmm_core::{Price, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Seeded random-walk price process.
///
/// Each step multiplies the price by `1 + u` where `u` is uniform in
/// `[-step_bps, +step_bps]` (as a fraction). Deterministic for a given seed.
pub struct PriceSimulator {
    price: f64,
    step_bps: f64,
    rng: StdRng,
}

impl PriceSimulator {
    pub fn new(initial_price: f64, step_bps: f64, seed: u64) -> Self {
        Self {
            price: initial_price,
            step_bps,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance the walk one step and return the new print.
    pub fn step(&mut self) -> Price {
        let shock = self.rng.gen_range(-1.0..=1.0) * self.step_bps / 10_000.0;
        self.price *= 1.0 + shock;
        Price::new(Decimal::from_f64_retain(self.price).unwrap_or(Decimal::ZERO))
    }
}

/// Aggregates trade prints into fixed-interval OHLCV bars.
pub struct CandleAggregator {
    interval_ms: u64,
    current: Option<Candle>,
}

impl CandleAggregator {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            current: None,
        }
    }

    /// Record a print. Returns the previous bar when this print opens a new one.
    pub fn record(&mut self, now_ms: u64, price: Price, volume: Size) -> Option<Candle> {
        let bucket_open = now_ms - now_ms % self.interval_ms;

        match &mut self.current {
            Some(candle) if candle.time_open == bucket_open => {
                candle.high = candle.high.max(price);
                candle.low = candle.low.min(price);
                candle.close = price;
                candle.volume = candle.volume + volume;
                None
            }
            current => {
                let finished = current.take();
                *current = Some(Candle::new(
                    bucket_open,
                    bucket_open + self.interval_ms,
                    price,
                    price,
                    price,
                    price,
                    volume,
                ));
                finished
            }
        }
    }

    /// The bar currently being built.
    pub fn current(&self) -> Option<&Candle> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simulator_deterministic_for_seed() {
        let mut a = PriceSimulator::new(150.0, 10.0, 7);
        let mut b = PriceSimulator::new(150.0, 10.0, 7);

        for _ in 0..50 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn test_simulator_bounded_steps() {
        let mut sim = PriceSimulator::new(150.0, 10.0, 1);
        let mut prev = 150.0_f64;

        for _ in 0..200 {
            let price: f64 = sim.step().inner().to_string().parse().unwrap();
            let move_bps = ((price - prev) / prev).abs() * 10_000.0;
            assert!(move_bps <= 10.0 + 1e-6);
            prev = price;
        }
    }

    #[test]
    fn test_aggregator_builds_ohlc() {
        let mut agg = CandleAggregator::new(1000);

        assert!(agg.record(0, Price::new(dec!(100)), Size::ONE).is_none());
        assert!(agg.record(300, Price::new(dec!(102)), Size::ONE).is_none());
        assert!(agg.record(600, Price::new(dec!(99)), Size::ONE).is_none());

        let current = agg.current().unwrap();
        assert_eq!(current.open.inner(), dec!(100));
        assert_eq!(current.high.inner(), dec!(102));
        assert_eq!(current.low.inner(), dec!(99));
        assert_eq!(current.close.inner(), dec!(99));
        assert_eq!(current.volume.inner(), dec!(3));
    }

    #[test]
    fn test_aggregator_emits_on_bar_close() {
        let mut agg = CandleAggregator::new(1000);

        agg.record(0, Price::new(dec!(100)), Size::ONE);
        agg.record(500, Price::new(dec!(101)), Size::ONE);

        let finished = agg.record(1000, Price::new(dec!(102)), Size::ONE).unwrap();
        assert_eq!(finished.time_open, 0);
        assert_eq!(finished.close.inner(), dec!(101));

        // The new bar opened at the closing print
        let current = agg.current().unwrap();
        assert_eq!(current.time_open, 1000);
        assert_eq!(current.open.inner(), dec!(102));
    }
}
