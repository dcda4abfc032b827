//! Rolling candle window with bounded retention.

use std::collections::VecDeque;

use crate::candle::Candle;
use crate::indicators;

/// Rolling window of candles, capped at `max_records`.
///
/// Feeds push candles as they form; a candle that shares the open time of
/// the newest entry replaces it (the bar is still building), anything newer
/// is appended and the oldest entries are evicted beyond the cap.
#[derive(Debug)]
pub struct CandleBuffer {
    candles: VecDeque<Candle>,
    max_records: usize,
}

impl CandleBuffer {
    pub fn new(max_records: usize) -> Self {
        Self {
            candles: VecDeque::new(),
            max_records,
        }
    }

    /// Insert or update a candle.
    ///
    /// Candles older than the newest entry are ignored; the feed delivers
    /// bars in order and a stale replay must not corrupt the window.
    pub fn push(&mut self, candle: Candle) {
        if let Some(last) = self.candles.back_mut() {
            if candle.time_open < last.time_open {
                return;
            }
            if candle.time_open == last.time_open {
                *last = candle;
                return;
            }
        }

        self.candles.push_back(candle);
        while self.candles.len() > self.max_records {
            self.candles.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.back()
    }

    /// Most recent `n` candles, oldest first.
    pub fn tail(&self, n: usize) -> Vec<&Candle> {
        let skip = self.candles.len().saturating_sub(n);
        self.candles.iter().skip(skip).collect()
    }

    /// NATR over the window. See [`indicators::natr`].
    pub fn natr(&self, length: usize) -> Option<f64> {
        indicators::natr(&self.candles, length)
    }

    /// RSI over the window. See [`indicators::rsi`].
    pub fn rsi(&self, length: usize) -> Option<f64> {
        indicators::rsi(&self.candles, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmm_core::{Price, Size};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn candle(time_open: u64, close: Decimal) -> Candle {
        Candle::new(
            time_open,
            time_open + 60_000,
            Price::new(close),
            Price::new(close),
            Price::new(close),
            Price::new(close),
            Size::new(dec!(1)),
        )
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut buf = CandleBuffer::new(10);
        buf.push(candle(0, dec!(100)));
        buf.push(candle(60_000, dec!(101)));

        assert_eq!(buf.len(), 2);
        assert_eq!(buf.last().unwrap().close.inner(), dec!(101));
    }

    #[test]
    fn test_push_same_open_time_replaces() {
        let mut buf = CandleBuffer::new(10);
        buf.push(candle(0, dec!(100)));
        buf.push(candle(0, dec!(100.5)));

        assert_eq!(buf.len(), 1);
        assert_eq!(buf.last().unwrap().close.inner(), dec!(100.5));
    }

    #[test]
    fn test_push_stale_candle_ignored() {
        let mut buf = CandleBuffer::new(10);
        buf.push(candle(60_000, dec!(101)));
        buf.push(candle(0, dec!(100)));

        assert_eq!(buf.len(), 1);
        assert_eq!(buf.last().unwrap().time_open, 60_000);
    }

    #[test]
    fn test_eviction_beyond_cap() {
        let mut buf = CandleBuffer::new(3);
        for i in 0..5u64 {
            buf.push(candle(i * 60_000, dec!(100)));
        }

        assert_eq!(buf.len(), 3);
        // Oldest two evicted
        assert_eq!(buf.tail(3)[0].time_open, 2 * 60_000);
    }

    #[test]
    fn test_tail_shorter_than_requested() {
        let mut buf = CandleBuffer::new(10);
        buf.push(candle(0, dec!(100)));

        assert_eq!(buf.tail(5).len(), 1);
    }

    #[test]
    fn test_indicators_through_buffer() {
        let mut buf = CandleBuffer::new(100);
        for i in 0..5u64 {
            buf.push(candle(i * 60_000, Decimal::from(100 + i)));
        }

        // Rising by 1 per bar: ATR = 1, NATR = 1 / 104
        let natr = buf.natr(3).unwrap();
        assert!((natr - 1.0 / 104.0).abs() < 1e-12);
        assert_eq!(buf.rsi(3).unwrap(), 100.0);
    }
}
