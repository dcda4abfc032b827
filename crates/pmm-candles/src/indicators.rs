//! Volatility and momentum indicators over a candle window.
//!
//! Both indicators use Wilder smoothing (seed with a simple average over the
//! first `length` samples, then `avg = (avg * (length - 1) + x) / length`),
//! matching the classic ATR/RSI definitions.
//!
//! NATR here is a *fraction* of price (ATR / last close), not a percentage:
//! a value of 0.002 means the average true range is 0.2% of the price level.
//! The spread calculator multiplies it directly.

use std::collections::VecDeque;

use crate::candle::Candle;
use rust_decimal::prelude::ToPrimitive;

/// Normalized average true range over `length` bars.
///
/// Returns `None` until at least `length + 1` candles are available (the
/// first true range needs a previous close), or when the last close is
/// non-positive.
pub fn natr(candles: &VecDeque<Candle>, length: usize) -> Option<f64> {
    if length == 0 || candles.len() < length + 1 {
        return None;
    }

    let mut true_ranges = Vec::with_capacity(candles.len() - 1);
    let mut prev_close: Option<f64> = None;
    let mut last_close = 0.0;

    for candle in candles {
        let high = candle.high.inner().to_f64()?;
        let low = candle.low.inner().to_f64()?;
        let close = candle.close.inner().to_f64()?;

        if let Some(pc) = prev_close {
            let tr = (high - low).max((high - pc).abs()).max((low - pc).abs());
            true_ranges.push(tr);
        }
        prev_close = Some(close);
        last_close = close;
    }

    let atr = wilder_smooth(&true_ranges, length)?;

    if last_close <= 0.0 {
        return None;
    }
    Some(atr / last_close)
}

/// Relative strength index over `length` bars.
///
/// Returns `None` until at least `length + 1` candles are available.
/// A flat window (no gains, no losses) yields the neutral value 50.
pub fn rsi(candles: &VecDeque<Candle>, length: usize) -> Option<f64> {
    if length == 0 || candles.len() < length + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);
    let mut prev_close: Option<f64> = None;

    for candle in candles {
        let close = candle.close.inner().to_f64()?;
        if let Some(pc) = prev_close {
            let delta = close - pc;
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }
        prev_close = Some(close);
    }

    let avg_gain = wilder_smooth(&gains, length)?;
    let avg_loss = wilder_smooth(&losses, length)?;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return Some(50.0);
        }
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Wilder's recursive moving average over `samples`, seeded with the simple
/// mean of the first `length` values.
fn wilder_smooth(samples: &[f64], length: usize) -> Option<f64> {
    if samples.len() < length {
        return None;
    }

    let seed = samples[..length].iter().sum::<f64>() / length as f64;
    let smoothed = samples[length..]
        .iter()
        .fold(seed, |avg, x| (avg * (length as f64 - 1.0) + x) / length as f64);
    Some(smoothed)
}
