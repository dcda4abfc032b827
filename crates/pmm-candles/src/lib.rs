//! Candle data and volatility indicators for the adaptive PMM strategy.
//!
//! Provides:
//! - `Candle`: OHLCV bar with open/close timestamps
//! - `CandleBuffer`: rolling window with bounded retention and open-time dedup
//! - `indicators`: NATR (normalized average true range) and RSI over the window
//!
//! The spread calculator consumes the NATR of the most recent window as its
//! volatility input; RSI is computed for status reporting.

pub mod buffer;
pub mod candle;
pub mod config;
pub mod indicators;

pub use buffer::CandleBuffer;
pub use candle::Candle;
pub use config::CandlesConfig;
pub use indicators::{natr, rsi};
