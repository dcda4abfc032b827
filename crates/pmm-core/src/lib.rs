//! Core domain types for the adaptive PMM strategy.
//!
//! This crate provides the fundamental types shared across the workspace:
//! - `TradingPair`: base/quote market identifier ("SOL-USDT")
//! - `Price`, `Size`: precision-safe numeric types
//! - `BookTop`: best bid/ask with validity states
//! - `OrderCandidate`, `ActiveOrder`, `FillEvent`: order lifecycle types

pub mod decimal;
pub mod error;
pub mod market;
pub mod order;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use market::{BookState, BookTop, TradingPair};
pub use order::{ActiveOrder, ClientOrderId, FillEvent, OrderCandidate, OrderSide, OrderType};
