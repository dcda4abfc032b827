//! Spread calculation and quote construction for the adaptive PMM strategy.
//!
//! The policy core of the workspace, kept pure (no I/O, no clocks):
//!
//! ```text
//! MarketObservation ──▶ SpreadCalculator.evaluate()
//!                        ├─ Computed(SpreadPair)  volatility × inventory skew
//!                        └─ Fallback(reason)      caller logs + uses defaults
//!                              │
//!                              ▼
//!                        build_proposal()  offsets from mid, clamped to book
//! ```
//!
//! The spread model widens the side that would add to an already-overweight
//! inventory and tightens the side that would reduce it. It is inspired by
//! the Avellaneda-Stoikov framing (volatility and inventory as inputs) but
//! deliberately omits the optimal-control machinery: no time-horizon decay,
//! no order-arrival-rate estimation, no closed-form reservation price.

pub mod config;
pub mod error;
pub mod observation;
pub mod proposal;
pub mod spread;

pub use config::StrategyConfig;
pub use error::{StrategyError, StrategyResult};
pub use observation::MarketObservation;
pub use proposal::build_proposal;
pub use spread::{compute_spreads, FallbackReason, SpreadCalculator, SpreadOutcome, SpreadPair};
