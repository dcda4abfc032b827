//! Host interface traits and the tick adapter for the adaptive PMM strategy.
//!
//! The hosting runtime owns connectivity, balances, and order execution; this
//! crate consumes them through two narrow traits and drives the strategy once
//! per scheduling tick:
//!
//! ```text
//! host timer ──▶ AdaptiveMarketMaker.on_tick()
//!                 ├─ cancel resting orders        (Connector)
//!                 ├─ observe market               (CandleBuffer + Connector)
//!                 ├─ SpreadCalculator.evaluate()  (pmm-strategy)
//!                 ├─ build_proposal()             (pmm-strategy)
//!                 └─ budget-adjust + place        (Connector)
//! ```
//!
//! `PaperConnector` is an in-memory host implementation used by tests and the
//! paper-trading binary.

pub mod connector;
pub mod error;
pub mod maker;
pub mod paper;
pub mod status;

pub use connector::{Connector, Notifier, TracingNotifier};
pub use error::{RuntimeError, RuntimeResult};
pub use maker::AdaptiveMarketMaker;
pub use paper::PaperConnector;
pub use status::StatusReport;
