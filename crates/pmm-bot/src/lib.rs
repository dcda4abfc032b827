//! Paper-trading host for the adaptive PMM strategy.
//!
//! Wires the strategy's tick adapter to a simulated market: a random-walk
//! price process feeds the paper connector's book and candle aggregation,
//! and a tokio timer drives the tick callback at a fixed cadence.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod sim;

pub use app::Application;
pub use config::{AppConfig, PaperConfig};
pub use error::{AppError, AppResult};
pub use logging::init_logging;
