//! Error types for pmm-runtime.

use thiserror::Error;

/// Runtime error types.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Core error: {0}")]
    Core(#[from] pmm_core::CoreError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] pmm_strategy::StrategyError),

    #[error("Connector error: {0}")]
    Connector(String),
}

/// Result type alias for runtime operations.
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
