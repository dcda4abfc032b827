//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] pmm_core::CoreError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] pmm_strategy::StrategyError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] pmm_runtime::RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
