//! Candle feed configuration.

use serde::{Deserialize, Serialize};

/// Candle feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandlesConfig {
    /// Bar interval in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Indicator lookback length in bars (NATR and RSI).
    #[serde(default = "default_lookback_length")]
    pub lookback_length: usize,

    /// Maximum candles retained in the rolling window.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for CandlesConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            lookback_length: default_lookback_length(),
            max_records: default_max_records(),
        }
    }
}

fn default_interval_secs() -> u64 {
    60 // 1 minute bars
}
fn default_lookback_length() -> usize {
    30
}
fn default_max_records() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CandlesConfig::default();
        assert_eq!(config.interval_secs, 60);
        assert_eq!(config.lookback_length, 30);
        assert_eq!(config.max_records, 1000);
    }

    #[test]
    fn test_config_serde_defaults() {
        let toml_str = r#"
lookback_length = 14
"#;
        let config: CandlesConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.lookback_length, 14);
        assert_eq!(config.interval_secs, 60);
        assert_eq!(config.max_records, 1000);
    }
}
