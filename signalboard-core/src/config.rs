//! Analysis configuration.
//!
//! Loaded from TOML; every field has a default so an empty file (or no file)
//! yields the canonical 50/200 MA, RSI-14, MACD 12/26/9, Bollinger 20/2 setup.

use crate::signals::{ClassifierPolicy, RsiThresholds};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub signal: SignalConfig,
}

/// Window sizes for the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Reported as `ma50`.
    pub ma_fast: usize,
    /// Reported as `ma200`.
    pub ma_slow: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_fast: 50,
            ma_slow: 200,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_k: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub policy: ClassifierPolicy,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        let thresholds = RsiThresholds::default();
        Self {
            policy: ClassifierPolicy::TrendRsi,
            oversold: thresholds.oversold,
            overbought: thresholds.overbought,
        }
    }
}

impl SignalConfig {
    pub fn thresholds(&self) -> RsiThresholds {
        RsiThresholds {
            oversold: self.oversold,
            overbought: self.overbought,
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        let periods = [
            ("ma_fast", ind.ma_fast),
            ("ma_slow", ind.ma_slow),
            ("rsi_period", ind.rsi_period),
            ("macd_fast", ind.macd_fast),
            ("macd_slow", ind.macd_slow),
            ("macd_signal", ind.macd_signal),
            ("bollinger_period", ind.bollinger_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::Invalid(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                ind.macd_fast, ind.macd_slow
            )));
        }
        if !ind.bollinger_k.is_finite() || ind.bollinger_k < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bollinger_k must be a non-negative number (got {})",
                ind.bollinger_k
            )));
        }

        let sig = &self.signal;
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(sig.oversold) || !in_range(sig.overbought) || sig.oversold >= sig.overbought
        {
            return Err(ConfigError::Invalid(format!(
                "RSI thresholds must satisfy 0 <= oversold < overbought <= 100 (got {} / {})",
                sig.oversold, sig.overbought
            )));
        }
        Ok(())
    }
}
