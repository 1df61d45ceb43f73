//! Signal classification over the latest aligned row.
//!
//! Two rule sets are supported and selected explicitly through
//! [`ClassifierPolicy`]. Both are total: every fully defined row maps to
//! exactly one [`Action`].

use crate::engine::align::AlignedRow;
use crate::report::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    Oversold,
    Overbought,
    Neutral,
}

/// Which rule set the classifier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierPolicy {
    /// RSI below oversold buys, above overbought sells.
    RsiOnly,
    /// Price/MA trend alignment, vetoed by an extreme RSI.
    TrendRsi,
}

impl ClassifierPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierPolicy::RsiOnly => "rsi_only",
            ClassifierPolicy::TrendRsi => "trend_rsi",
        }
    }
}

impl fmt::Display for ClassifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RSI levels shared by both policies. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiThresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub qualifier: Option<Qualifier>,
}

impl Recommendation {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            qualifier: None,
        }
    }

    pub fn qualified(action: Action, qualifier: Qualifier) -> Self {
        Self {
            action,
            qualifier: Some(qualifier),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.action)?;
        if let Some(q) = self.qualifier {
            write!(f, " ({q:?})")?;
        }
        Ok(())
    }
}

/// Classify one aligned row under the given policy.
///
/// Comparisons run on the two-decimal values the record reports, so a
/// recommendation never contradicts the numbers printed beside it.
pub fn classify(
    row: &AlignedRow,
    policy: ClassifierPolicy,
    thresholds: &RsiThresholds,
) -> Recommendation {
    let levels = Levels::reported(row);
    match policy {
        ClassifierPolicy::RsiOnly => classify_rsi_only(levels.rsi, thresholds),
        ClassifierPolicy::TrendRsi => classify_trend_rsi(&levels, thresholds),
    }
}

/// The row fields the classifier reads, at reported precision.
struct Levels {
    close: f64,
    ma_fast: f64,
    ma_slow: f64,
    rsi: f64,
}

impl Levels {
    fn reported(row: &AlignedRow) -> Self {
        Self {
            close: round2(row.close),
            ma_fast: round2(row.ma_fast),
            ma_slow: round2(row.ma_slow),
            rsi: round2(row.rsi),
        }
    }
}

fn classify_rsi_only(rsi: f64, t: &RsiThresholds) -> Recommendation {
    if rsi < t.oversold {
        Recommendation::qualified(Action::Buy, Qualifier::Oversold)
    } else if rsi > t.overbought {
        Recommendation::qualified(Action::Sell, Qualifier::Overbought)
    } else {
        Recommendation::qualified(Action::Hold, Qualifier::Neutral)
    }
}

fn classify_trend_rsi(l: &Levels, t: &RsiThresholds) -> Recommendation {
    let uptrend = l.close > l.ma_fast && l.ma_fast > l.ma_slow;
    let downtrend = l.close < l.ma_fast && l.ma_fast < l.ma_slow;

    if uptrend && l.rsi < t.overbought {
        Recommendation::new(Action::Buy)
    } else if downtrend && l.rsi > t.oversold {
        Recommendation::new(Action::Sell)
    } else {
        Recommendation::new(Action::Hold)
    }
}
