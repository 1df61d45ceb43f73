//! End-to-end pipeline scenarios: bars in, one record or one typed error out.

use chrono::NaiveDate;
use signalboard_core::config::AnalysisConfig;
use signalboard_core::domain::BarError;
use signalboard_core::{
    analyze, Action, AnalysisError, Analyzer, Bar, ClassifierPolicy, Qualifier,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar::new(
                base_date() + chrono::Duration::days(i as i64),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
            )
        })
        .collect()
}

/// Uptrend made of alternating +1.0 / -0.8 moves, ending on an up day.
fn zigzag_up(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 0.2 * (i / 2) as f64 + if i % 2 == 1 { 1.0 } else { 0.0 })
        .collect()
}

/// Mirror image of [`zigzag_up`], ending on a down day.
fn zigzag_down(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 200.0 - 0.2 * (i / 2) as f64 - if i % 2 == 1 { 1.0 } else { 0.0 })
        .collect()
}

// ── Happy paths ──────────────────────────────────────────────────────

#[test]
fn flat_series_is_neutral() {
    let bars = bars_from_closes(&vec![100.0; 220]);

    let record = analyze(bars.clone(), ClassifierPolicy::TrendRsi).unwrap();
    assert_eq!(record.rows, 21);
    assert_eq!(record.price, 100.0);
    assert_eq!(record.ma50, 100.0);
    assert_eq!(record.ma200, 100.0);
    assert_eq!(record.rsi, 50.0);
    assert_eq!(record.bb_upper, 100.0);
    assert_eq!(record.bb_lower, 100.0);
    assert_eq!(record.recommendation, "Hold");
    assert!(record.macd.macd.iter().all(|&v| v == 0.0));

    let record = analyze(bars, ClassifierPolicy::RsiOnly).unwrap();
    assert_eq!(record.recommendation, "Hold (Neutral)");
    assert_eq!(record.signal.qualifier, Some(Qualifier::Neutral));
}

#[test]
fn flat_series_hold_at_any_price() {
    let analyzer = Analyzer::default();
    let rsi_only = Analyzer::default().with_policy(ClassifierPolicy::RsiOnly);

    for cents in (1001..40_000).step_by(37) {
        let price = cents as f64 / 100.0;
        let bars = bars_from_closes(&vec![price; 220]);

        let record = analyzer.analyze(bars.clone()).unwrap();
        assert_eq!(record.price, record.ma50, "flat at {price}");
        assert_eq!(record.ma50, record.ma200, "flat at {price}");
        assert_eq!(record.rsi, 50.0, "flat at {price}");
        assert_eq!(record.recommendation, "Hold", "flat at {price}");

        let record = rsi_only.analyze(bars).unwrap();
        assert_eq!(record.recommendation, "Hold (Neutral)", "flat at {price}");
    }
}

#[test]
fn strictly_rising_series_is_overbought() {
    let closes: Vec<f64> = (0..220).map(|i| 100.0 + i as f64).collect();
    let bars = bars_from_closes(&closes);

    let record = analyze(bars.clone(), ClassifierPolicy::TrendRsi).unwrap();
    assert!(record.rsi_series.rsi.iter().all(|&v| v == 100.0));
    assert!(record.macd.macd.iter().all(|&v| v > 0.0));
    assert!(record.macd.macd.windows(2).all(|w| w[1] >= w[0]));
    assert!(record.price > record.ma50 && record.ma50 > record.ma200);
    // Uptrend but RSI is not below the overbought threshold.
    assert_eq!(record.signal.action, Action::Hold);

    let record = analyze(bars, ClassifierPolicy::RsiOnly).unwrap();
    assert_eq!(record.recommendation, "Sell (Overbought)");
}

#[test]
fn zigzag_uptrend_buys() {
    let bars = bars_from_closes(&zigzag_up(220));
    let record = analyze(bars, ClassifierPolicy::TrendRsi).unwrap();

    assert_eq!(record.price, 122.8);
    assert_eq!(record.ma50, 119.9);
    assert_eq!(record.ma200, 112.4);
    assert_eq!(record.rsi, 57.38);
    assert_eq!(record.recommendation, "Buy");
    assert_eq!(record.signal.action, Action::Buy);
    assert_eq!(record.signal.qualifier, None);
}

#[test]
fn uptrend_turns_overbought_after_run_of_gains() {
    let mut closes = zigzag_up(220);
    for _ in 0..30 {
        let last = closes[closes.len() - 1];
        closes.push(last + 1.0);
    }
    let bars = bars_from_closes(&closes);

    let trend = analyze(bars.clone(), ClassifierPolicy::TrendRsi).unwrap();
    assert!(trend.rsi > 70.0);
    assert!(trend.price > trend.ma50 && trend.ma50 > trend.ma200);
    assert_eq!(trend.recommendation, "Hold");

    let rsi_only = analyze(bars, ClassifierPolicy::RsiOnly).unwrap();
    assert_eq!(rsi_only.recommendation, "Sell (Overbought)");
}

#[test]
fn zigzag_downtrend_sells() {
    let bars = bars_from_closes(&zigzag_down(220));
    let record = analyze(bars, ClassifierPolicy::TrendRsi).unwrap();

    assert!(record.price < record.ma50 && record.ma50 < record.ma200);
    assert!(record.rsi > 30.0 && record.rsi < 50.0);
    assert_eq!(record.recommendation, "Sell");
}

#[test]
fn record_blocks_share_dates_and_length() {
    let bars = bars_from_closes(&zigzag_up(260));
    let record = Analyzer::default().analyze_ticker("ZIG", bars).unwrap();

    assert_eq!(record.ticker.as_deref(), Some("ZIG"));
    assert_eq!(record.rows, 61);
    assert_eq!(record.ohlc.dates, record.macd.dates);
    assert_eq!(record.ohlc.dates, record.rsi_series.dates);
    assert_eq!(record.ohlc.dates.first().map(String::as_str), Some("2023-07-20"));
    assert_eq!(record.as_of, "2023-09-18");
    assert!(record
        .ohlc
        .bb_lower
        .iter()
        .zip(&record.ohlc.bb_upper)
        .all(|(lo, hi)| lo <= hi));
}

#[test]
fn record_json_shape() {
    let bars = bars_from_closes(&vec![50.0; 200]);
    let record = analyze(bars, ClassifierPolicy::TrendRsi).unwrap();
    let json: serde_json::Value = serde_json::to_value(&record).unwrap();

    assert!(json.get("ticker").is_none());
    for key in [
        "as_of", "price", "ma50", "ma200", "rsi", "bb_upper", "bb_lower",
        "recommendation", "ohlc", "macd", "rsi_series",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["signal"]["policy"], "trend_rsi");
    assert_eq!(json["signal"]["action"], "Hold");
    assert_eq!(json["ohlc"]["dates"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["macd"]["histogram"][0], 0.0);
}

#[test]
fn custom_windows_shorten_warmup() {
    let config = AnalysisConfig::from_toml(
        r#"
        [indicators]
        ma_fast = 5
        ma_slow = 10

        [signal]
        policy = "rsi_only"
        "#,
    )
    .unwrap();
    let analyzer = Analyzer::new(config).unwrap();
    // MACD signal (26 + 9 - 2) now dominates the warm-up.
    assert_eq!(analyzer.min_bars(), 34);

    let record = analyzer.analyze(bars_from_closes(&zigzag_up(40))).unwrap();
    assert_eq!(record.rows, 7);
    assert_eq!(record.signal.policy, ClassifierPolicy::RsiOnly);
}

// ── Failure paths ────────────────────────────────────────────────────

#[test]
fn empty_input_is_typed() {
    let err = analyze(Vec::new(), ClassifierPolicy::TrendRsi).unwrap_err();
    assert_eq!(err, AnalysisError::EmptyInput);
    assert_eq!(err.report().kind, "empty_input");
}

#[test]
fn short_history_is_typed() {
    let bars = bars_from_closes(&zigzag_up(199));
    let err = analyze(bars, ClassifierPolicy::TrendRsi).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientHistory {
            bars: 199,
            required: 200
        }
    );
    assert_eq!(err.report().kind, "insufficient_history");
}

#[test]
fn nan_close_is_invalid_bar() {
    let mut bars = bars_from_closes(&zigzag_up(220));
    bars[150].close = f64::NAN;
    match analyze(bars, ClassifierPolicy::TrendRsi).unwrap_err() {
        AnalysisError::InvalidBar { index, reason, .. } => {
            assert_eq!(index, 150);
            assert_eq!(reason, BarError::NonFinitePrice { field: "close" });
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unordered_dates_are_invalid() {
    let mut bars = bars_from_closes(&zigzag_up(220));
    bars[10].date = bars[9].date;
    let err = analyze(bars, ClassifierPolicy::TrendRsi).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidBar { index: 10, .. }));
    assert_eq!(err.report().kind, "invalid_bar");
}
