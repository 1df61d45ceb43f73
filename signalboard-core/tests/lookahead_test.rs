//! Look-ahead contamination tests for every indicator and the aligned frame.
//!
//! Invariant: no value at bar t may depend on price data from bar t+1 or later.
//!
//! Method: compute on a truncated series and on the full series. Assert the
//! shared prefix is identical between both runs. Any difference means future
//! data is leaking into past values.

use chrono::NaiveDate;
use signalboard_core::domain::Bar;
use signalboard_core::indicators::*;
use signalboard_core::Analyzer;

/// Deterministic pseudo-random walk using a simple LCG.
fn make_test_closes(n: usize) -> Vec<f64> {
    let mut price: f64 = 100.0;
    (0..n)
        .map(|i| {
            let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
            let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
            price = (price + change).max(10.0);
            price
        })
        .collect()
}

fn make_test_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    make_test_closes(n)
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            let open = close - 0.5;
            Bar::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                close + 2.0,
                open - 2.0,
                close,
            )
        })
        .collect()
}

fn assert_no_lookahead(indicator: &dyn Indicator, full: &[f64], truncated_len: usize) {
    let truncated = &full[..truncated_len];
    let full_result = indicator.compute(full);
    let truncated_result = indicator.compute(truncated);

    assert_eq!(
        truncated_result.len(),
        truncated_len,
        "{}: truncated result length mismatch",
        indicator.name()
    );
    assert_eq!(
        full_result.len(),
        full.len(),
        "{}: full result length mismatch",
        indicator.name()
    );

    for i in 0..truncated_len {
        let t = truncated_result[i];
        let f = full_result[i];

        if t.is_nan() && f.is_nan() {
            continue;
        }

        assert!(
            !t.is_nan() && !f.is_nan(),
            "{}: NaN mismatch at bar {i} (truncated={t}, full={f})",
            indicator.name()
        );

        assert!(
            (t - f).abs() < 1e-10,
            "{}: look-ahead contamination at bar {i}: truncated={t}, full={f}, diff={}",
            indicator.name(),
            (t - f).abs()
        );
    }
}

#[test]
fn lookahead_sma() {
    let closes = make_test_closes(300);
    assert_no_lookahead(&Sma::new(50), &closes, 150);
    assert_no_lookahead(&Sma::new(200), &closes, 250);
}

#[test]
fn lookahead_ema() {
    let closes = make_test_closes(300);
    assert_no_lookahead(&Ema::new(12), &closes, 100);
    assert_no_lookahead(&Ema::new(26), &closes, 100);
}

#[test]
fn lookahead_rsi() {
    let closes = make_test_closes(300);
    assert_no_lookahead(&Rsi::new(14), &closes, 100);
    assert_no_lookahead(&Rsi::new(7), &closes, 100);
}

#[test]
fn lookahead_macd() {
    let closes = make_test_closes(300);
    assert_no_lookahead(&Macd::line(12, 26, 9), &closes, 100);
    assert_no_lookahead(&Macd::signal(12, 26, 9), &closes, 100);
    assert_no_lookahead(&Macd::histogram(12, 26, 9), &closes, 100);
}

#[test]
fn lookahead_bollinger() {
    let closes = make_test_closes(300);
    assert_no_lookahead(&Bollinger::upper(20, 2.0), &closes, 100);
    assert_no_lookahead(&Bollinger::middle(20, 2.0), &closes, 100);
    assert_no_lookahead(&Bollinger::lower(20, 2.0), &closes, 100);
}

#[test]
fn lookahead_aligned_frame() {
    let bars = make_test_bars(300);
    let analyzer = Analyzer::default();

    let full = analyzer.frame(bars.clone()).unwrap();
    let truncated = analyzer.frame(bars[..240].to_vec()).unwrap();

    assert_eq!(truncated.len(), 240 - 199);
    assert_eq!(full.len(), 300 - 199);
    assert_eq!(truncated.rows(), &full.rows()[..truncated.len()]);
}
