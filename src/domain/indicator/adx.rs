//! ADX (Average Directional Index) trend-strength indicator.
//!
//! Directional movement per bar: +DM = high - prev_high when that exceeds
//! both zero and the downward move; -DM symmetric. +DM, -DM and true range
//! are Wilder-smoothed over n bars, giving +DI and -DI as percentages of
//! smoothed TR. DX = 100 * |+DI - -DI| / (+DI + -DI), and ADX is the
//! Wilder average of DX.
//!
//! Warmup: first (2n - 1) bars are invalid — n bars for the first smoothed
//! DI reading, another n DX values for the first ADX.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub fn calculate_adx(bars: &[Bar], period: usize) -> IndicatorSeries {
    let n = bars.len();

    let invalid = |bar: &Bar| IndicatorPoint {
        timestamp: bar.timestamp,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    };

    if period == 0 || n < 2 * period {
        return IndicatorSeries {
            indicator_type: IndicatorType::Adx(period),
            values: bars.iter().map(invalid).collect(),
        };
    }

    let mut tr = vec![0.0; n];
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    for i in 1..n {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        plus_dm[i] = if up > down && up > 0.0 { up } else { 0.0 };
        minus_dm[i] = if down > up && down > 0.0 { down } else { 0.0 };
        tr[i] = bars[i].true_range(bars[i - 1].close);
    }

    // Wilder smoothing: seed with the sum of the first n movements, then
    // sm = sm - sm/n + current.
    let mut sm_tr: f64 = tr[1..=period].iter().sum();
    let mut sm_plus: f64 = plus_dm[1..=period].iter().sum();
    let mut sm_minus: f64 = minus_dm[1..=period].iter().sum();

    let mut dx = vec![0.0; n];
    dx[period] = directional_index(sm_plus, sm_minus, sm_tr);

    for i in (period + 1)..n {
        sm_tr = sm_tr - sm_tr / period as f64 + tr[i];
        sm_plus = sm_plus - sm_plus / period as f64 + plus_dm[i];
        sm_minus = sm_minus - sm_minus / period as f64 + minus_dm[i];
        dx[i] = directional_index(sm_plus, sm_minus, sm_tr);
    }

    let warmup = 2 * period - 1;
    let mut adx = dx[period..=warmup].iter().sum::<f64>() / period as f64;

    let mut values = Vec::with_capacity(n);
    for (i, bar) in bars.iter().enumerate() {
        if i < warmup {
            values.push(invalid(bar));
            continue;
        }
        if i > warmup {
            adx = (adx * (period - 1) as f64 + dx[i]) / period as f64;
        }
        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid: true,
            value: IndicatorValue::Simple(adx),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Adx(period),
        values,
    }
}

fn directional_index(sm_plus: f64, sm_minus: f64, sm_tr: f64) -> f64 {
    if sm_tr == 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * sm_plus / sm_tr;
    let minus_di = 100.0 * sm_minus / sm_tr;
    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        0.0
    } else {
        100.0 * (plus_di - minus_di).abs() / di_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(hour: u32, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            ticker: "TEST".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + chrono::Duration::hours(hour as i64),
            open: close,
            high,
            low,
            close,
            volume: 1000,
        }
    }

    /// Steady one-point-per-bar climb.
    fn trending_bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                make_bar(i as u32, base + 1.0, base - 1.0, base)
            })
            .collect()
    }

    #[test]
    fn adx_warmup() {
        let bars = trending_bars(40);
        let series = calculate_adx(&bars, 14);

        for i in 0..27 {
            assert!(!series.values[i].valid, "Bar {} should be invalid", i);
        }
        assert!(series.values[27].valid);
    }

    #[test]
    fn adx_strong_trend_reads_high() {
        let bars = trending_bars(60);
        let series = calculate_adx(&bars, 14);

        let last = series.values.last().unwrap();
        assert!(last.valid);
        // A one-directional march should read as a very strong trend.
        assert!(
            last.value.simple() > 25.0,
            "ADX {} too low for a steady trend",
            last.value.simple()
        );
    }

    #[test]
    fn adx_flat_market_reads_zero() {
        let bars: Vec<Bar> = (0..60).map(|i| make_bar(i, 100.0, 100.0, 100.0)).collect();
        let series = calculate_adx(&bars, 14);

        let last = series.values.last().unwrap();
        assert!(last.valid);
        assert!(last.value.simple().abs() < f64::EPSILON);
    }

    #[test]
    fn adx_in_range() {
        let bars: Vec<Bar> = (0..80)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.7).sin() * 10.0;
                make_bar(i, base + 2.0, base - 2.0, base)
            })
            .collect();
        let series = calculate_adx(&bars, 14);

        for point in &series.values {
            if point.valid {
                let v = point.value.simple();
                assert!((0.0..=100.0).contains(&v), "ADX {} out of range", v);
            }
        }
    }

    #[test]
    fn adx_short_series_all_invalid() {
        let bars = trending_bars(20);
        let series = calculate_adx(&bars, 14);
        assert_eq!(series.values.len(), 20);
        for point in &series.values {
            assert!(!point.valid);
        }
    }
}
