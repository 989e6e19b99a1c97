//! ATR (Average True Range) indicator, used for target-price sizing.
//!
//! True range for the first bar is high - low; afterwards it spans any gap
//! from the previous close. Seed with the simple mean of the first n true
//! ranges, then Wilder smoothing: atr = (prev_atr * (n-1) + tr) / n.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub fn calculate_atr(bars: &[Bar], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Atr(period),
            values: Vec::new(),
        };
    }

    let mut tr_values: Vec<f64> = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let tr = if i == 0 {
            bar.high - bar.low
        } else {
            bar.true_range(bars[i - 1].close)
        };
        tr_values.push(tr);
    }

    let mut values: Vec<IndicatorPoint> = Vec::with_capacity(bars.len());
    let mut atr = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i < period - 1 {
            values.push(IndicatorPoint {
                timestamp: bar.timestamp,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
            continue;
        }

        if i == period - 1 {
            atr = tr_values[0..=i].iter().sum::<f64>() / period as f64;
        } else {
            atr = (atr * (period - 1) as f64 + tr_values[i]) / period as f64;
        }
        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid: true,
            value: IndicatorValue::Simple(atr),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Atr(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
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

    #[test]
    fn atr_warmup() {
        let bars: Vec<Bar> = (0..5).map(|i| make_bar(i, 110.0, 90.0, 100.0)).collect();
        let series = calculate_atr(&bars, 3);

        assert_eq!(series.values.len(), 5);
        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn atr_seed_is_average() {
        let bars = vec![
            make_bar(0, 110.0, 100.0, 105.0),
            make_bar(1, 115.0, 105.0, 110.0),
            make_bar(2, 120.0, 110.0, 115.0),
        ];

        let series = calculate_atr(&bars, 3);
        let expected = (10.0 + 10.0 + 10.0) / 3.0;
        assert_relative_eq!(series.values[2].value.simple(), expected);
    }

    #[test]
    fn atr_wilder_smoothing() {
        let bars = vec![
            make_bar(0, 110.0, 100.0, 105.0),
            make_bar(1, 115.0, 105.0, 110.0),
            make_bar(2, 120.0, 110.0, 115.0),
            make_bar(3, 125.0, 115.0, 120.0),
        ];

        let series = calculate_atr(&bars, 3);
        let seed = 10.0;
        let expected = (seed * 2.0 + 10.0) / 3.0;
        assert_relative_eq!(series.values[3].value.simple(), expected);
    }

    #[test]
    fn atr_gap_counts_toward_range() {
        let bars = vec![
            make_bar(0, 110.0, 100.0, 105.0),
            // opens far above the previous close
            make_bar(1, 130.0, 120.0, 125.0),
        ];

        let series = calculate_atr(&bars, 2);
        // TR[0]=10, TR[1]=max(10, |130-105|, |120-105|)=25 → seed (10+25)/2
        assert!((series.values[1].value.simple() - 17.5).abs() < 1e-9);
    }

    #[test]
    fn atr_short_series_all_invalid() {
        let bars: Vec<Bar> = (0..2).map(|i| make_bar(i, 110.0, 90.0, 100.0)).collect();
        let series = calculate_atr(&bars, 5);
        assert_eq!(series.values.len(), 2);
        for point in &series.values {
            assert!(!point.valid);
        }
    }
}
