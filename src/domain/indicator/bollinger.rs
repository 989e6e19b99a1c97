//! Bollinger Bands indicator.
//!
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub fn calculate_bollinger(bars: &[Bar], period: usize, stddev_mult_x100: u32) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let warmup = period.saturating_sub(1);
    let mult = stddev_mult_x100 as f64 / 100.0;

    for i in 0..bars.len() {
        let valid = period > 0 && i >= warmup;

        let (upper, middle, lower) = if valid {
            let start = i + 1 - period;
            let window = &bars[start..=i];

            let middle_val: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;

            let variance: f64 = window
                .iter()
                .map(|b| {
                    let diff = b.close - middle_val;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;

            let stddev = variance.sqrt();
            (middle_val + mult * stddev, middle_val, middle_val - mult * stddev)
        } else {
            (0.0, 0.0, 0.0)
        };

        values.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid,
            value: IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<Bar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                ticker: "TEST".into(),
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn bollinger_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0]);
        let series = calculate_bollinger(&bars, 3, 200);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
    }

    #[test]
    fn bollinger_flat_prices_zero_width() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let series = calculate_bollinger(&bars, 3, 200);

        if let IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
        } = series.values[3].value
        {
            assert!((upper - 100.0).abs() < 1e-9);
            assert!((middle - 100.0).abs() < 1e-9);
            assert!((lower - 100.0).abs() < 1e-9);
        } else {
            panic!("Expected Bollinger value");
        }
    }

    #[test]
    fn bollinger_known_values() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 200);

        // middle = 20, population stddev = sqrt(200/3)
        let stddev = (200.0_f64 / 3.0).sqrt();
        if let IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
        } = series.values[2].value
        {
            assert!((middle - 20.0).abs() < 1e-9);
            assert!((upper - (20.0 + 2.0 * stddev)).abs() < 1e-9);
            assert!((lower - (20.0 - 2.0 * stddev)).abs() < 1e-9);
        } else {
            panic!("Expected Bollinger value");
        }
    }

    #[test]
    fn bollinger_upper_above_lower() {
        let bars = make_bars(&[10.0, 25.0, 15.0, 30.0, 20.0]);
        let series = calculate_bollinger(&bars, 3, 200);

        for point in &series.values {
            if point.valid {
                if let IndicatorValue::Bollinger { upper, lower, .. } = point.value {
                    assert!(upper >= lower);
                }
            }
        }
    }

    #[test]
    fn bollinger_period_0_all_invalid() {
        let bars = make_bars(&[10.0, 20.0]);
        let series = calculate_bollinger(&bars, 0, 200);
        for point in &series.values {
            assert!(!point.valid);
        }
    }
}
