//! Simple Moving Average over close or volume.
//!
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub fn calculate_sma(bars: &[Bar], period: usize) -> IndicatorSeries {
    rolling_mean(bars, period, |b| b.close, IndicatorType::Sma(period))
}

/// SMA of volume, used for relative-volume readings.
pub fn calculate_volume_sma(bars: &[Bar], period: usize) -> IndicatorSeries {
    rolling_mean(
        bars,
        period,
        |b| b.volume as f64,
        IndicatorType::VolSma(period),
    )
}

fn rolling_mean(
    bars: &[Bar],
    period: usize,
    field: impl Fn(&Bar) -> f64,
    indicator_type: IndicatorType,
) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries {
            indicator_type,
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += field(bar);
        if i >= period {
            sum -= field(&bars[i - period]);
        }

        let valid = i >= period - 1;
        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid,
            value: IndicatorValue::Simple(if valid { sum / period as f64 } else { 0.0 }),
        });
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}
