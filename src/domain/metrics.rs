//! Indicator frame assembly.
//!
//! `calculate_metrics` runs every indicator the scoring engine reads and
//! flattens them into one row per bar. Rows never carry undefined values:
//! warm-up and degenerate readings are replaced with a fixed per-column
//! neutral default (0, bands fall back to the close, relative volume to 1),
//! so scoring never has to branch on missing data.

use crate::domain::indicator::adx::calculate_adx;
use crate::domain::indicator::atr::calculate_atr;
use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::macd::calculate_macd_default;
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::{calculate_sma, calculate_volume_sma};
use crate::domain::indicator::IndicatorValue;
use crate::domain::ohlcv::Bar;
use chrono::NaiveDateTime;

/// Minimum series length before any indicator column is trusted.
pub const MIN_BARS: usize = 50;

#[derive(Debug, Clone)]
pub struct IndicatorRow {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub volume: i64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    pub adx: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub bb_lower: f64,
    pub bb_upper: f64,
    pub volatility: f64,
    pub atr: f64,
    pub vol_sma_20: f64,
    pub rvol: f64,
}

impl IndicatorRow {
    fn neutral(bar: &Bar) -> Self {
        IndicatorRow {
            timestamp: bar.timestamp,
            close: bar.close,
            volume: bar.volume,
            sma_20: 0.0,
            sma_50: 0.0,
            sma_200: 0.0,
            adx: 0.0,
            rsi: 0.0,
            macd: 0.0,
            macd_signal: 0.0,
            bb_lower: bar.close,
            bb_upper: bar.close,
            volatility: 0.0,
            atr: 0.0,
            vol_sma_20: 0.0,
            rvol: 0.0,
        }
    }

    /// Replace anything non-finite with the column's neutral default.
    fn sanitize(&mut self) {
        for field in [
            &mut self.sma_20,
            &mut self.sma_50,
            &mut self.sma_200,
            &mut self.adx,
            &mut self.rsi,
            &mut self.macd,
            &mut self.macd_signal,
            &mut self.volatility,
            &mut self.atr,
            &mut self.vol_sma_20,
        ] {
            if !field.is_finite() {
                *field = 0.0;
            }
        }
        if !self.bb_lower.is_finite() {
            self.bb_lower = self.close;
        }
        if !self.bb_upper.is_finite() {
            self.bb_upper = self.close;
        }
        if !self.rvol.is_finite() {
            self.rvol = 1.0;
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub ticker: String,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }
}

/// Derive the full indicator frame for one ticker's bar series.
///
/// Series shorter than [`MIN_BARS`] get all-neutral rows rather than an
/// error; callers gate on length, not on missing columns.
pub fn calculate_metrics(ticker: &str, bars: &[Bar]) -> IndicatorFrame {
    if bars.len() < MIN_BARS {
        return IndicatorFrame {
            ticker: ticker.to_string(),
            rows: bars.iter().map(IndicatorRow::neutral).collect(),
        };
    }

    let sma_20 = calculate_sma(bars, 20);
    let sma_50 = calculate_sma(bars, 50);
    let sma_200 = calculate_sma(bars, 200);
    let adx = calculate_adx(bars, 14);
    let rsi = calculate_rsi(bars, 14);
    let macd = calculate_macd_default(bars);
    let bollinger = calculate_bollinger(bars, 20, 200);
    let atr = calculate_atr(bars, 14);
    let vol_sma = calculate_volume_sma(bars, 20);

    let simple_at = |series: &crate::domain::indicator::IndicatorSeries, i: usize| -> f64 {
        let point = &series.values[i];
        if point.valid {
            point.value.simple()
        } else {
            0.0
        }
    };

    let mut rows = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let mut row = IndicatorRow::neutral(bar);
        row.sma_20 = simple_at(&sma_20, i);
        row.sma_50 = simple_at(&sma_50, i);
        row.sma_200 = simple_at(&sma_200, i);
        row.adx = simple_at(&adx, i);
        row.rsi = simple_at(&rsi, i);
        row.atr = simple_at(&atr, i);
        row.vol_sma_20 = simple_at(&vol_sma, i);

        let macd_point = &macd.values[i];
        if macd_point.valid {
            if let IndicatorValue::Macd { line, signal, .. } = macd_point.value {
                row.macd = line;
                row.macd_signal = signal;
            }
        }

        let bb_point = &bollinger.values[i];
        if bb_point.valid {
            if let IndicatorValue::Bollinger { upper, lower, .. } = bb_point.value {
                row.bb_upper = upper;
                row.bb_lower = lower;
                if bar.close > 0.0 {
                    row.volatility = (upper - lower) / bar.close;
                }
            }
        }

        row.rvol = if row.vol_sma_20 > 0.0 {
            bar.volume as f64 / row.vol_sma_20
        } else {
            1.0
        };

        row.sanitize();
        rows.push(row);
    }

    IndicatorFrame {
        ticker: ticker.to_string(),
        rows,
    }
}
