//! CSV-file market-data adapter.
//!
//! A file-per-ticker stand-in for a live quote provider: `{base}/{TICKER}.csv`
//! with a header row and columns timestamp, open, high, low, close, volume.
//! The lookback window is anchored at the newest row in the file, so a
//! snapshot of historical data behaves the same on every run.

use crate::domain::error::PickerError;
use crate::domain::ohlcv::Bar;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvMarketData {
    base_path: PathBuf,
}

impl CsvMarketData {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl MarketDataPort for CsvMarketData {
    fn fetch_history(&self, ticker: &str, lookback_days: u32) -> Result<Vec<Bar>, PickerError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| PickerError::Fetch {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let fetch_err = |reason: String| PickerError::Fetch {
            ticker: ticker.to_string(),
            reason,
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| fetch_err(format!("CSV parse error: {}", e)))?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .ok_or_else(|| fetch_err(format!("missing {} column", name)))
            };

            let timestamp = NaiveDateTime::parse_from_str(field(0, "timestamp")?, TS_FORMAT)
                .map_err(|e| fetch_err(format!("invalid timestamp: {}", e)))?;

            let parse_f64 = |idx: usize, name: &str| -> Result<f64, PickerError> {
                field(idx, name)?
                    .parse()
                    .map_err(|e| fetch_err(format!("invalid {} value: {}", name, e)))
            };

            bars.push(Bar {
                ticker: ticker.to_string(),
                timestamp,
                open: parse_f64(1, "open")?,
                high: parse_f64(2, "high")?,
                low: parse_f64(3, "low")?,
                close: parse_f64(4, "close")?,
                volume: field(5, "volume")?
                    .parse()
                    .map_err(|e| fetch_err(format!("invalid volume value: {}", e)))?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);

        if let Some(newest) = bars.last().map(|b| b.timestamp) {
            let cutoff = newest - chrono::Duration::days(lookback_days as i64);
            bars.retain(|b| b.timestamp >= cutoff);
        }

        Ok(bars)
    }
}
