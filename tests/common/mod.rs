#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use stockpick::adapters::sqlite_store::SqliteStore;
use stockpick::domain::error::PickerError;
pub use stockpick::domain::ohlcv::Bar;
use stockpick::ports::market_data_port::MarketDataPort;
use stockpick::ports::store_port::StorePort;

pub struct MockProvider {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockProvider {
    fn fetch_history(&self, ticker: &str, _lookback_days: u32) -> Result<Vec<Bar>, PickerError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(PickerError::Fetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub fn start_of(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn make_bar(ticker: &str, hour: usize, close: f64, volume: i64) -> Bar {
    Bar {
        ticker: ticker.to_string(),
        timestamp: start_of(2024, 1, 1) + chrono::Duration::hours(hour as i64),
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume,
    }
}

/// Steadily rising hourly series with flat volume: scores as a clean
/// uptrend under every profile.
pub fn trending_series(ticker: &str, n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| make_bar(ticker, i, 100.0 + i as f64 * 0.5, 10_000))
        .collect()
}

/// Drifting-down series: finishes below its long moving averages.
pub fn declining_series(ticker: &str, n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| make_bar(ticker, i, 500.0 - i as f64 * 0.5, 10_000))
        .collect()
}

pub fn seeded_store(series: &[(&str, Vec<Bar>)]) -> SqliteStore {
    let store = SqliteStore::in_memory().unwrap();
    store.initialize_schema().unwrap();
    for (ticker, bars) in series {
        store.append_bars(ticker, bars).unwrap();
    }
    store
}
