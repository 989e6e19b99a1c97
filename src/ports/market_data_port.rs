//! External market-data provider boundary.
//!
//! The provider is an opaque collaborator: given a ticker and a lookback
//! window it either returns hourly bars or fails for that ticker alone.
//! Ingestion treats any error here as a per-ticker skip, never a batch
//! abort.

use crate::domain::error::PickerError;
use crate::domain::ohlcv::Bar;

pub trait MarketDataPort {
    /// Fetch up to `lookback_days` of hourly history for one ticker,
    /// oldest first. An empty result means the provider has no data.
    fn fetch_history(&self, ticker: &str, lookback_days: u32) -> Result<Vec<Bar>, PickerError>;
}
