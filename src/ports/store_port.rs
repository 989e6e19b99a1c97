//! Time-series store and pick ledger boundary.

use crate::domain::error::PickerError;
use crate::domain::ohlcv::Bar;
use crate::domain::picks::{Horizon, PickRecord};
use crate::domain::strategy::Strategy;
use chrono::{NaiveDate, NaiveDateTime};

pub trait StorePort {
    /// Merge new bars for one ticker. Idempotent: only bars strictly newer
    /// than the ticker's stored watermark are written. Returns the number
    /// of bars actually inserted.
    fn append_bars(&self, ticker: &str, bars: &[Bar]) -> Result<usize, PickerError>;

    /// All stored bars for the ticker, ascending by timestamp. Empty when
    /// nothing is stored.
    fn load_series(&self, ticker: &str) -> Result<Vec<Bar>, PickerError>;

    /// (oldest, newest, count) of stored bars, or None when empty.
    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, PickerError>;

    /// Insert unless a record with the same (date, ticker, strategy,
    /// horizon) key exists. Returns whether an insert occurred.
    fn record_pick(&self, record: &PickRecord) -> Result<bool, PickerError>;

    fn pick_exists(
        &self,
        date: NaiveDate,
        ticker: &str,
        strategy: Strategy,
        horizon: Horizon,
    ) -> Result<bool, PickerError>;

    /// All recorded picks, descending by date.
    fn list_picks(&self) -> Result<Vec<PickRecord>, PickerError>;
}
