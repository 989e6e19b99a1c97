//! Incremental ingestion: provider → time-series store.
//!
//! One pass over the universe. Each ticker is fetched and handed to the
//! store's watermark append; a provider failure or empty result skips that
//! ticker with a warning and the batch keeps going. A small delay between
//! fetches keeps the provider's rate limiter happy.

use crate::domain::error::PickerError;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::store_port::StorePort;
use std::thread;
use std::time::Duration;

/// One year of hourly bars: covers the 200-bar SMA warm-up many times over.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

pub const DEFAULT_FETCH_DELAY_MS: u64 = 500;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub tickers_updated: usize,
    pub tickers_skipped: usize,
    pub bars_inserted: usize,
}

pub fn update_database(
    provider: &dyn MarketDataPort,
    store: &dyn StorePort,
    universe: &[String],
    lookback_days: u32,
    fetch_delay: Duration,
) -> Result<IngestSummary, PickerError> {
    let mut summary = IngestSummary::default();

    for (i, ticker) in universe.iter().enumerate() {
        if i > 0 && !fetch_delay.is_zero() {
            thread::sleep(fetch_delay);
        }

        let bars = match provider.fetch_history(ticker, lookback_days) {
            Ok(bars) => bars,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", ticker, e);
                summary.tickers_skipped += 1;
                continue;
            }
        };

        if bars.is_empty() {
            eprintln!("Warning: no data found for {}", ticker);
            summary.tickers_skipped += 1;
            continue;
        }

        // Store failures are ours, not the provider's; they do abort.
        let inserted = store.append_bars(ticker, &bars)?;
        summary.tickers_updated += 1;
        summary.bars_inserted += inserted;
    }

    Ok(summary)
}
