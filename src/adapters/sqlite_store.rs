//! SQLite store adapter: hourly price history plus the pick ledger.
//!
//! `stock_prices` is append-only, keyed by (ticker, timestamp). Appends go
//! through a per-ticker watermark — only bars strictly newer than the
//! stored maximum are written — which makes re-ingesting the same batch a
//! no-op without needing upsert support. `past_picks` carries a uniqueness
//! constraint over (date, ticker, strategy, timeframe); duplicate writes
//! are detected up front and reported as "no insert", never as an error.

use crate::domain::error::PickerError;
use crate::domain::ohlcv::Bar;
use crate::domain::picks::{Horizon, PickRecord};
use crate::domain::strategy::Strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;
use chrono::{NaiveDate, NaiveDateTime};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PickerError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| PickerError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| PickerError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, PickerError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| PickerError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn initialize_schema(&self) -> Result<(), PickerError> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS stock_prices (
                ticker TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                volume INTEGER NOT NULL,
                PRIMARY KEY (ticker, timestamp)
            );
            CREATE TABLE IF NOT EXISTS past_picks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                ticker TEXT NOT NULL,
                strategy TEXT NOT NULL,
                timeframe TEXT NOT NULL,
                entry_price REAL NOT NULL,
                predicted_price REAL NOT NULL,
                confidence_score INTEGER NOT NULL,
                signals TEXT NOT NULL,
                UNIQUE (date, ticker, strategy, timeframe)
            );",
        )
        .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn conn(
        &self,
    ) -> Result<r2d2::PooledConnection<SqliteConnectionManager>, PickerError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| PickerError::Database {
                reason: e.to_string(),
            })
    }

    fn watermark(
        conn: &rusqlite::Connection,
        ticker: &str,
    ) -> Result<Option<NaiveDateTime>, PickerError> {
        let max: Option<String> = conn
            .query_row(
                "SELECT MAX(timestamp) FROM stock_prices WHERE ticker = ?1",
                params![ticker],
                |row| row.get(0),
            )
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        match max {
            Some(ts) => NaiveDateTime::parse_from_str(&ts, TS_FORMAT)
                .map(Some)
                .map_err(|e: chrono::ParseError| PickerError::Database {
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }
}

impl StorePort for SqliteStore {
    fn append_bars(&self, ticker: &str, bars: &[Bar]) -> Result<usize, PickerError> {
        let mut conn = self.conn()?;
        let watermark = Self::watermark(&conn, ticker)?;

        let fresh: Vec<&Bar> = bars
            .iter()
            .filter(|b| match watermark {
                Some(mark) => b.timestamp > mark,
                None => true,
            })
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        let tx = conn
            .transaction()
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        for bar in &fresh {
            tx.execute(
                "INSERT INTO stock_prices (ticker, timestamp, open, high, low, close, volume)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    ticker,
                    bar.timestamp.format(TS_FORMAT).to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume
                ],
            )
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        Ok(fresh.len())
    }

    fn load_series(&self, ticker: &str) -> Result<Vec<Bar>, PickerError> {
        let conn = self.conn()?;

        let query = "SELECT ticker, timestamp, open, high, low, close, volume
                     FROM stock_prices
                     WHERE ticker = ?1
                     ORDER BY timestamp ASC";

        let mut stmt = conn
            .prepare(query)
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let rows = stmt
            .query_map(params![ticker], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = NaiveDateTime::parse_from_str(&ts_str, TS_FORMAT).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        ts_str.len(),
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(Bar {
                    ticker: row.get(0)?,
                    timestamp,
                    open: row.get(2)?,
                    high: row.get(3)?,
                    low: row.get(4)?,
                    close: row.get(5)?,
                    volume: row.get(6)?,
                })
            })
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut bars = Vec::new();
        for row in rows {
            bars.push(row.map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?);
        }

        Ok(bars)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, PickerError> {
        let conn = self.conn()?;

        let query =
            "SELECT MIN(timestamp), MAX(timestamp), COUNT(*) FROM stock_prices WHERE ticker = ?1";

        let result: (Option<String>, Option<String>, i64) = conn
            .query_row(query, params![ticker], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        match result {
            (Some(min_str), Some(max_str), count) if count > 0 => {
                let min = NaiveDateTime::parse_from_str(&min_str, TS_FORMAT).map_err(
                    |e: chrono::ParseError| PickerError::Database {
                        reason: e.to_string(),
                    },
                )?;
                let max = NaiveDateTime::parse_from_str(&max_str, TS_FORMAT).map_err(
                    |e: chrono::ParseError| PickerError::Database {
                        reason: e.to_string(),
                    },
                )?;
                Ok(Some((min, max, count as usize)))
            }
            _ => Ok(None),
        }
    }

    fn record_pick(&self, record: &PickRecord) -> Result<bool, PickerError> {
        if self.pick_exists(record.date, &record.ticker, record.strategy, record.horizon)? {
            return Ok(false);
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO past_picks
                 (date, ticker, strategy, timeframe, entry_price, predicted_price, confidence_score, signals)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.date.format(DATE_FORMAT).to_string(),
                record.ticker,
                record.strategy.as_str(),
                record.horizon.as_str(),
                record.entry_price,
                record.predicted_price,
                record.confidence_score,
                record.signals
            ],
        )
        .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(true)
    }

    fn pick_exists(
        &self,
        date: NaiveDate,
        ticker: &str,
        strategy: Strategy,
        horizon: Horizon,
    ) -> Result<bool, PickerError> {
        let conn = self.conn()?;

        let found: Option<i64> = conn
            .query_row(
                "SELECT id FROM past_picks
                 WHERE date = ?1 AND ticker = ?2 AND strategy = ?3 AND timeframe = ?4",
                params![
                    date.format(DATE_FORMAT).to_string(),
                    ticker,
                    strategy.as_str(),
                    horizon.as_str()
                ],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        Ok(found.is_some())
    }

    fn list_picks(&self) -> Result<Vec<PickRecord>, PickerError> {
        let conn = self.conn()?;

        let query = "SELECT date, ticker, strategy, timeframe,
                            entry_price, predicted_price, confidence_score, signals
                     FROM past_picks
                     ORDER BY date DESC, id DESC";

        let mut stmt = conn
            .prepare(query)
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let rows = stmt
            .query_map([], |row| {
                let date_str: String = row.get(0)?;
                let strategy_str: String = row.get(2)?;
                let horizon_str: String = row.get(3)?;

                let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        date_str.len(),
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                let strategy: Strategy = strategy_str.parse().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        strategy_str.len(),
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                let horizon: Horizon = horizon_str.parse().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        horizon_str.len(),
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;

                Ok(PickRecord {
                    date,
                    ticker: row.get(1)?,
                    strategy,
                    horizon,
                    entry_price: row.get(4)?,
                    predicted_price: row.get(5)?,
                    confidence_score: row.get(6)?,
                    signals: row.get(7)?,
                })
            })
            .map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut picks = Vec::new();
        for row in rows {
            picks.push(row.map_err(|e: rusqlite::Error| PickerError::DatabaseQuery {
                reason: e.to_string(),
            })?);
        }

        Ok(picks)
    }
}
