//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::csv_market_data::CsvMarketData;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sqlite_store::SqliteStore;
use crate::domain::error::PickerError;
use crate::domain::ingest::{self, update_database};
use crate::domain::picks::{get_top_picks, Horizon, Pick, PickRecord, DEFAULT_MIN_SCORE};
use crate::domain::scoring::ScoreWeights;
use crate::domain::strategy::Strategy;
use crate::domain::universe::universe_from_config;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "stockpick", about = "Technical signal scanner and stock picker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch fresh bars from the data provider into the store
    Update {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Rank buy candidates for a strategy and horizon
    Picks {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value = "day")]
        horizon: String,
        #[arg(long, default_value = "balanced")]
        strategy: String,
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
        min_score: i32,
        /// Record today's top pick in the ledger
        #[arg(long)]
        save: bool,
    },
    /// List past recorded picks, newest first
    History {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show stored data range for ticker(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Update { config } => run_update(&config),
        Command::Picks {
            config,
            horizon,
            strategy,
            min_score,
            save,
        } => run_picks(&config, &horizon, &strategy, min_score, save),
        Command::History { config } => run_history(&config),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, PickerError> {
    FileConfigAdapter::from_file(path).map_err(|e| PickerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn open_store(config: &dyn ConfigPort) -> Result<SqliteStore, PickerError> {
    let store = SqliteStore::from_config(config)?;
    store.initialize_schema()?;
    Ok(store)
}

fn report(result: Result<(), PickerError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

fn run_update(config_path: &PathBuf) -> ExitCode {
    report((|| {
        let config = load_config(config_path)?;
        let store = open_store(&config)?;

        let csv_dir =
            config
                .get_string("csv", "path")
                .ok_or_else(|| PickerError::ConfigMissing {
                    section: "csv".into(),
                    key: "path".into(),
                })?;
        let provider = CsvMarketData::new(PathBuf::from(csv_dir));

        let universe = universe_from_config(&config)?;
        let lookback =
            config.get_int("ingest", "lookback_days", ingest::DEFAULT_LOOKBACK_DAYS as i64) as u32;
        let delay_ms =
            config.get_int("ingest", "delay_ms", ingest::DEFAULT_FETCH_DELAY_MS as i64) as u64;

        let summary = update_database(
            &provider,
            &store,
            &universe,
            lookback,
            Duration::from_millis(delay_ms),
        )?;

        println!(
            "Update complete: {} tickers updated, {} skipped, {} bars inserted",
            summary.tickers_updated, summary.tickers_skipped, summary.bars_inserted
        );
        Ok(())
    })())
}

fn run_picks(
    config_path: &PathBuf,
    horizon: &str,
    strategy: &str,
    min_score: i32,
    save: bool,
) -> ExitCode {
    report((|| {
        let horizon: Horizon = horizon.parse()?;
        let strategy: Strategy = strategy.parse()?;

        let config = load_config(config_path)?;
        let store = open_store(&config)?;
        let weights = ScoreWeights::from_config(&config);
        let universe = universe_from_config(&config)?;

        let mut picks = get_top_picks(&store, &universe, horizon, strategy, min_score, &weights)?;

        if picks.is_empty() && min_score > 0 {
            // fall back to "potential" candidates rather than an empty table
            picks = get_top_picks(&store, &universe, horizon, strategy, 0, &weights)?;
            if !picks.is_empty() {
                println!(
                    "No picks scored {} or better for {strategy}/{horizon}; showing potential candidates.",
                    min_score
                );
            }
        }

        if picks.is_empty() {
            println!("No candidates for {strategy}/{horizon}.");
            return Ok(());
        }

        print_picks(&picks);

        if save {
            let today = chrono::Local::now().date_naive();
            let best = &picks[0];
            let record = PickRecord::from_pick(best, today);
            if store.record_pick(&record)? {
                println!("Recorded top pick {} for {}", best.ticker, today);
            } else {
                println!(
                    "Top pick for {}/{} already recorded today",
                    strategy, horizon
                );
            }
        }

        Ok(())
    })())
}

fn print_picks(picks: &[Pick]) {
    println!(
        "{:<6} {:>5} {:>10} {:>10} {:>8} {:>7}  {}",
        "TICKER", "SCORE", "PRICE", "TARGET", "UPSIDE", "RVOL", "SIGNALS"
    );
    for pick in picks {
        println!(
            "{:<6} {:>5} {:>10.2} {:>10.2} {:>7.2}% {:>7.2}  {}",
            pick.ticker,
            pick.score,
            pick.current_price,
            pick.predicted_price,
            pick.upside_pct,
            pick.rvol,
            pick.signals.join(", ")
        );
    }
}

fn run_history(config_path: &PathBuf) -> ExitCode {
    report((|| {
        let config = load_config(config_path)?;
        let store = open_store(&config)?;

        let picks = store.list_picks()?;
        if picks.is_empty() {
            println!("No recorded picks.");
            return Ok(());
        }

        for record in picks {
            println!(
                "{} {:<6} {:<12} {:<7} entry {:>8.2} target {:>8.2} score {:>3}  {}",
                record.date,
                record.ticker,
                record.strategy,
                record.horizon,
                record.entry_price,
                record.predicted_price,
                record.confidence_score,
                record.signals
            );
        }
        Ok(())
    })())
}

fn run_info(config_path: &PathBuf, ticker: Option<&str>) -> ExitCode {
    report((|| {
        let config = load_config(config_path)?;
        let store = open_store(&config)?;

        let tickers = match ticker {
            Some(t) => vec![t.to_uppercase()],
            None => universe_from_config(&config)?,
        };

        for ticker in &tickers {
            match store.data_range(ticker)? {
                Some((min, max, count)) => {
                    println!("{}: {} bars from {} to {}", ticker, count, min, max)
                }
                None => println!("{}: no data", ticker),
            }
        }
        Ok(())
    })())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_args_parse_with_defaults() {
        let cli = Cli::try_parse_from(["stockpick", "picks", "-c", "config.ini"]).unwrap();
        match cli.command {
            Command::Picks {
                horizon,
                strategy,
                min_score,
                save,
                ..
            } => {
                assert_eq!(horizon, "day");
                assert_eq!(strategy, "balanced");
                assert_eq!(min_score, DEFAULT_MIN_SCORE);
                assert!(!save);
            }
            other => panic!("expected Picks, got {:?}", other),
        }
    }

    #[test]
    fn update_requires_config() {
        assert!(Cli::try_parse_from(["stockpick", "update"]).is_err());
    }

    #[test]
    fn picks_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "stockpick",
            "picks",
            "-c",
            "config.ini",
            "--horizon",
            "month",
            "--strategy",
            "moonshot",
            "--min-score",
            "0",
            "--save",
        ])
        .unwrap();
        match cli.command {
            Command::Picks {
                horizon,
                strategy,
                min_score,
                save,
                ..
            } => {
                assert_eq!(horizon, "month");
                assert_eq!(strategy, "moonshot");
                assert_eq!(min_score, 0);
                assert!(save);
            }
            other => panic!("expected Picks, got {:?}", other),
        }
    }
}
