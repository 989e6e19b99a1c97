//! Pick aggregation: score a universe, rescale for the forecast horizon,
//! rank the survivors.

use crate::domain::error::PickerError;
use crate::domain::metrics::{calculate_metrics, MIN_BARS};
use crate::domain::scoring::{score_stock, ScoreWeights};
use crate::domain::strategy::Strategy;
use crate::ports::store_port::StorePort;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Default score cutoff for a pick to surface. Callers may fall back to 0
/// to list "potential" candidates when nothing clears this bar.
pub const DEFAULT_MIN_SCORE: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    Day,
    Week,
    Month,
    Quarter,
}

impl Horizon {
    /// Scale applied to the base one-day upside fraction.
    pub fn multiplier(&self) -> f64 {
        match self {
            Horizon::Day => 1.0,
            Horizon::Week => 2.0,
            Horizon::Month => 4.0,
            Horizon::Quarter => 8.0,
        }
    }

    pub fn all() -> &'static [Horizon] {
        &[Horizon::Day, Horizon::Week, Horizon::Month, Horizon::Quarter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Day => "day",
            Horizon::Week => "week",
            Horizon::Month => "month",
            Horizon::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Horizon::Day),
            "week" => Ok(Horizon::Week),
            "month" => Ok(Horizon::Month),
            "quarter" => Ok(Horizon::Quarter),
            other => Err(PickerError::InvalidArgument {
                name: "horizon".into(),
                reason: format!("unknown horizon '{other}'"),
            }),
        }
    }
}

/// One scored candidate. Ephemeral; recomputed on every request.
#[derive(Debug, Clone)]
pub struct Pick {
    pub ticker: String,
    pub strategy: Strategy,
    pub horizon: Horizon,
    pub current_price: f64,
    pub predicted_price: f64,
    pub upside_pct: f64,
    pub score: i32,
    pub signals: Vec<String>,
    pub volatility: f64,
    pub volume_change: f64,
    pub adx: f64,
    pub rvol: f64,
}

/// Immutable audit copy of a pick, keyed by (date, ticker, strategy,
/// horizon) in the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct PickRecord {
    pub date: NaiveDate,
    pub ticker: String,
    pub strategy: Strategy,
    pub horizon: Horizon,
    pub entry_price: f64,
    pub predicted_price: f64,
    pub confidence_score: i32,
    pub signals: String,
}

impl PickRecord {
    pub fn from_pick(pick: &Pick, date: NaiveDate) -> Self {
        PickRecord {
            date,
            ticker: pick.ticker.clone(),
            strategy: pick.strategy,
            horizon: pick.horizon,
            entry_price: pick.current_price,
            predicted_price: pick.predicted_price,
            confidence_score: pick.score,
            signals: pick.signals.join(", "),
        }
    }
}

/// Descending by score; ties keep universe order (stable sort).
pub fn rank_picks(picks: &mut [Pick]) {
    picks.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Score every eligible ticker in the universe and return the ranked
/// candidates at or above `min_score`.
///
/// Tickers with no stored data or fewer than [`MIN_BARS`] bars are
/// skipped outright — a `min_score` of 0 surfaces every scorable ticker,
/// not the unscorable ones.
pub fn get_top_picks(
    store: &dyn StorePort,
    universe: &[String],
    horizon: Horizon,
    strategy: Strategy,
    min_score: i32,
    weights: &ScoreWeights,
) -> Result<Vec<Pick>, PickerError> {
    let mut picks = Vec::new();

    for ticker in universe.iter().filter(|t| strategy.is_eligible(t)) {
        let bars = store.load_series(ticker)?;
        if bars.len() < MIN_BARS {
            continue;
        }

        let frame = calculate_metrics(ticker, &bars);
        let outcome = score_stock(&frame, strategy, weights);
        if outcome.score < min_score {
            continue;
        }

        let current = frame.last().expect("non-empty frame");
        let current_price = current.close;

        // Rescale the relative upside, not the absolute target.
        let base_upside = (outcome.target_price - current_price) / current_price;
        let predicted_price = current_price * (1.0 + base_upside * horizon.multiplier());

        let volume_change = if current.vol_sma_20 > 0.0 {
            (current.volume as f64 - current.vol_sma_20) / current.vol_sma_20
        } else {
            0.0
        };

        picks.push(Pick {
            ticker: ticker.clone(),
            strategy,
            horizon,
            current_price,
            predicted_price,
            upside_pct: ((predicted_price - current_price) / current_price) * 100.0,
            score: outcome.score,
            signals: outcome.reasons,
            volatility: current.volatility,
            volume_change,
            adx: current.adx,
            rvol: current.rvol,
        });
    }

    rank_picks(&mut picks);
    Ok(picks)
}
