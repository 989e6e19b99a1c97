//! Ticker universe: the fixed set of instruments the engine scans.
//!
//! The default universe is the union of the strategy allow-lists plus the
//! index funds; a `[universe] tickers` config entry overrides it with a
//! comma-separated list.

use crate::domain::error::PickerError;
use crate::domain::strategy::{CONSERVATIVE_TICKERS, INDICES, MOONSHOT_TICKERS};
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn default_universe() -> Vec<String> {
    CONSERVATIVE_TICKERS
        .iter()
        .chain(MOONSHOT_TICKERS)
        .chain(INDICES)
        .map(|t| t.to_string())
        .collect()
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}

pub fn universe_from_config(config: &dyn ConfigPort) -> Result<Vec<String>, PickerError> {
    match config.get_string("universe", "tickers") {
        Some(list) => parse_tickers(&list).map_err(|e| PickerError::ConfigInvalid {
            section: "universe".into(),
            key: "tickers".into(),
            reason: e.to_string(),
        }),
        None => Ok(default_universe()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_universe_covers_all_profiles() {
        let universe = default_universe();
        assert!(universe.contains(&"KO".to_string()));
        assert!(universe.contains(&"NVDA".to_string()));
        assert!(universe.contains(&"SPY".to_string()));
        assert_eq!(universe.len(), 22);
    }

    #[test]
    fn parse_tickers_basic() {
        let result = parse_tickers("KO,NVDA,SPY").unwrap();
        assert_eq!(result, vec!["KO", "NVDA", "SPY"]);
    }

    #[test]
    fn parse_tickers_trims_and_uppercases() {
        let result = parse_tickers("  ko , nvda ,SPY  ").unwrap();
        assert_eq!(result, vec!["KO", "NVDA", "SPY"]);
    }

    #[test]
    fn parse_tickers_empty_token() {
        let result = parse_tickers("KO,,NVDA");
        assert!(matches!(result, Err(UniverseError::EmptyToken)));
    }

    #[test]
    fn parse_tickers_duplicate() {
        let result = parse_tickers("KO,NVDA,ko");
        assert!(matches!(result, Err(UniverseError::DuplicateTicker(s)) if s == "KO"));
    }
}
