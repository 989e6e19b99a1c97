//! Strategy profiles and their eligibility universes.
//!
//! A strategy is a closed profile: which tickers it will even consider,
//! which scoring table applies, and how far the ATR-based target reaches.

use crate::domain::error::PickerError;
use std::fmt;
use std::str::FromStr;

/// Stable blue-chips a conservative profile is willing to hold.
pub const CONSERVATIVE_TICKERS: &[&str] = &[
    "PG", "KO", "PEP", "WMT", "JNJ", "PFE", "XOM", "CVX", "JPM", "BAC",
];

/// High-beta growth names for the moonshot profile.
pub const MOONSHOT_TICKERS: &[&str] = &[
    "COIN", "PLTR", "DKNG", "ROKU", "SQ", "ARKK", "NVDA", "TSLA", "AMD",
];

/// Broad-market index funds, acceptable to conservative profiles.
pub const INDICES: &[&str] = &["SPY", "QQQ", "IWM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Conservative,
    Moonshot,
    Balanced,
}

impl Strategy {
    /// Whether this profile will score the ticker at all.
    pub fn is_eligible(&self, ticker: &str) -> bool {
        match self {
            Strategy::Conservative => {
                CONSERVATIVE_TICKERS.contains(&ticker) || INDICES.contains(&ticker)
            }
            Strategy::Moonshot => MOONSHOT_TICKERS.contains(&ticker),
            Strategy::Balanced => true,
        }
    }

    /// Reason string for a short-circuited ineligible score.
    pub fn ineligible_reason(&self) -> &'static str {
        match self {
            Strategy::Conservative => "Not a conservative asset",
            Strategy::Moonshot => "Not a growth asset",
            Strategy::Balanced => "Not eligible",
        }
    }

    /// How many ATRs above the close the base target sits.
    pub fn target_atr_multiplier(&self) -> f64 {
        match self {
            Strategy::Moonshot => 3.0,
            Strategy::Conservative | Strategy::Balanced => 1.5,
        }
    }

    pub fn all() -> &'static [Strategy] {
        &[Strategy::Conservative, Strategy::Moonshot, Strategy::Balanced]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Conservative => "conservative",
            Strategy::Moonshot => "moonshot",
            Strategy::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Strategy::Conservative),
            "moonshot" => Ok(Strategy::Moonshot),
            "balanced" => Ok(Strategy::Balanced),
            other => Err(PickerError::InvalidArgument {
                name: "strategy".into(),
                reason: format!("unknown strategy '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conservative_accepts_blue_chips_and_indices() {
        assert!(Strategy::Conservative.is_eligible("KO"));
        assert!(Strategy::Conservative.is_eligible("SPY"));
        assert!(!Strategy::Conservative.is_eligible("TSLA"));
    }

    #[test]
    fn moonshot_accepts_growth_only() {
        assert!(Strategy::Moonshot.is_eligible("TSLA"));
        assert!(!Strategy::Moonshot.is_eligible("KO"));
        assert!(!Strategy::Moonshot.is_eligible("SPY"));
    }

    #[test]
    fn balanced_accepts_anything() {
        assert!(Strategy::Balanced.is_eligible("KO"));
        assert!(Strategy::Balanced.is_eligible("TSLA"));
        assert!(Strategy::Balanced.is_eligible("UNKNOWN"));
    }

    #[test]
    fn target_multipliers() {
        assert_eq!(Strategy::Moonshot.target_atr_multiplier(), 3.0);
        assert_eq!(Strategy::Conservative.target_atr_multiplier(), 1.5);
        assert_eq!(Strategy::Balanced.target_atr_multiplier(), 1.5);
    }

    #[test]
    fn parse_round_trips() {
        for s in Strategy::all() {
            assert_eq!(&s.as_str().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("MoonShot".parse::<Strategy>().unwrap(), Strategy::Moonshot);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("yolo".parse::<Strategy>().is_err());
    }
}
