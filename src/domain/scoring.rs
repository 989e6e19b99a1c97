//! Multi-factor, strategy-conditioned scoring.
//!
//! Only the most recent frame row is evaluated. Rules fire in a fixed
//! order: eligibility gate, data gate, trend component, strategy-specific
//! component, universal below-200-SMA penalty, clamp to 0..=100, then the
//! ATR-scaled target price. Reason tags accumulate in rule order and never
//! feed back into the number.

use crate::domain::metrics::{IndicatorFrame, MIN_BARS};
use crate::domain::strategy::Strategy;
use crate::ports::config_port::ConfigPort;

/// Scoring thresholds. These are tuning knobs, not invariants; defaults
/// match the shipped profile tables and any can be overridden from the
/// `[scoring]` config section.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub adx_strong: f64,
    pub adx_weak: f64,
    pub rsi_value_low: f64,
    pub rsi_value_high: f64,
    pub rsi_overbought: f64,
    pub low_volatility: f64,
    pub rvol_surge: f64,
    pub rvol_elevated: f64,
    pub rsi_momentum_low: f64,
    pub rsi_momentum_high: f64,
    pub rsi_blowoff: f64,
    pub atr_fallback_pct: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            adx_strong: 25.0,
            adx_weak: 20.0,
            rsi_value_low: 40.0,
            rsi_value_high: 60.0,
            rsi_overbought: 70.0,
            low_volatility: 0.03,
            rvol_surge: 1.5,
            rvol_elevated: 1.2,
            rsi_momentum_low: 55.0,
            rsi_momentum_high: 75.0,
            rsi_blowoff: 80.0,
            atr_fallback_pct: 0.02,
        }
    }
}

impl ScoreWeights {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let d = ScoreWeights::default();
        let get = |key: &str, default: f64| config.get_double("scoring", key, default);
        ScoreWeights {
            adx_strong: get("adx_strong", d.adx_strong),
            adx_weak: get("adx_weak", d.adx_weak),
            rsi_value_low: get("rsi_value_low", d.rsi_value_low),
            rsi_value_high: get("rsi_value_high", d.rsi_value_high),
            rsi_overbought: get("rsi_overbought", d.rsi_overbought),
            low_volatility: get("low_volatility", d.low_volatility),
            rvol_surge: get("rvol_surge", d.rvol_surge),
            rvol_elevated: get("rvol_elevated", d.rvol_elevated),
            rsi_momentum_low: get("rsi_momentum_low", d.rsi_momentum_low),
            rsi_momentum_high: get("rsi_momentum_high", d.rsi_momentum_high),
            rsi_blowoff: get("rsi_blowoff", d.rsi_blowoff),
            atr_fallback_pct: get("atr_fallback_pct", d.atr_fallback_pct),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// Confidence score, clamped to 0..=100.
    pub score: i32,
    /// One-day-scale target price; 0 when there is no data to anchor it.
    pub target_price: f64,
    /// Human-readable tags in rule-evaluation order. Informational only.
    pub reasons: Vec<String>,
}

/// Score one ticker's frame under one strategy profile.
///
/// Ineligible tickers short-circuit before any indicator column is read,
/// so an empty or malformed frame is fine there. Frames shorter than
/// [`MIN_BARS`] score 0 with a zero target.
pub fn score_stock(frame: &IndicatorFrame, strategy: Strategy, weights: &ScoreWeights) -> ScoreOutcome {
    if !strategy.is_eligible(&frame.ticker) {
        return ScoreOutcome {
            score: 0,
            target_price: frame.last().map(|r| r.close).unwrap_or(0.0),
            reasons: vec![strategy.ineligible_reason().to_string()],
        };
    }

    if frame.len() < MIN_BARS {
        return ScoreOutcome {
            score: 0,
            target_price: 0.0,
            reasons: vec!["Insufficient Data".to_string()],
        };
    }

    let current = frame
        .last()
        .expect("frame length checked against MIN_BARS");
    let mut score: i32 = 0;
    let mut reasons: Vec<String> = Vec::new();

    // Trend component, also the gate value for the strategy tables below.
    let mut trend: i32 = 0;
    if current.close > current.sma_50 {
        trend += 10;
        if current.sma_50 > current.sma_200 {
            // golden-cross alignment
            trend += 10;
        }
    }
    if current.adx >= weights.adx_strong {
        trend += 10;
        reasons.push(format!("Strong Trend (ADX {:.0})", current.adx));
    } else if current.adx < weights.adx_weak {
        trend -= 5;
    }
    score += trend;

    match strategy {
        Strategy::Conservative => {
            // Pullback-in-uptrend profile: only pay up for confirmed trends.
            if trend >= 20 {
                score += 40;

                if current.rsi >= weights.rsi_value_low && current.rsi <= weights.rsi_value_high {
                    score += 20;
                    reasons.push("Fair Value RSI".to_string());
                } else if current.rsi < weights.rsi_value_low {
                    score += 30;
                    reasons.push("Oversold Opportunity".to_string());
                } else if current.rsi > weights.rsi_overbought {
                    score -= 20;
                }

                if current.volatility < weights.low_volatility {
                    score += 10;
                } else {
                    score -= 10;
                }
            }
        }
        Strategy::Moonshot => {
            // Momentum-breakout profile: an emerging trend is enough.
            if trend >= 10 {
                score += 20;
            }

            if current.rvol > weights.rvol_surge {
                score += 25;
                reasons.push(format!("High Inst. Volume ({:.1}x)", current.rvol));
            } else if current.rvol > weights.rvol_elevated {
                score += 10;
            }

            if current.rsi > weights.rsi_momentum_low && current.rsi < weights.rsi_momentum_high {
                score += 25;
                reasons.push("Strong Momentum".to_string());
            } else if current.rsi > weights.rsi_blowoff {
                score -= 10;
            }

            if current.macd > current.macd_signal {
                score += 10;
            }
        }
        Strategy::Balanced => {}
    }

    // Universal penalty, applied after every bonus.
    if current.close < current.sma_200 {
        score -= 20;
    }

    let score = score.clamp(0, 100);

    let mut atr = current.atr;
    if atr == 0.0 {
        atr = current.close * weights.atr_fallback_pct;
    }
    let target_price = current.close + atr * strategy.target_atr_multiplier();

    ScoreOutcome {
        score,
        target_price,
        reasons,
    }
}
