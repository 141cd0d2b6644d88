//! Confidence scoring for extracted fields.

use rust_decimal::prelude::{Decimal, RoundingStrategy, ToPrimitive};

/// Confidence for a deterministic pattern match.
pub const REGEX_CONFIDENCE: f64 = 0.95;

/// Upper bound for fuzzy-match confidence. A located label does not
/// guarantee the right value was captured next to it.
pub const FUZZY_CEILING: f64 = 0.85;

/// Strategy that found a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    None,
    Regex,
    Fuzzy,
}

/// Convert a strategy and its match quality (0-100) into a confidence in [0, 1].
///
/// Quality is ignored for regex matches. Fuzzy confidence is scaled to
/// [`FUZZY_CEILING`] and rounded to two decimals.
pub fn calculate(strategy: Strategy, quality: f64) -> f64 {
    match strategy {
        Strategy::Regex => REGEX_CONFIDENCE,
        Strategy::Fuzzy => {
            let normalized = quality.clamp(0.0, 100.0) / 100.0;
            round2(normalized * FUZZY_CEILING)
        }
        Strategy::None => 0.0,
    }
}

/// Round to two decimals using the exact binary value of `value`, so
/// 0.425 (stored as 0.42499...) becomes 0.42.
fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}
