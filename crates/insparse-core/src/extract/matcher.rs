//! Keyword-proximity fallback: finds a labelled number on a line.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use super::confidence::{self, Strategy};
use super::similarity::partial_ratio;
use crate::models::result::{ExtractionMethod, FieldResult};

/// Minimum keyword-to-line similarity for the keyword to count as present.
pub const MATCH_THRESHOLD: f64 = 85.0;

lazy_static! {
    // Optional currency marker, then digits with thousands separators.
    static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"(?:Rs\.|₹)?\s?([\d,]+\.?\d*)"
    ).unwrap();
}

/// Numeric tokens on a line, in order. Tokens without a digit (in any
/// script) are dropped.
pub fn numeric_tokens(line: &str) -> Vec<&str> {
    NUMERIC_TOKEN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| !token.trim().is_empty() && token.chars().any(char::is_numeric))
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    value: &'a str,
    confidence: f64,
    score: f64,
}

/// Search `lines` for the best labelled number.
///
/// Every (line, keyword) pair with a similarity of at least
/// [`MATCH_THRESHOLD`] proposes the last numeric token on that line. The
/// candidate with the highest confidence wins; on equal confidence the
/// first one seen is kept.
pub fn search<L, K>(lines: &[L], keywords: &[K]) -> Option<FieldResult>
where
    L: AsRef<str>,
    K: AsRef<str>,
{
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .collect();

    let best = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| {
            let lowered = line.to_lowercase();
            keywords
                .iter()
                .map(move |keyword| (line, partial_ratio(keyword, &lowered)))
                .collect::<Vec<_>>()
        })
        .filter(|&(_, score)| score >= MATCH_THRESHOLD)
        .filter_map(|(line, score)| {
            let value = numeric_tokens(line).pop()?;
            trace!("Candidate {:?} (score {:.1}) on line {:?}", value, score, line);
            Some(Candidate {
                value,
                confidence: confidence::calculate(Strategy::Fuzzy, score),
                score,
            })
        })
        .fold(None, |best: Option<Candidate>, candidate| match best {
            Some(current) if candidate.confidence <= current.confidence => Some(current),
            _ => Some(candidate),
        })?;

    debug!(
        "Fuzzy match selected {:?} with confidence {:.2}",
        best.value, best.confidence
    );

    Some(FieldResult {
        value: Some(best.value.to_string()),
        confidence: best.confidence,
        method: ExtractionMethod::Fuzzy { score: best.score },
    })
}
