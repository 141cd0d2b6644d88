//! Text cleanup for PDF and OCR output.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize raw document text while keeping its line structure.
///
/// - non-breaking spaces and tabs become spaces
/// - control and zero-width characters are dropped (newlines are kept)
/// - whitespace runs inside a line collapse to one space; lines are trimmed
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let printable: String = text
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\u{00a0}' | '\t' => Some(' '),
            '\u{200b}'..='\u{200f}' | '\u{2028}' | '\u{2029}' | '\u{feff}' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    printable
        .split('\n')
        .map(|line| WHITESPACE_RUN.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a currency string such as `"Rs. 25,000.00"` into a decimal.
///
/// Everything except digits and `.` is stripped, along with dots left at the
/// front by currency markers like `Rs.`. Unparsable input yields zero.
pub fn normalize_amount(amount: &str) -> Decimal {
    let filtered: String = amount
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let cleaned = filtered.trim_start_matches('.');

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(cleaned).unwrap_or(Decimal::ZERO)
}
