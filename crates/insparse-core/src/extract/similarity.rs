//! Partial string similarity.
//!
//! Scores how well the shorter string appears somewhere inside the longer one,
//! on a 0-100 scale. A keyword found verbatim inside a line scores 100 no
//! matter how much other text the line carries.

use std::collections::HashSet;

/// Best alignment score (0-100) of the shorter input against any window of
/// the longer input.
///
/// Window scores are normalized Indel similarities:
/// `200 * lcs(a, b) / (len(a) + len(b))`. Inputs are compared as given;
/// callers lowercase them when case should not matter.
pub fn partial_ratio(needle: &str, haystack: &str) -> f64 {
    let a: Vec<char> = needle.chars().collect();
    let b: Vec<char> = haystack.chars().collect();

    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 100.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    if a.len() < b.len() {
        best_window(&a, &b)
    } else if a.len() > b.len() {
        best_window(&b, &a)
    } else {
        best_window(&a, &b).max(best_window(&b, &a))
    }
}

/// Normalized Indel similarity of two sequences (0-100).
pub fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

fn best_window(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();
    let alphabet: HashSet<char> = short.iter().copied().collect();
    let mut best = 0.0f64;

    // Windows hanging off the left edge.
    for end in 1..m {
        let window = &long[..end];
        if alphabet.contains(&window[end - 1]) {
            best = best.max(ratio(short, window));
            if best >= 100.0 {
                return 100.0;
            }
        }
    }

    for start in 0..=(n - m) {
        let window = &long[start..start + m];
        if alphabet.contains(&window[m - 1]) {
            best = best.max(ratio(short, window));
            if best >= 100.0 {
                return 100.0;
            }
        }
    }

    // Windows hanging off the right edge.
    for start in (n - m + 1)..n {
        let window = &long[start..];
        if alphabet.contains(&window[0]) {
            best = best.max(ratio(short, window));
            if best >= 100.0 {
                return 100.0;
            }
        }
    }

    best
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_substring_scores_100() {
        assert_eq!(
            partial_ratio("premium", "total premium payable rs. 25,000.00 only"),
            100.0
        );
        assert_eq!(partial_ratio("sum assured", "sum assured"), 100.0);
    }

    #[test]
    fn test_argument_order_does_not_matter() {
        let line = "total premium payable";
        assert_eq!(partial_ratio("premium", line), partial_ratio(line, "premium"));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(partial_ratio("", "anything"), 0.0);
        assert_eq!(partial_ratio("premium", ""), 0.0);
        assert_eq!(partial_ratio("", ""), 100.0);
    }

    #[test]
    fn test_single_typo() {
        // "premlum" vs "premium": lcs 6 of 7 -> 200 * 6 / 14
        let score = partial_ratio("premium", "total premlum payable");
        assert!((score - 85.714).abs() < 0.01, "score was {}", score);
    }

    #[test]
    fn test_unrelated_text_scores_low() {
        let score = partial_ratio("sum assured", "random unrelated document with no labels");
        assert!(score < 85.0, "score was {}", score);
    }

    #[test]
    fn test_ratio() {
        let a: Vec<char> = "abcd".chars().collect();
        let b: Vec<char> = "abed".chars().collect();
        assert_eq!(ratio(&a, &b), 75.0);
        assert_eq!(ratio(&[], &[]), 100.0);
    }

    #[test]
    fn test_counts_unicode_scalars() {
        assert_eq!(partial_ratio("₹500", "amount ₹500 due"), 100.0);
    }

    #[test]
    fn test_lcs() {
        let a: Vec<char> = "sum insured".chars().collect();
        let b: Vec<char> = "sum assured".chars().collect();
        assert_eq!(lcs_len(&a, &b), 9);
    }
}
