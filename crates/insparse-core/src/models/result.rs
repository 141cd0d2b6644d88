//! Extraction result models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Extraction results keyed by field name, one entry per registry field.
pub type Extraction = BTreeMap<String, FieldResult>;

/// How a field value was found.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ExtractionMethod {
    /// Nothing was found.
    #[default]
    None,
    /// The field's deterministic pattern matched.
    Regex,
    /// A keyword was located on a line by fuzzy matching.
    Fuzzy {
        /// Raw keyword-to-line similarity (0-100).
        score: f64,
    },
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::None => write!(f, "none"),
            ExtractionMethod::Regex => write!(f, "regex"),
            ExtractionMethod::Fuzzy { score } => write!(f, "fuzzy (score: {})", score),
        }
    }
}

impl Serialize for ExtractionMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extraction result for a single field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FieldResult {
    /// Extracted value, if any.
    pub value: Option<String>,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f64,
    /// Strategy that produced the value.
    pub method: ExtractionMethod,
}

impl FieldResult {
    /// Result for a field that could not be found.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Whether a value was extracted.
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_labels() {
        assert_eq!(ExtractionMethod::None.to_string(), "none");
        assert_eq!(ExtractionMethod::Regex.to_string(), "regex");
        assert_eq!(
            ExtractionMethod::Fuzzy { score: 100.0 }.to_string(),
            "fuzzy (score: 100)"
        );
        assert_eq!(
            ExtractionMethod::Fuzzy { score: 87.5 }.to_string(),
            "fuzzy (score: 87.5)"
        );
    }

    #[test]
    fn test_serialize_not_found() {
        let json = serde_json::to_value(FieldResult::not_found()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "value": null, "confidence": 0.0, "method": "none" })
        );
    }

    #[test]
    fn test_serialize_fuzzy() {
        let result = FieldResult {
            value: Some("25,000.00".to_string()),
            confidence: 0.85,
            method: ExtractionMethod::Fuzzy { score: 100.0 },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "fuzzy (score: 100)");
        assert_eq!(json["value"], "25,000.00");
    }
}
