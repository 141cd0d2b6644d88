//! Hybrid field extractor combining pattern and fuzzy matching.

use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

use super::confidence::{self, Strategy};
use super::{FieldExtractor, Result, matcher};
use crate::error::ConfigError;
use crate::models::document::Document;
use crate::models::result::{Extraction, ExtractionMethod, FieldResult};
use crate::registry::{FieldSpec, PatternRegistry};

/// A field spec with its pattern compiled.
#[derive(Debug, Clone)]
struct CompiledField {
    spec: FieldSpec,
    pattern: Regex,
}

impl CompiledField {
    fn compile(spec: &FieldSpec) -> Result<Self> {
        let pattern = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                field: spec.name.clone(),
                source,
            })?;

        // captures_len counts the implicit whole-match group.
        if pattern.captures_len() < 2 {
            return Err(ConfigError::MissingCaptureGroup {
                field: spec.name.clone(),
            });
        }

        Ok(Self {
            spec: spec.clone(),
            pattern,
        })
    }

    /// Trimmed value of the last capturing group, if non-empty.
    fn match_pattern(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let value = caps
            .get(self.pattern.captures_len() - 1)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();

        if value.is_empty() {
            debug!("Pattern for {} matched an empty value", self.spec.name);
            return None;
        }
        Some(value.to_string())
    }

    fn resolve(&self, document: &Document) -> Result<FieldResult> {
        if let Some(value) = self.match_pattern(document.text()) {
            return Ok(FieldResult {
                value: Some(value),
                confidence: confidence::calculate(Strategy::Regex, 100.0),
                method: ExtractionMethod::Regex,
            });
        }

        if self.spec.keywords.is_empty() {
            return Err(ConfigError::EmptyKeywords {
                field: self.spec.name.clone(),
            });
        }

        Ok(matcher::search(document.lines(), &self.spec.keywords)
            .unwrap_or_else(FieldResult::not_found))
    }
}

/// Field extractor that tries each field's pattern first and falls back to
/// keyword-proximity matching over the document lines.
///
/// Holds only compiled, immutable patterns; one instance can serve any
/// number of documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct HybridFieldExtractor {
    provider: String,
    fields: Vec<CompiledField>,
}

impl HybridFieldExtractor {
    /// Compile every pattern in `registry`.
    ///
    /// Fails on the first pattern that does not compile or has no
    /// capturing group.
    pub fn new(registry: &PatternRegistry) -> Result<Self> {
        let fields = registry
            .fields()
            .iter()
            .map(CompiledField::compile)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Compiled {} field patterns for provider {}",
            fields.len(),
            registry.provider()
        );

        Ok(Self {
            provider: registry.provider().to_string(),
            fields,
        })
    }

    /// Provider name of the registry this extractor was built from.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Field names, in registry order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.spec.name.as_str())
    }

    /// Convenience wrapper building a [`Document`] from cleaned text.
    pub fn extract_text(&self, text: &str) -> Result<Extraction> {
        self.extract(&Document::new(text))
    }
}

impl FieldExtractor for HybridFieldExtractor {
    fn extract(&self, document: &Document) -> Result<Extraction> {
        info!(
            "Extracting {} fields ({}) from {} characters of text",
            self.fields.len(),
            self.provider,
            document.text().len()
        );

        let mut extraction = Extraction::new();
        for field in &self.fields {
            let result = field.resolve(document)?;
            debug!(
                "{}: {:?} (confidence {:.2}, {})",
                field.spec.name, result.value, result.confidence, result.method
            );
            extraction.insert(field.spec.name.clone(), result);
        }

        Ok(extraction)
    }
}
