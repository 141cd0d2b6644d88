//! Pattern registries: per-insurer field definitions.

mod builtin;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

pub use builtin::BUILTIN_PROVIDERS;

/// How to recognize one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within a registry.
    pub name: String,
    /// Regular expression; the last capturing group holds the value.
    pub pattern: String,
    /// Labels searched for when the pattern does not match, in priority order.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// An ordered set of field specs for one document issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternRegistry {
    provider: String,
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
struct RegistryFile {
    provider: String,
    fields: Vec<FieldSpec>,
}

impl PatternRegistry {
    /// Create a registry, rejecting duplicate field names.
    pub fn new(provider: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self {
            provider: provider.into(),
            fields,
        })
    }

    /// Built-in registry by provider name (case-insensitive).
    pub fn builtin(provider: &str) -> Result<Self, ConfigError> {
        let name = provider.trim().to_lowercase();
        let fields = builtin::fields(&name).ok_or_else(|| ConfigError::UnknownProvider(name.clone()))?;
        Self::new(name, fields)
    }

    /// Built-in registry for an insurer, falling back to `base` for unknown names.
    pub fn for_insurer(insurer: &str) -> Self {
        match Self::builtin(insurer) {
            Ok(registry) => registry,
            Err(_) => {
                warn!("Unknown insurer '{}', using base patterns", insurer);
                Self::base()
            }
        }
    }

    /// The generic registry used for unknown insurers.
    pub fn base() -> Self {
        Self {
            provider: "base".to_string(),
            fields: builtin::base_fields(),
        }
    }

    /// Parse a registry from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        Self::new(file.provider, file.fields)
    }

    /// Load a registry from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&content)?;
        debug!(
            "Loaded registry {} with {} fields from {}",
            registry.provider,
            registry.fields.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Serialize to pretty JSON, in the format accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
