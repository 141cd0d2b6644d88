//! Field extraction module.

pub mod confidence;
mod engine;
pub mod matcher;
pub mod similarity;

pub use engine::HybridFieldExtractor;

use crate::error::ConfigError;
use crate::models::document::Document;
use crate::models::result::Extraction;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Trait for document field extractors.
pub trait FieldExtractor {
    /// Extract every configured field from a cleaned document.
    ///
    /// Missing data is never an error: absent fields come back with zero
    /// confidence. Errors only signal broken configuration.
    fn extract(&self, document: &Document) -> Result<Extraction>;
}
