//! Core library for insurance document parsing.
//!
//! This crate provides:
//! - Field extraction with a regex-first, fuzzy-fallback strategy
//! - Confidence scoring for every extracted field
//! - Per-insurer pattern registries (built-in or loaded from JSON)
//! - Document loading from text and PDF files, with OCR for scanned PDFs

pub mod error;
pub mod extract;
pub mod loader;
pub mod models;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod pdf;
pub mod preprocess;
pub mod registry;

pub use error::{ConfigError, InsparseError, Result};
pub use extract::{FieldExtractor, HybridFieldExtractor};
pub use loader::DocumentLoader;
pub use models::config::InsparseConfig;
pub use models::document::Document;
pub use models::result::{Extraction, ExtractionMethod, FieldResult};
pub use preprocess::{clean_text, normalize_amount};
pub use registry::{FieldSpec, PatternRegistry};
