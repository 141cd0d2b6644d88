//! Error types for the insparse-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the insparse library.
#[derive(Error, Debug)]
pub enum InsparseError {
    /// Pattern registry or engine configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document loading error.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broken field configuration. Never raised for missing data.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The field pattern does not compile.
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// The field pattern has no capturing group to take the value from.
    #[error("pattern for field {field} has no capturing group")]
    MissingCaptureGroup { field: String },

    /// Fuzzy matching was needed but the field has no keywords.
    #[error("field {field} has an empty keyword list")]
    EmptyKeywords { field: String },

    /// Two fields in one registry share a name.
    #[error("duplicate field name in registry: {0}")]
    DuplicateField(String),

    /// No built-in registry with this name.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// A registry file could not be parsed.
    #[error("failed to parse registry: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors related to reading a document from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not handled.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// OCR support was not compiled in.
    #[error("OCR support is not enabled in this build")]
    Unavailable,
}

/// Result type for the insparse library.
pub type Result<T> = std::result::Result<T, InsparseError>;
