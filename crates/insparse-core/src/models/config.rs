//! Configuration structures for the parsing pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the insparse pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsparseConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR fallback configuration.
    pub ocr: OcrConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Built-in registry used when no insurer is given.
    pub default_insurer: String,

    /// Custom registry file (JSON), overrides the built-in registries.
    pub registry_file: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_insurer: "base".to_string(),
            registry_file: None,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum trimmed text length to treat a PDF as text-based.
    /// Anything shorter is considered scanned.
    pub min_text_length: usize,

    /// Maximum pages to OCR (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            max_pages: 10,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Run OCR on scanned PDFs.
    pub enabled: bool,

    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Vertical distance (pixels) within which text boxes share a line.
    pub row_tolerance: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            row_tolerance: 15.0,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }

    /// Whether the detection and recognition models are present on disk.
    pub fn models_available(&self) -> bool {
        self.model_path(&self.detection_model).exists()
            && self.model_path(&self.recognition_model).exists()
            && self.model_path(&self.dictionary).exists()
    }
}

impl InsparseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: InsparseConfig =
            serde_json::from_str(r#"{ "pdf": { "min_text_length": 10 } }"#).unwrap();
        assert_eq!(config.pdf.min_text_length, 10);
        assert_eq!(config.pdf.max_pages, 10);
        assert_eq!(config.extraction.default_insurer, "base");
        assert!(config.ocr.enabled);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InsparseConfig::default();
        config.extraction.default_insurer = "lic".to_string();
        config.save(&path).unwrap();

        let loaded = InsparseConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.default_insurer, "lic");
    }

    #[test]
    fn test_models_missing() {
        let mut config = OcrConfig::default();
        config.model_dir = PathBuf::from("/nonexistent/insparse/models");
        assert!(!config.models_available());
    }
}
