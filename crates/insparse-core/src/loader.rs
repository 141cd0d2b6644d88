//! Document loading from text and PDF files.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{LoadError, Result};
use crate::models::config::{InsparseConfig, OcrConfig, PdfConfig};
use crate::pdf::PdfExtractor;

/// Loads raw text from supported document formats.
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    pdf: PdfConfig,
    ocr: OcrConfig,
}

impl DocumentLoader {
    pub fn new(config: &InsparseConfig) -> Self {
        Self {
            pdf: config.pdf.clone(),
            ocr: config.ocr.clone(),
        }
    }

    /// Read the raw text of a `.txt` or `.pdf` file.
    ///
    /// PDFs with almost no embedded text are treated as scans and sent
    /// through OCR. When OCR cannot run, an empty string is returned.
    pub fn load(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()).into());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        info!("Loading document: {}", path.display());

        match extension.as_str() {
            "txt" => Ok(fs::read_to_string(path)?),
            "pdf" => self.load_pdf(&fs::read(path)?),
            _ => Err(LoadError::UnsupportedFormat(format!(".{}", extension)).into()),
        }
    }

    /// Extract text from PDF bytes, falling back to OCR for scans.
    pub fn load_pdf(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;

        let text = extractor.extract_text()?;
        debug!(
            "Extracted {} characters from {} pages",
            text.len(),
            extractor.page_count()
        );

        if text.trim().chars().count() >= self.pdf.min_text_length {
            return Ok(text);
        }

        warn!("Detected scanned/image PDF, attempting OCR");
        Ok(self.ocr_pdf(&extractor))
    }

    #[cfg(feature = "ocr")]
    fn ocr_pdf(&self, extractor: &PdfExtractor) -> String {
        use crate::ocr::OcrReader;

        if !self.ocr.enabled {
            warn!("OCR is disabled in configuration");
            return String::new();
        }
        if !self.ocr.models_available() {
            warn!(
                "OCR models not found in {}",
                self.ocr.model_dir.display()
            );
            return String::new();
        }

        let reader = match OcrReader::from_config(&self.ocr) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("OCR failed: {}", e);
                return String::new();
            }
        };

        let mut page_count = extractor.page_count();
        if self.pdf.max_pages > 0 {
            page_count = page_count.min(self.pdf.max_pages as u32);
        }

        let mut pages = Vec::new();
        for page in 1..=page_count {
            info!("Processing page {} with OCR", page);
            let images = match extractor.extract_images(page) {
                Ok(images) => images,
                Err(e) => {
                    warn!("Failed to extract images from page {}: {}", page, e);
                    continue;
                }
            };

            for image in &images {
                match reader.read_image(image) {
                    Ok(text) if !text.trim().is_empty() => pages.push(text),
                    Ok(_) => debug!("No text detected in image on page {}", page),
                    Err(e) => warn!("OCR failed on page {}: {}", page, e),
                }
            }
        }

        pages.join("\n")
    }

    #[cfg(not(feature = "ocr"))]
    fn ocr_pdf(&self, _extractor: &PdfExtractor) -> String {
        warn!("{}", crate::error::OcrError::Unavailable);
        String::new()
    }
}
