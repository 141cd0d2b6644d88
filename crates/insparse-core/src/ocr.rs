//! OCR for scanned documents using `pure-onnx-ocr`.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// A recognized text region, reduced to an axis-aligned box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub bottom: f32,
}

impl TextRegion {
    fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Text recognizer backed by `pure-onnx-ocr` (pure Rust, no external runtime).
pub struct OcrReader {
    engine: pure_onnx_ocr::engine::OcrEngine,
    row_tolerance: f32,
}

impl OcrReader {
    /// Load the detection and recognition models named in `config`.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = config.model_path(&config.detection_model);
        let rec_path = config.model_path(&config.recognition_model);
        let dict_path = config.model_path(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded OCR models from {}", config.model_dir.display());

        Ok(Self {
            engine,
            row_tolerance: config.row_tolerance,
        })
    }

    /// Recognize an image and return its text in reading order, one visual
    /// row per line.
    pub fn read_image(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let regions: Vec<TextRegion> = results
            .iter()
            .map(|r| {
                let (left, top, bottom) = polygon_extent(&r.bounding_box);
                TextRegion {
                    text: r.text.replace("[UNK]", " "),
                    left,
                    top,
                    bottom,
                }
            })
            .collect();

        debug!(
            "OCR found {} text regions in {}x{} image ({}ms)",
            regions.len(),
            width,
            height,
            start.elapsed().as_millis()
        );

        Ok(group_rows(regions, self.row_tolerance))
    }
}

/// Left edge, top and bottom of a detection polygon.
fn polygon_extent(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32, f32) {
    let mut left = f32::INFINITY;
    let mut top = f32::INFINITY;
    let mut bottom = f32::NEG_INFINITY;
    for coord in polygon.exterior().coords() {
        left = left.min(coord.x as f32);
        top = top.min(coord.y as f32);
        bottom = bottom.max(coord.y as f32);
    }
    (left, top, bottom)
}

/// Join regions into lines: regions whose vertical centers lie within
/// `tolerance` of a row's first region share that row, ordered left to right.
pub fn group_rows(mut regions: Vec<TextRegion>, tolerance: f32) -> String {
    regions.retain(|r| !r.text.trim().is_empty());
    regions.sort_by(|a, b| a.center_y().total_cmp(&b.center_y()));

    let mut rows: Vec<(f32, Vec<TextRegion>)> = Vec::new();
    for region in regions {
        match rows.last_mut() {
            Some((row_y, row)) if (region.center_y() - *row_y).abs() < tolerance => {
                row.push(region);
            }
            _ => rows.push((region.center_y(), vec![region])),
        }
    }

    rows.into_iter()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.left.total_cmp(&b.left));
            row.iter()
                .map(|r| r.text.trim())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
