//! Batch processing command for multiple policy documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use insparse_core::{Extraction, HybridFieldExtractor, InsparseConfig, PatternRegistry};

use super::extract::{extract_file, format_extraction, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Insurer name for provider-specific patterns (base, hdfc, lic)
    #[arg(short, long)]
    insurer: Option<String>,

    /// Custom pattern registry (JSON)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<Extraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(super::load_config(config_path)?);

    let registry = super::select_registry(args.insurer.as_deref(), args.registry.as_ref(), &config)?;
    let extractor = Arc::new(HybridFieldExtractor::new(&registry)?);

    let files = collect_files(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // At most `jobs` files are in flight; results are drained as they finish
    // so a failure stops new files from starting.
    let jobs = args.jobs.max(1);
    let mut pending = files.into_iter().enumerate();
    let mut tasks = JoinSet::new();
    let mut results = Vec::new();

    loop {
        while tasks.len() < jobs {
            let Some((index, path)) = pending.next() else {
                break;
            };
            let extractor = Arc::clone(&extractor);
            let config = Arc::clone(&config);
            tasks.spawn_blocking(move || (index, process_file(path, &extractor, &config)));
        }

        let Some(joined) = tasks.join_next().await else {
            break;
        };
        let (index, result) = joined?;
        progress.inc(1);

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                // Blocking workers cannot be cancelled; files already running
                // finish in the background and their results are dropped.
                tasks.detach_all();
                progress.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push((index, result));
    }

    progress.finish_with_message("Complete");

    // Keep the input order regardless of completion order.
    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(extraction), Some(output_dir)) = (&result.extraction, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");

            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            let content = format_extraction(&registry, extraction, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &registry, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(
    path: PathBuf,
    extractor: &HybridFieldExtractor,
    config: &InsparseConfig,
) -> ProcessResult {
    let file_start = Instant::now();
    let outcome = extract_file(&path, extractor, config);
    let processing_time_ms = file_start.elapsed().as_millis() as u64;

    match outcome {
        Ok(extraction) => ProcessResult {
            path,
            extraction: Some(extraction),
            error: None,
            processing_time_ms,
        },
        Err(e) => ProcessResult {
            path,
            extraction: None,
            error: Some(e.to_string()),
            processing_time_ms,
        },
    }
}

fn collect_files(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();
    Ok(files)
}

/// Write one row per document with every registry field as a column.
fn write_summary(
    path: &Path,
    registry: &PatternRegistry,
    results: &[ProcessResult],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename".to_string(), "status".to_string()];
    header.extend(registry.fields().iter().map(|f| f.name.clone()));
    header.extend(
        ["found", "mean_confidence", "processing_time_ms", "processed_at", "error"]
            .map(String::from),
    );
    wtr.write_record(&header)?;

    let processed_at = chrono::Local::now().to_rfc3339();

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let mut row = vec![filename.to_string()];
        match &result.extraction {
            Some(extraction) => {
                row.push("success".to_string());
                for field in registry.fields() {
                    let value = extraction
                        .get(&field.name)
                        .and_then(|r| r.value.clone())
                        .unwrap_or_default();
                    row.push(value);
                }

                let found = extraction.values().filter(|r| r.is_found()).count();
                let mean = if extraction.is_empty() {
                    0.0
                } else {
                    extraction.values().map(|r| r.confidence).sum::<f64>()
                        / extraction.len() as f64
                };
                row.push(found.to_string());
                row.push(format!("{:.2}", mean));
                row.push(result.processing_time_ms.to_string());
                row.push(processed_at.clone());
                row.push(String::new());
            }
            None => {
                row.push("error".to_string());
                row.extend(registry.fields().iter().map(|_| String::new()));
                row.push(String::new());
                row.push(String::new());
                row.push(result.processing_time_ms.to_string());
                row.push(processed_at.clone());
                row.push(result.error.clone().unwrap_or_default());
            }
        }

        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
