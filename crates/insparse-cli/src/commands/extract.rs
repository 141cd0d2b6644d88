//! Extract command - pull policy fields from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use insparse_core::{
    clean_text, Document, DocumentLoader, Extraction, FieldExtractor, HybridFieldExtractor,
    InsparseConfig, PatternRegistry,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (PDF or TXT)
    #[arg(required = true)]
    input: PathBuf,

    /// Insurer name for provider-specific patterns (base, hdfc, lic)
    #[arg(short, long)]
    insurer: Option<String>,

    /// Custom pattern registry (JSON)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let registry = super::select_registry(args.insurer.as_deref(), args.registry.as_ref(), &config)?;
    info!("Using patterns for: {}", registry.provider());
    let extractor = HybridFieldExtractor::new(&registry)?;

    let extraction = extract_file(&args.input, &extractor, &config)?;
    let output = format_extraction(&registry, &extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load, clean and extract one document.
pub fn extract_file(
    path: &Path,
    extractor: &HybridFieldExtractor,
    config: &InsparseConfig,
) -> anyhow::Result<Extraction> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let raw_text = DocumentLoader::new(config).load(path)?;
    let document = Document::new(clean_text(&raw_text));
    if document.is_blank() {
        tracing::warn!("No text could be extracted from {}", path.display());
    }

    Ok(extractor.extract(&document)?)
}

/// Render an extraction, listing fields in registry order.
pub fn format_extraction(
    registry: &PatternRegistry,
    extraction: &Extraction,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
        OutputFormat::Csv => format_csv(registry, extraction),
        OutputFormat::Text => Ok(format_text(registry, extraction)),
    }
}

fn format_csv(registry: &PatternRegistry, extraction: &Extraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value", "confidence", "method"])?;

    for field in registry.fields() {
        if let Some(result) = extraction.get(&field.name) {
            wtr.write_record([
                field.name.as_str(),
                result.value.as_deref().unwrap_or(""),
                &format!("{:.2}", result.confidence),
                &result.method.to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(registry: &PatternRegistry, extraction: &Extraction) -> String {
    let rule = "=".repeat(40);
    let mut output = String::new();

    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!(
        "Extraction Results ({})\n",
        registry.provider().to_uppercase()
    ));
    output.push_str(&format!("{}\n", rule));

    for field in registry.fields() {
        if let Some(result) = extraction.get(&field.name) {
            let value = result.value.as_deref().unwrap_or("Not Found");
            output.push_str(&format!(
                "{:<20} : {:<20} (Conf: {:?}, Method: {})\n",
                field.name, value, result.confidence, result.method
            ));
        }
    }

    output.push_str(&rule);
    output
}
