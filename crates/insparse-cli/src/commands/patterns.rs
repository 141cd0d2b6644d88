//! Patterns command - inspect built-in pattern registries.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use insparse_core::PatternRegistry;
use insparse_core::registry::BUILTIN_PROVIDERS;

/// Arguments for the patterns command.
#[derive(Args)]
pub struct PatternsArgs {
    #[command(subcommand)]
    command: PatternsCommand,
}

#[derive(Subcommand)]
enum PatternsCommand {
    /// List built-in providers
    List,

    /// Print a provider's registry as JSON
    Show {
        /// Provider name (base, hdfc, lic)
        provider: String,

        /// Write the registry to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(args: PatternsArgs) -> anyhow::Result<()> {
    match args.command {
        PatternsCommand::List => list_providers(),
        PatternsCommand::Show { provider, output } => show_provider(&provider, output),
    }
}

fn list_providers() -> anyhow::Result<()> {
    println!("{}", style("Built-in providers:").bold());

    for name in BUILTIN_PROVIDERS {
        let registry = PatternRegistry::builtin(name)?;
        let fields: Vec<&str> = registry.fields().iter().map(|f| f.name.as_str()).collect();
        println!(
            "  {:<8} {:>2} fields  {}",
            style(name).cyan(),
            fields.len(),
            style(fields.join(", ")).dim()
        );
    }

    Ok(())
}

fn show_provider(provider: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let registry = PatternRegistry::builtin(provider)?;
    let json = registry.to_json()?;

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{} Registry '{}' written to {}",
                style("✓").green(),
                registry.provider(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
