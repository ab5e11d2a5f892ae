//! Airtable Schema Code Generator
//!
//! Generates typed CRUD modules from a raw Airtable schema dump.

use std::path::PathBuf;

use airtable_schema_gen::config::GeneratorConfig;
use airtable_schema_gen::errors::GeneratorError;
use airtable_schema_gen::pipeline::{GenerationReport, run};
use clap::Parser;
use colored::Colorize;
use tracing::{Level, info};

/// Airtable schema generator - turns a base's schema into typed Rust modules
#[derive(Parser, Debug)]
#[command(name = "airtable-schema-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./airtable-schema.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding schemaRaw.json (overrides the config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for generated modules (overrides the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut config = GeneratorConfig::discover(cli.config.as_deref())?;
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.dry_run {
        info!("Dry run mode - no files will be written");
    }

    let report = run(&config, cli.dry_run)?;
    print_summary(&report, &config, cli.dry_run);
    Ok(())
}

fn print_summary(report: &GenerationReport, config: &GeneratorConfig, dry_run: bool) {
    if dry_run {
        eprintln!(
            "{} {} tables (dry run, nothing written)",
            "Generated".bold(),
            report.tables
        );
        return;
    }

    eprintln!(
        "{} {} tables into {}",
        "Generated".green().bold(),
        report.tables,
        config.output.display()
    );
    for path in &report.written {
        eprintln!("  {}", path.display().to_string().dimmed());
    }
    if report.merged_snapshot {
        eprintln!("  lookup fields carried over from the previous snapshot");
    }
}
