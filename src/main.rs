use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use sashimi::batch::{BatchEntry, BatchOptions, SheetOutcome, run_batch};
use sashimi::cli::{BatchArgs, CliArgs, Command, CommonArgs, CompressionLevel};
use sashimi::config::{CompressConfig, LoadedConfig};
use sashimi::error::SashimiError;
use sashimi::extract::{PlanOptions, SliceMode};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    // Resolve CLI args (and config file, for `batch`) into one plan
    let merged = merge_config_with_args(&cli.command)?;

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Sashimi sprite splitter v{}", env!("CARGO_PKG_VERSION"));

    if merged.entries.is_empty() {
        return Err(SashimiError::NoSheets.into());
    }

    let reports = run_batch(&merged.entries, &merged.options, None)?;

    let mut written = 0;
    let mut failed = 0;
    let mut skipped = 0;
    for report in &reports {
        match report.outcome {
            SheetOutcome::Split {
                written: w,
                failed: f,
            } => {
                written += w;
                failed += f;
            }
            SheetOutcome::Skipped(_) => skipped += 1,
        }
    }

    info!(
        "Wrote {} slices from {} sheets into {}",
        written,
        reports.len() - skipped,
        merged.options.output_dir.display()
    );
    if skipped > 0 {
        warn!("Skipped {} sheets", skipped);
    }
    if failed > 0 {
        warn!("{} slices could not be written", failed);
    }

    info!("Done!");

    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    entries: Vec<BatchEntry>,
    options: BatchOptions,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(command: &Command) -> Result<MergedConfig> {
    let merged = match command {
        Command::Islands(args) => direct_config(args, SliceMode::Islands, None),
        Command::Rows(args) => direct_config(&args.common, SliceMode::Rows, args.row_height),
        Command::Batch(args) => batch_config(args)?,
    };

    if merged.options.plan.row_height == 0
        || merged.entries.iter().any(|e| e.row_height == Some(0))
    {
        bail!("row height must be at least 1 pixel");
    }

    Ok(merged)
}

/// Build a run from CLI arguments alone, one mode for every input.
fn direct_config(args: &CommonArgs, mode: SliceMode, row_height: Option<u32>) -> MergedConfig {
    let defaults = PlanOptions::default();

    let entries = args
        .input
        .iter()
        .map(|input| BatchEntry {
            input: input.clone(),
            mode,
            row_height: None,
        })
        .collect();

    MergedConfig {
        entries,
        options: BatchOptions {
            output_dir: args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("split")),
            plan: PlanOptions {
                padding: args.padding.unwrap_or(defaults.padding),
                threshold: args.threshold.unwrap_or(defaults.threshold),
                row_height: row_height.unwrap_or(defaults.row_height),
            },
            compress: args.compress,
        },
        verbose: args.verbose,
    }
}

/// Build a run from a config file, with CLI overrides on top.
fn batch_config(args: &BatchArgs) -> Result<MergedConfig> {
    let loaded = LoadedConfig::load(&args.config)
        .with_context(|| format!("failed to load config: {}", args.config.display()))?;

    let entries = loaded
        .resolve_entries()
        .context("failed to resolve input sheets from config")?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| loaded.resolve_output_dir());

    let compress = if args.compress.is_some() {
        args.compress
    } else {
        loaded.config.compress.as_ref().map(|c| match c {
            CompressConfig::Level(n) => CompressionLevel::Level(*n),
            CompressConfig::Max(_) => CompressionLevel::Max,
        })
    };

    Ok(MergedConfig {
        entries,
        options: BatchOptions {
            output_dir,
            plan: PlanOptions {
                padding: args.padding.unwrap_or(loaded.config.padding),
                threshold: args.threshold.unwrap_or(loaded.config.threshold),
                row_height: args.row_height.unwrap_or(loaded.config.row_height),
            },
            compress,
        },
        verbose: args.verbose,
    })
}
