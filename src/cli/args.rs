use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sashimi")]
#[command(version, about = "Sprite sheet splitter", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split sprites isolated by transparent gaps (arbitrary packing)
    Islands(CommonArgs),
    /// Split evenly spaced full-width rows (e.g. rendered text lines)
    Rows(RowsArgs),
    /// Run a batch of sheets described by a config file
    Batch(BatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input sheet images
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Output directory for sliced images [default: split]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Transparent margin kept around each slice in pixels [default: 2]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Alpha values at or below this count as transparent [default: 0]
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RowsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Height of each row in pixels [default: 32]
    #[arg(long, value_name = "PIXELS")]
    pub row_height: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Config file listing sheets and their slice modes
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: PathBuf,

    /// Override the config's output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the config's padding
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Override the config's alpha threshold
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Override the config's row height
    #[arg(long, value_name = "PIXELS")]
    pub row_height: Option<u32>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
