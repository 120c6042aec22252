use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::cli::CompressionLevel;
use crate::error::SashimiError;
use crate::extract::{PlanOptions, SliceMode, plan_slices};
use crate::output::save_slice;
use crate::sheet::load_sheet;

/// One configured input sheet
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub mode: SliceMode,
    /// Per-sheet row height, overriding [`BatchOptions::plan`]
    pub row_height: Option<u32>,
}

/// Settings shared by every sheet in a batch
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub plan: PlanOptions,
    pub compress: Option<CompressionLevel>,
}

/// Per-sheet outcome of a batch run
#[derive(Debug)]
pub enum SheetOutcome {
    /// The sheet was sliced; `failed` counts crops that could not be written
    Split { written: usize, failed: usize },
    /// The sheet produced no output at all (missing file, decode failure)
    Skipped(String),
}

#[derive(Debug)]
pub struct SheetReport {
    pub input: PathBuf,
    pub outcome: SheetOutcome,
}

/// Split every configured sheet and report a per-sheet outcome.
///
/// Sheets are independent, so they run across the rayon pool; reports
/// come back in entry order regardless of scheduling. A missing or
/// undecodable input skips that sheet only, and a failed crop write
/// skips that crop only. The cancel token is checked once per sheet,
/// before decoding.
pub fn run_batch(
    entries: &[BatchEntry],
    opts: &BatchOptions,
    cancel_token: Option<&Arc<AtomicBool>>,
) -> Result<Vec<SheetReport>> {
    fs::create_dir_all(&opts.output_dir).map_err(|e| SashimiError::OutputWrite {
        path: opts.output_dir.clone(),
        source: e,
    })?;

    entries
        .par_iter()
        .map(|entry| {
            if let Some(token) = cancel_token
                && token.load(Ordering::Relaxed)
            {
                return Err(SashimiError::Cancelled.into());
            }
            Ok(process_sheet(entry, opts))
        })
        .collect()
}

fn process_sheet(entry: &BatchEntry, opts: &BatchOptions) -> SheetReport {
    let input = entry.input.clone();

    if !input.exists() {
        let reason = SashimiError::InputNotFound(input.clone()).to_string();
        warn!("{}", reason);
        return SheetReport {
            input,
            outcome: SheetOutcome::Skipped(reason),
        };
    }

    let sheet = match load_sheet(&input) {
        Ok(sheet) => sheet,
        Err(e) => {
            warn!("{:#}", e);
            return SheetReport {
                input,
                outcome: SheetOutcome::Skipped(format!("{:#}", e)),
            };
        }
    };

    let plan_opts = PlanOptions {
        row_height: entry.row_height.unwrap_or(opts.plan.row_height),
        ..opts.plan
    };
    let plan = plan_slices(&sheet.image, entry.mode, &sheet.name, &plan_opts);
    info!(
        "{}: {} slices ({}x{})",
        input.display(),
        plan.len(),
        sheet.width(),
        sheet.height()
    );

    let mut written = 0;
    let mut failed = 0;
    for slice in &plan.entries {
        // Crops are independent; keep going after a failed write
        match save_slice(&sheet, slice, &opts.output_dir, opts.compress) {
            Ok(path) => {
                debug!(
                    "  {} ({}x{})",
                    path.display(),
                    slice.rect.width,
                    slice.rect.height
                );
                written += 1;
            }
            Err(e) => {
                warn!("{:#}", e);
                failed += 1;
            }
        }
    }

    SheetReport {
        input,
        outcome: SheetOutcome::Split { written, failed },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sashimi_{}_{}", tag, std::process::id()))
    }

    fn default_options(output_dir: PathBuf) -> BatchOptions {
        BatchOptions {
            output_dir,
            plan: PlanOptions::default(),
            compress: None,
        }
    }

    #[test]
    fn test_missing_input_is_skipped_not_fatal() {
        let out = temp_dir("missing");
        let entries = vec![BatchEntry {
            input: PathBuf::from("no_such_sheet.png"),
            mode: SliceMode::Islands,
            row_height: None,
        }];

        let reports = run_batch(&entries, &default_options(out.clone()), None).unwrap();

        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].outcome, SheetOutcome::Skipped(_)));
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn test_batch_splits_a_real_sheet() {
        let dir = temp_dir("split");
        std::fs::create_dir_all(&dir).unwrap();
        let sheet_path = dir.join("blocks.png");

        let mut img = RgbaImage::new(16, 16);
        for (x, y) in [(1u32, 1u32), (10, 10)] {
            for dy in 0..3 {
                for dx in 0..3 {
                    img.put_pixel(x + dx, y + dy, Rgba([255, 255, 255, 255]));
                }
            }
        }
        img.save_with_format(&sheet_path, ImageFormat::Png).unwrap();

        let out = dir.join("out");
        let entries = vec![BatchEntry {
            input: sheet_path,
            mode: SliceMode::Islands,
            row_height: None,
        }];

        let reports = run_batch(&entries, &default_options(out.clone()), None).unwrap();

        assert!(matches!(
            reports[0].outcome,
            SheetOutcome::Split { written: 2, failed: 0 }
        ));
        assert!(out.join("blocks_000.png").exists());
        assert!(out.join("blocks_001.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reports_come_back_in_entry_order() {
        let out = temp_dir("order");
        let entries: Vec<BatchEntry> = (0..4)
            .map(|i| BatchEntry {
                input: PathBuf::from(format!("missing_{}.png", i)),
                mode: SliceMode::Islands,
                row_height: None,
            })
            .collect();

        let reports = run_batch(&entries, &default_options(out.clone()), None).unwrap();

        let inputs: Vec<_> = reports.iter().map(|r| r.input.clone()).collect();
        let expected: Vec<_> = entries.iter().map(|e| e.input.clone()).collect();
        assert_eq!(inputs, expected);
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn test_cancelled_batch_errors() {
        let out = temp_dir("cancel");
        let token = Arc::new(AtomicBool::new(true));
        let entries = vec![BatchEntry {
            input: PathBuf::from("whatever.png"),
            mode: SliceMode::Rows,
            row_height: None,
        }];

        let result = run_batch(&entries, &default_options(out.clone()), Some(&token));

        assert!(result.is_err());
        std::fs::remove_dir_all(&out).ok();
    }
}
