use serde::{Deserialize, Serialize};

use crate::detect::Rect;

/// How a sheet is cut into slices.
///
/// Always chosen explicitly, per input, by CLI subcommand or config
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceMode {
    /// Sprites at arbitrary positions, isolated by transparent gaps
    Islands,
    /// Evenly spaced full-width rows (e.g. rendered text lines)
    Rows,
}

/// Parameters shared by both slicing strategies
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    /// Transparent margin kept around each slice, in pixels
    pub padding: u32,
    /// Alpha values at or below this count as transparent
    pub threshold: u8,
    /// Row height for [`SliceMode::Rows`]
    pub row_height: u32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            padding: 2,
            threshold: 0,
            row_height: 32,
        }
    }
}

/// One named crop ready for the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceEntry {
    /// Generated output file name, e.g. `hero_003.png`
    pub name: String,
    /// Source rectangle to crop
    pub rect: Rect,
}

/// Ordered crop list for one sheet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlicePlan {
    pub entries: Vec<SliceEntry>,
}

impl SlicePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
