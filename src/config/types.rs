use serde::{Deserialize, Serialize};

use crate::extract::SliceMode;

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// One sheet to split, with its slicing mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Input file path or glob pattern
    pub input: String,
    /// How this sheet is packed: "islands" or "rows"
    pub mode: SliceMode,
    /// Per-sheet row height, overriding the top-level value
    #[serde(default)]
    pub row_height: Option<u32>,
}

/// Sashimi configuration file structure.
///
/// All paths in the config are relative to the config file location.
/// Sheets are processed, and reported, in list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SashimiConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Output directory for sliced images
    pub output_dir: String,
    /// Transparent margin kept around each slice, in pixels
    pub padding: u32,
    /// Alpha values at or below this count as transparent
    pub threshold: u8,
    /// Row height in pixels for sheets in "rows" mode
    pub row_height: u32,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Sheets to split, in processing order
    pub sheets: Vec<SheetConfig>,
}

impl Default for SashimiConfig {
    fn default() -> Self {
        Self {
            version: 1,
            output_dir: "split".to_string(),
            padding: 2,
            threshold: 0,
            row_height: 32,
            compress: None,
            sheets: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: SashimiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.output_dir, "split");
        assert_eq!(config.padding, 2);
        assert_eq!(config.threshold, 0);
        assert_eq!(config.row_height, 32);
        assert!(config.compress.is_none());
        assert!(config.sheets.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "version": 1,
            "output_dir": "out",
            "padding": 1,
            "row_height": 48,
            "compress": 3,
            "sheets": [
                { "input": "ui_text.png", "mode": "rows", "row_height": 24 },
                { "input": "icons/*.webp", "mode": "islands" }
            ]
        }"#;

        let config: SashimiConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.sheets.len(), 2);
        assert_eq!(config.sheets[0].mode, SliceMode::Rows);
        assert_eq!(config.sheets[0].row_height, Some(24));
        assert_eq!(config.sheets[1].mode, SliceMode::Islands);
        assert_eq!(config.sheets[1].row_height, None);
        assert!(matches!(config.compress, Some(CompressConfig::Level(3))));
    }

    #[test]
    fn test_parse_max_compression() {
        let json = r#"{ "compress": "max" }"#;
        let config: SashimiConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.compress, Some(CompressConfig::Max(_))));
    }
}
