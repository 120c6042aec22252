use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::SashimiConfig;
use crate::batch::BatchEntry;

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: SashimiConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: SashimiConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Resolve the sheet list to concrete batch entries.
    ///
    /// Glob patterns expand to one entry per matched file, in the
    /// glob's sorted order, all inheriting the pattern's mode. Plain
    /// paths pass through untouched so that a missing file is still
    /// reported (and skipped) at processing time. All paths resolve
    /// relative to the config file directory.
    pub fn resolve_entries(&self) -> Result<Vec<BatchEntry>> {
        let mut entries = Vec::new();

        for sheet in &self.config.sheets {
            if is_glob_pattern(&sheet.input) {
                let full_pattern = self.config_dir.join(&sheet.input);
                let pattern_str = full_pattern.to_string_lossy();

                let paths = glob::glob(&pattern_str)
                    .with_context(|| format!("invalid glob pattern: {}", sheet.input))?;

                for entry in paths {
                    let path = entry
                        .with_context(|| format!("failed to read glob entry: {}", sheet.input))?;
                    entries.push(BatchEntry {
                        input: path,
                        mode: sheet.mode,
                        row_height: sheet.row_height,
                    });
                }
            } else {
                entries.push(BatchEntry {
                    input: self.config_dir.join(&sheet.input),
                    mode: sheet.mode,
                    row_height: sheet.row_height,
                });
            }
        }

        Ok(entries)
    }

    /// Resolve the output directory relative to the config file directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_dir)
    }
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("*.png"));
        assert!(is_glob_pattern("sheets/*.webp"));
        assert!(is_glob_pattern("sheets/**/*.png"));
        assert!(is_glob_pattern("sheet?.png"));
        assert!(is_glob_pattern("sheet[0-9].png"));
        assert!(!is_glob_pattern("sheet.png"));
        assert!(!is_glob_pattern("sheets/ui_text.png"));
    }
}
