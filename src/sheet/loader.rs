use std::path::Path;

use anyhow::Result;
use image::ImageReader;

use super::SheetImage;
use crate::error::SashimiError;

/// Decode a single sheet image into RGBA pixels.
///
/// The file stem becomes the base name for every slice cut from this
/// sheet, matching the `{base}_{index:03}.png` output convention.
pub fn load_sheet(path: &Path) -> Result<SheetImage> {
    let image = ImageReader::open(path)
        .map_err(|e| SashimiError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SashimiError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet")
        .to_string();

    Ok(SheetImage {
        path: path.to_path_buf(),
        name,
        image,
    })
}
