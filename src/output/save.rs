use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{ImageFormat, imageops};

use crate::cli::CompressionLevel;
use crate::error::SashimiError;
use crate::extract::SliceEntry;
use crate::sheet::SheetImage;

/// Crop one planned slice out of its sheet and write it as PNG,
/// optionally recompressed. Returns the written path.
pub fn save_slice(
    sheet: &SheetImage,
    entry: &SliceEntry,
    out_dir: &Path,
    compress: Option<CompressionLevel>,
) -> Result<PathBuf> {
    let rect = &entry.rect;
    let path = out_dir.join(&entry.name);

    let cropped =
        imageops::crop_imm(&sheet.image, rect.x, rect.y, rect.width, rect.height).to_image();

    // Encode to PNG in memory
    let mut png_data = Cursor::new(Vec::new());
    cropped
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| SashimiError::ImageSave {
            path: path.clone(),
            source: e,
        })?;

    let output_data = if let Some(level) = compress {
        // Recompress with oxipng
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            SashimiError::PngCompress {
                path: path.clone(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data.into_inner()
    };

    fs::write(&path, output_data).map_err(|e| SashimiError::OutputWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}
