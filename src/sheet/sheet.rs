use image::RgbaImage;
use std::path::PathBuf;

/// A decoded sprite sheet awaiting splitting
#[derive(Debug, Clone)]
pub struct SheetImage {
    /// Original file path
    pub path: PathBuf,
    /// File stem, used as the base name for generated slices
    pub name: String,
    /// Decoded RGBA pixel data
    pub image: RgbaImage,
}

impl SheetImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
