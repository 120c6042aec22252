mod grid;
mod loader;
mod sheet;

pub use grid::PixelGrid;
pub use loader::load_sheet;
pub use sheet::SheetImage;
