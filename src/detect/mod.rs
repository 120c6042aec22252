mod rect;
mod regions;
mod rows;

pub use rect::Rect;
pub use regions::{find_regions, sort_regions};
pub use rows::{RowSlice, slice_rows};
