use super::Rect;
use crate::sheet::PixelGrid;

/// One fixed-height row cut from a sheet.
///
/// `index` is the row's position in the grid, not its position in the
/// output: skipped blank rows never renumber the rows after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlice {
    pub index: usize,
    pub rect: Rect,
}

/// Cut a sheet into `floor(height / row_height)` full-width rows.
///
/// Row `i` spans `[i*row_height - padding, (i+1)*row_height + padding)`
/// vertically, clamped to the grid; a trailing partial row is never
/// emitted. Rows whose every pixel has alpha at or below `threshold`
/// are skipped.
///
/// Returns an empty list when `row_height` is 0 rather than dividing by
/// zero; callers validate that case up front.
pub fn slice_rows<G: PixelGrid>(
    grid: &G,
    row_height: u32,
    padding: u32,
    threshold: u8,
) -> Vec<RowSlice> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || row_height == 0 {
        return Vec::new();
    }

    let count = height / row_height;
    let mut slices = Vec::new();

    for i in 0..count {
        let top = (i * row_height).saturating_sub(padding);
        let bottom = ((i + 1) * row_height + padding).min(height);
        let rect = Rect::new(0, top, width, bottom - top);

        if is_blank(grid, &rect, threshold) {
            continue;
        }
        slices.push(RowSlice {
            index: i as usize,
            rect,
        });
    }

    slices
}

/// True iff every pixel inside `rect` is at or below the threshold.
/// A single opaque pixel anywhere in the row keeps it.
fn is_blank<G: PixelGrid>(grid: &G, rect: &Rect, threshold: u8) -> bool {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if grid.alpha(x, y) > threshold {
                return false;
            }
        }
    }
    true
}
