use super::{PlanOptions, SliceEntry, SliceMode, SlicePlan};
use crate::detect::{find_regions, slice_rows, sort_regions};
use crate::sheet::PixelGrid;

/// Turn one sheet into an ordered, named crop list.
///
/// Island mode finds connected opaque regions, orders them top-to-
/// bottom then left-to-right, and pads each box. Row mode cuts fixed-
/// height rows and skips blank ones. Either way the result is fully
/// determined by the grid and options: running the planner twice
/// yields an identical plan.
///
/// Performs no I/O; cropping and encoding happen downstream.
pub fn plan_slices<G: PixelGrid>(
    grid: &G,
    mode: SliceMode,
    base_name: &str,
    opts: &PlanOptions,
) -> SlicePlan {
    let entries = match mode {
        SliceMode::Islands => {
            let mut regions = find_regions(grid, opts.threshold);
            sort_regions(&mut regions);
            regions
                .iter()
                .enumerate()
                .map(|(i, region)| SliceEntry {
                    name: format!("{}_{:03}.png", base_name, i),
                    rect: region.expand_clamped(opts.padding, grid.width(), grid.height()),
                })
                .collect()
        }
        SliceMode::Rows => slice_rows(grid, opts.row_height, opts.padding, opts.threshold)
            .into_iter()
            .map(|row| SliceEntry {
                name: format!("{}_text_{:03}.png", base_name, row.index),
                rect: row.rect,
            })
            .collect(),
    };

    SlicePlan { entries }
}
