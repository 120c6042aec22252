use super::Rect;
use crate::sheet::PixelGrid;

/// Find the bounding boxes of all 4-connected regions of opaque pixels.
///
/// A pixel is opaque iff its alpha exceeds `threshold`. Regions are
/// returned in row-major seed-discovery order (top-to-bottom, then
/// left-to-right); call [`sort_regions`] for final reading order.
///
/// Diagonal adjacency does not connect regions: two sprites touching
/// only at a corner are reported separately. Their bounding boxes may
/// overlap; each is still reported on its own.
pub fn find_regions<G: PixelGrid>(grid: &G, threshold: u8) -> Vec<Rect> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; width as usize * height as usize];
    // Heap-allocated fill frontier, reused across regions. An explicit
    // stack keeps large blobs from overflowing the call stack.
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            if visited[idx] || grid.alpha(x, y) <= threshold {
                continue;
            }
            regions.push(fill_region(grid, threshold, x, y, &mut visited, &mut stack));
        }
    }

    regions
}

/// Flood-fill one region from a seed pixel, marking every reached pixel
/// visited and accumulating the bounding box.
fn fill_region<G: PixelGrid>(
    grid: &G,
    threshold: u8,
    seed_x: u32,
    seed_y: u32,
    visited: &mut [bool],
    stack: &mut Vec<(u32, u32)>,
) -> Rect {
    let (width, height) = (grid.width(), grid.height());

    let mut min_x = seed_x;
    let mut max_x = seed_x;
    let mut min_y = seed_y;
    let mut max_y = seed_y;

    stack.clear();
    stack.push((seed_x, seed_y));

    while let Some((x, y)) = stack.pop() {
        let idx = y as usize * width as usize + x as usize;
        if visited[idx] || grid.alpha(x, y) <= threshold {
            continue;
        }
        visited[idx] = true;

        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        // 4-connectivity; neighbors are bounds-checked before pushing
        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Sort regions into reading order: top row first, left-to-right.
///
/// The sort is stable, so regions with identical corners keep their
/// discovery order.
pub fn sort_regions(regions: &mut [Rect]) {
    regions.sort_by_key(|r| (r.y, r.x));
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const OPAQUE: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn fill_block(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, OPAQUE);
            }
        }
    }

    #[test]
    fn test_two_separated_blocks() {
        let mut img = RgbaImage::new(16, 16);
        fill_block(&mut img, 0, 0, 3, 3);
        fill_block(&mut img, 10, 10, 13, 13);

        let regions = find_regions(&img, 0);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], Rect::new(0, 0, 3, 3));
        assert_eq!(regions[1], Rect::new(10, 10, 3, 3));
    }

    #[test]
    fn test_diagonal_pixels_are_separate() {
        let mut img = RgbaImage::new(4, 4);
        img.put_pixel(0, 0, OPAQUE);
        img.put_pixel(1, 1, OPAQUE);

        let regions = find_regions(&img, 0);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], Rect::new(0, 0, 1, 1));
        assert_eq!(regions[1], Rect::new(1, 1, 1, 1));
    }

    #[test]
    fn test_fully_opaque_grid_is_one_region() {
        let mut img = RgbaImage::new(7, 5);
        fill_block(&mut img, 0, 0, 7, 5);

        let regions = find_regions(&img, 0);

        assert_eq!(regions, vec![Rect::new(0, 0, 7, 5)]);
    }

    #[test]
    fn test_fully_transparent_grid_has_no_regions() {
        let img = RgbaImage::new(8, 8);
        assert!(find_regions(&img, 0).is_empty());
    }

    #[test]
    fn test_single_pixel_region() {
        let mut img = RgbaImage::new(5, 5);
        img.put_pixel(2, 3, OPAQUE);

        let regions = find_regions(&img, 0);

        assert_eq!(regions, vec![Rect::new(2, 3, 1, 1)]);
    }

    #[test]
    fn test_l_shape_is_one_region() {
        let mut img = RgbaImage::new(6, 6);
        fill_block(&mut img, 0, 0, 1, 4);
        fill_block(&mut img, 0, 3, 4, 4);

        let regions = find_regions(&img, 0);

        assert_eq!(regions, vec![Rect::new(0, 0, 4, 4)]);
    }

    #[test]
    fn test_threshold_gates_opacity() {
        let mut img = RgbaImage::new(4, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 10]));
        img.put_pixel(2, 0, Rgba([0, 0, 0, 200]));

        // alpha <= 10 counts as transparent
        let regions = find_regions(&img, 10);

        assert_eq!(regions, vec![Rect::new(2, 0, 1, 1)]);
    }

    #[test]
    fn test_every_opaque_pixel_is_covered() {
        let mut img = RgbaImage::new(12, 12);
        fill_block(&mut img, 1, 1, 4, 4);
        fill_block(&mut img, 6, 2, 11, 5);
        img.put_pixel(0, 11, OPAQUE);

        let regions = find_regions(&img, 0);

        for y in 0..12 {
            for x in 0..12 {
                let covered = regions.iter().any(|r| {
                    x >= r.x && x < r.right() && y >= r.y && y < r.bottom()
                });
                if img.get_pixel(x, y)[3] > 0 {
                    assert!(covered, "opaque pixel ({x}, {y}) not in any region");
                }
            }
        }
        // No region is empty of opaque pixels
        for r in &regions {
            let has_opaque = (r.y..r.bottom())
                .any(|y| (r.x..r.right()).any(|x| img.get_pixel(x, y)[3] > 0));
            assert!(has_opaque);
        }
    }

    #[test]
    fn test_discovery_order_is_row_major_by_seed() {
        let mut img = RgbaImage::new(10, 10);
        // Seed of the right block is scanned first (y=0), left block later (y=5)
        fill_block(&mut img, 7, 0, 9, 2);
        fill_block(&mut img, 0, 5, 2, 7);

        let regions = find_regions(&img, 0);

        assert_eq!(regions[0], Rect::new(7, 0, 2, 2));
        assert_eq!(regions[1], Rect::new(0, 5, 2, 2));
    }

    #[test]
    fn test_sort_regions_reading_order() {
        let mut regions = vec![
            Rect::new(8, 4, 2, 2),
            Rect::new(0, 4, 2, 2),
            Rect::new(3, 0, 2, 2),
        ];

        sort_regions(&mut regions);

        assert_eq!(regions[0], Rect::new(3, 0, 2, 2));
        assert_eq!(regions[1], Rect::new(0, 4, 2, 2));
        assert_eq!(regions[2], Rect::new(8, 4, 2, 2));
        // Total order over (y, x)
        for pair in regions.windows(2) {
            assert!(pair[0].y < pair[1].y || (pair[0].y == pair[1].y && pair[0].x <= pair[1].x));
        }
    }
}
