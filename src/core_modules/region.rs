// THEORY:
// A `Region` is one connected group of foreground mask pixels, described by the
// outer boundary that encloses it. It is the spatial unit the locator reasons
// about: each region is a candidate object, and the winner's bounding box gives
// the reported position.
//
// Key principles:
// 1.  **Outer boundaries only**: Border following (Suzuki-Abe, via `imageproc`)
//     also reports hole borders and islands sitting inside holes. Only top-level
//     outer borders are kept; an island inside a ring belongs to the ring.
// 2.  **Simplified chains**: The raw boundary lists every border pixel. Runs of
//     steps in the same direction collapse to their end points, so a
//     rectangle is four vertices no matter its size.
// 3.  **Filled area**: A region's area is the number of pixels its outer
//     boundary encloses, holes included. It is computed from the vertex
//     polygon with Pick's theorem: the polygon through pixel centres has
//     shoelace area A and B lattice points on its boundary, and the enclosed
//     pixel count is A + B/2 + 1. A w x h rectangle therefore measures w*h.
// 4.  **Stable order**: Regions come out in raster order of the first pixel
//     where their border was found. Selection ties are broken by this order.

use image::GrayImage;
use image::imageops::replace;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

/// Axis-aligned box in pixels; `width` and `height` count pixels inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Centre of the box as `(x + w/2, y + h/2)`, not snapped to the pixel grid.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Closed boundary polygon; the last vertex connects back to the first.
    vertices: Vec<Point<i32>>,
}

impl Region {
    /// Builds a region from a traced boundary, dropping collinear points.
    pub fn from_boundary(points: &[Point<i32>]) -> Self {
        Self {
            vertices: simplify_chain(points),
        }
    }

    pub fn vertices(&self) -> &[Point<i32>] {
        &self.vertices
    }

    /// Number of pixels enclosed by the outer boundary, holes included.
    pub fn area(&self) -> f64 {
        let count = self.vertices.len();
        if count == 0 {
            return 0.0;
        }
        let mut twice_area: i64 = 0;
        let mut boundary_points: i64 = 0;
        for (i, a) in self.vertices.iter().enumerate() {
            let b = self.vertices[(i + 1) % count];
            twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
            boundary_points += gcd((b.x - a.x).abs(), (b.y - a.y).abs()) as i64;
        }
        twice_area.abs() as f64 / 2.0 + boundary_points as f64 / 2.0 + 1.0
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let Some(first) = self.vertices.first() else {
            return BoundingBox::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &self.vertices[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }
}

/// Extracts every top-level connected region of non-zero mask pixels.
pub fn find_outer_regions(mask: &GrayImage) -> Vec<Region> {
    // Border following misclassifies borders that run along the image edge,
    // so trace a copy framed by one background pixel on every side.
    let (width, height) = mask.dimensions();
    let mut framed = GrayImage::new(width + 2, height + 2);
    replace(&mut framed, mask, 1, 1);

    find_contours::<i32>(&framed)
        .iter()
        .filter(|contour| {
            matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none()
        })
        .map(|contour| {
            let points: Vec<Point<i32>> = contour
                .points
                .iter()
                .map(|point| Point::new(point.x - 1, point.y - 1))
                .collect();
            Region::from_boundary(&points)
        })
        .collect()
}

/// Keeps only the points where the chain changes direction.
fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let count = points.len();
    if count < 3 {
        return points.to_vec();
    }
    let direction = |from: Point<i32>, to: Point<i32>| {
        ((to.x - from.x).signum(), (to.y - from.y).signum())
    };

    let kept: Vec<Point<i32>> = (0..count)
        .filter(|&i| {
            let previous = points[(i + count - 1) % count];
            let next = points[(i + 1) % count];
            direction(previous, points[i]) != direction(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}

fn gcd(mut a: i32, mut b: i32) -> i32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with(width: u32, height: u32, on: impl Fn(u32, u32) -> bool) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([if on(x, y) { 255 } else { 0 }]))
    }

    #[test]
    fn rectangle_measures_its_pixel_count() {
        let mask = mask_with(20, 20, |x, y| (3..13).contains(&x) && (5..9).contains(&y));
        let regions = find_outer_regions(&mask);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].vertices().len(), 4);
        assert_eq!(regions[0].area(), 40.0);
        assert_eq!(
            regions[0].bounding_box(),
            BoundingBox {
                x: 3,
                y: 5,
                width: 10,
                height: 4
            }
        );
        assert_eq!(regions[0].bounding_box().center(), (8.0, 7.0));
    }

    #[test]
    fn single_pixels_and_thin_lines_have_area() {
        let mask = mask_with(10, 10, |x, y| (x, y) == (4, 4));
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area(), 1.0);
        assert_eq!(regions[0].bounding_box().center(), (4.5, 4.5));

        let mask = mask_with(10, 10, |x, y| y == 2 && (1..8).contains(&x));
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area(), 7.0);
    }

    #[test]
    fn l_shape_counts_every_pixel() {
        let mask = mask_with(12, 12, |x, y| {
            ((2..4).contains(&x) && (2..10).contains(&y))
                || ((2..8).contains(&x) && (8..10).contains(&y))
        });
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area(), 24.0);
    }

    #[test]
    fn holes_count_and_islands_inside_them_are_ignored() {
        let mask = mask_with(14, 14, |x, y| {
            let in_ring = (1..11).contains(&x) && (1..11).contains(&y);
            let in_hole = (3..9).contains(&x) && (3..9).contains(&y);
            let in_island = (5..7).contains(&x) && (5..7).contains(&y);
            (in_ring && !in_hole) || in_island
        });
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area(), 100.0);
    }

    #[test]
    fn diagonal_neighbours_are_connected() {
        let mask = mask_with(10, 10, |x, y| {
            ((1..4).contains(&x) && (1..4).contains(&y))
                || ((4..7).contains(&x) && (4..7).contains(&y))
        });
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area(), 18.0);
    }

    #[test]
    fn regions_touching_the_border_are_closed_by_it() {
        let mask = mask_with(5, 4, |_, _| true);
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area(), 20.0);
    }

    #[test]
    fn edge_regions_after_earlier_ones_are_kept() {
        let rects = [
            (2, 0, 2, 2),
            (20, 0, 5, 5),
            (12, 3, 3, 3),
            (0, 10, 5, 5),
            (25, 12, 5, 5),
            (10, 25, 5, 5),
        ];
        let mask = mask_with(30, 30, |x, y| {
            rects
                .iter()
                .any(|&(rx, ry, w, h)| (rx..rx + w).contains(&x) && (ry..ry + h).contains(&y))
        });
        let regions = find_outer_regions(&mask);

        let boxes: Vec<BoundingBox> = regions.iter().map(Region::bounding_box).collect();
        let expected: Vec<BoundingBox> = rects
            .iter()
            .map(|&(x, y, width, height)| BoundingBox {
                x: x as i32,
                y: y as i32,
                width: width as i32,
                height: height as i32,
            })
            .collect();
        assert_eq!(boxes, expected);

        let areas: Vec<f64> = regions.iter().map(Region::area).collect();
        assert_eq!(areas, vec![4.0, 25.0, 9.0, 25.0, 25.0, 25.0]);
    }

    #[test]
    fn lone_edge_pixels_are_regions() {
        let mask = mask_with(6, 4, |x, y| (x, y) == (3, 0) || (x, y) == (0, 1) || (x, y) == (5, 3));
        let regions = find_outer_regions(&mask);
        let centres: Vec<(f64, f64)> =
            regions.iter().map(|region| region.bounding_box().center()).collect();
        assert_eq!(centres, vec![(3.5, 0.5), (0.5, 1.5), (5.5, 3.5)]);
        assert!(regions.iter().all(|region| region.area() == 1.0));
    }

    #[test]
    fn regions_come_out_in_raster_order() {
        let mask = mask_with(30, 30, |x, y| {
            ((20..25).contains(&x) && (2..6).contains(&y))
                || ((2..6).contains(&x) && (10..20).contains(&y))
        });
        let regions = find_outer_regions(&mask);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].bounding_box().x, 20);
        assert_eq!(regions[1].bounding_box().x, 2);
    }

    #[test]
    fn empty_mask_has_no_regions() {
        assert!(find_outer_regions(&GrayImage::new(16, 16)).is_empty());
    }

    #[test]
    fn collinear_runs_collapse() {
        let chain = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)];
        let points: Vec<Point<i32>> = chain
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        let region = Region::from_boundary(&points);
        assert_eq!(
            region.vertices(),
            &[Point::new(0, 0), Point::new(2, 0), Point::new(2, 2), Point::new(0, 2)]
        );
        assert_eq!(region.area(), 9.0);
    }
}
