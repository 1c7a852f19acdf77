use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use crate::math::polygon_2d::{
    point_in_polygon, polygon_bounds, polygon_centroid_2d, signed_distance_to_boundary,
};
use crate::math::Point2;

/// A search cell for the pole-of-inaccessibility walk.
#[derive(Debug, Clone, Copy)]
struct Cell {
    x: f64,
    y: f64,
    /// Half the cell's side length.
    h: f64,
    /// Signed distance from the cell center to the polygon boundary.
    d: f64,
    /// Upper bound on the distance achievable anywhere inside the cell.
    max: f64,
}

impl Cell {
    fn new(x: f64, y: f64, h: f64, poly: &[Point2]) -> Self {
        let d = signed_distance_to_boundary(&Point2::new(x, y), poly);
        Self {
            x,
            y,
            h,
            d,
            max: d + h * SQRT_2,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.max.total_cmp(&other.max) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.max.total_cmp(&other.max)
    }
}

/// Best-first search for the interior point farthest from the polygon
/// boundary.
///
/// Cells are subdivided while their optimistic bound can still beat the
/// current best by more than `precision`.
pub(super) fn pole_of_inaccessibility(poly: &[Point2], precision: f64) -> Point2 {
    let (min, max) = polygon_bounds(poly);
    let width = max.x - min.x;
    let height = max.y - min.y;
    let cell_size = width.min(height);
    if cell_size <= 0.0 {
        return polygon_centroid_2d(poly);
    }

    let h = cell_size / 2.0;
    let mut queue = BinaryHeap::new();

    let mut x = min.x;
    while x < max.x {
        let mut y = min.y;
        while y < max.y {
            queue.push(Cell::new(x + h, y + h, h, poly));
            y += cell_size;
        }
        x += cell_size;
    }

    let centroid = polygon_centroid_2d(poly);
    let mut best = Cell::new(centroid.x, centroid.y, 0.0, poly);
    let box_center = Cell::new(min.x + width / 2.0, min.y + height / 2.0, 0.0, poly);
    if box_center.d > best.d {
        best = box_center;
    }

    while let Some(cell) = queue.pop() {
        if cell.d > best.d {
            best = cell;
        }
        if cell.max - best.d <= precision {
            continue;
        }

        let h2 = cell.h / 2.0;
        queue.push(Cell::new(cell.x - h2, cell.y - h2, h2, poly));
        queue.push(Cell::new(cell.x + h2, cell.y - h2, h2, poly));
        queue.push(Cell::new(cell.x - h2, cell.y + h2, h2, poly));
        queue.push(Cell::new(cell.x + h2, cell.y + h2, h2, poly));
    }

    Point2::new(best.x, best.y)
}

/// Label anchor for a room polygon: pole of inaccessibility, falling back to
/// the centroid and then the bbox center if the candidate lands outside.
pub(super) fn room_label(poly: &[Point2], precision: f64) -> Point2 {
    let label = pole_of_inaccessibility(poly, precision);
    if point_in_polygon(&label, poly) {
        return label;
    }

    let centroid = polygon_centroid_2d(poly);
    if point_in_polygon(&centroid, poly) {
        return centroid;
    }

    let (min, max) = polygon_bounds(poly);
    Point2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0)
}
