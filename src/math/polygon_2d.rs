use super::distance_2d::point_to_segment_dist;
use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the area-weighted centroid of a polygon.
///
/// Falls back to the vertex average for near-zero-area polygons.
#[must_use]
pub fn polygon_centroid_2d(points: &[Point2]) -> Point2 {
    let n = points.len();
    if n == 0 {
        return Point2::new(0.0, 0.0);
    }

    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE {
        #[allow(clippy::cast_precision_loss)]
        let inv_n = 1.0 / n as f64;
        return Point2::new(
            points.iter().map(|p| p.x).sum::<f64>() * inv_n,
            points.iter().map(|p| p.y).sum::<f64>() * inv_n,
        );
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        let f = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * f;
        cy += (p.y + q.y) * f;
    }
    let k = 1.0 / (6.0 * area);
    Point2::new(cx * k, cy * k)
}

/// Axis-aligned bounds of a point set: `(min, max)`.
#[must_use]
pub fn polygon_bounds(points: &[Point2]) -> (Point2, Point2) {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Ray-casting point-in-polygon test (boundary points are unspecified).
#[must_use]
pub fn point_in_polygon(p: &Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (xi, yi) = (poly[i].x, poly[i].y);
        let (xj, yj) = (poly[j].x, poly[j].y);
        if ((yi > p.y) != (yj > p.y)) && p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inclusive point-in-polygon test: boundary points within `tol` count as inside.
#[must_use]
pub fn point_in_polygon_inclusive(p: &Point2, poly: &[Point2], tol: f64) -> bool {
    if point_in_polygon(p, poly) {
        return true;
    }
    let n = poly.len();
    for i in 0..n {
        if point_to_segment_dist(p, &poly[i], &poly[(i + 1) % n]) <= tol {
            return true;
        }
    }
    false
}

/// Signed distance from `p` to the polygon boundary: positive inside,
/// negative outside.
#[must_use]
pub fn signed_distance_to_boundary(p: &Point2, poly: &[Point2]) -> f64 {
    let n = poly.len();
    let mut min_dist = f64::INFINITY;
    for i in 0..n {
        min_dist = min_dist.min(point_to_segment_dist(p, &poly[i], &poly[(i + 1) % n]));
    }
    if point_in_polygon(p, poly) {
        min_dist
    } else {
        -min_dist
    }
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for comparisons.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}
