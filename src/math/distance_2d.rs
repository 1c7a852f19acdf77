use super::{Point2, TOLERANCE};

/// Result of projecting a point onto a bounded segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjection {
    /// The closest point on the segment.
    pub point: Point2,
    /// Parameter of the closest point in `[0, 1]` along `a → b`.
    pub t: f64,
    /// Distance from the query point to the closest point.
    pub distance: f64,
}

/// Projects point `p` onto the segment `a → b`, clamping the parameter to `[0, 1]`.
///
/// A degenerate (zero-length) segment collapses to `a` with `t = 0`.
#[must_use]
pub fn project_point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < TOLERANCE {
        return SegmentProjection {
            point: *a,
            t: 0.0,
            distance: ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt(),
        };
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let closest = Point2::new(a.x + t * dx, a.y + t * dy);

    SegmentProjection {
        point: closest,
        t,
        distance: ((p.x - closest.x).powi(2) + (p.y - closest.y).powi(2)).sqrt(),
    }
}

/// Returns the minimum distance from point `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    project_point_to_segment(p, a, b).distance
}

/// Euclidean distance between two points.
#[must_use]
pub fn point_to_point_dist(p: &Point2, q: &Point2) -> f64 {
    ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn projection_perpendicular() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let pr = project_point_to_segment(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((pr.point.x - 1.0).abs() < TOL);
        assert!(pr.point.y.abs() < TOL);
        assert!((pr.t - 0.5).abs() < TOL);
        assert!((pr.distance - 1.0).abs() < TOL);
    }

    #[test]
    fn projection_clamps_to_endpoint() {
        // Point (-1, 0) projects before the segment start; clamped to a.
        let pr = project_point_to_segment(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!(pr.t.abs() < TOL);
        assert!((pr.distance - 1.0).abs() < TOL);
    }

    #[test]
    fn projection_degenerate_segment() {
        // Zero-length segment collapses to a with t = 0.
        let a = Point2::new(1.0, 2.0);
        let pr = project_point_to_segment(&Point2::new(4.0, 6.0), &a, &a);
        assert!((pr.point.x - 1.0).abs() < TOL);
        assert!((pr.point.y - 2.0).abs() < TOL);
        assert!(pr.t.abs() < TOL);
        assert!((pr.distance - 5.0).abs() < TOL);
    }

    #[test]
    fn segment_dist_on_segment() {
        let d = point_to_segment_dist(
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!(d.abs() < TOL);
    }

    #[test]
    fn point_dist_basic() {
        let d = point_to_point_dist(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < TOL);
    }
}
