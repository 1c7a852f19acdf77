use super::{Point2, Vector2};

/// Determinant threshold below which two directions are treated as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// Tolerance for collinearity and for discarding negligible overlaps.
const COLLINEAR_EPS: f64 = 1e-9;

/// Classification of a bounded segment-segment intersection.
#[derive(Debug, Clone, Copy)]
pub enum SegmentIntersection {
    /// The segments cross at a single point; `t` parameterizes `a → b`,
    /// `u` parameterizes `c → d`, both in `[0, 1]`.
    Point { point: Point2, t: f64, u: f64 },
    /// The segments are collinear and share an interval of the given length.
    Overlap { len: f64 },
}

/// Classifies the intersection of segments `a → b` and `c → d`.
///
/// Returns `None` for disjoint, parallel-but-not-collinear, and
/// touching-shorter-than-tolerance collinear configurations.
#[must_use]
pub fn segment_segment_intersect_2d(
    a: &Point2,
    b: &Point2,
    c: &Point2,
    d: &Point2,
) -> Option<SegmentIntersection> {
    let r = Vector2::new(b.x - a.x, b.y - a.y);
    let s = Vector2::new(d.x - c.x, d.y - c.y);
    let ca = Vector2::new(c.x - a.x, c.y - a.y);

    let denom = cross(&r, &s);

    if denom.abs() < PARALLEL_EPS {
        // Parallel. Not collinear => no intersection.
        if cross(&ca, &r).abs() > COLLINEAR_EPS {
            return None;
        }

        let rr = r.x * r.x + r.y * r.y;
        if rr < COLLINEAR_EPS {
            return None;
        }

        // Project both endpoints of c→d onto a→b and intersect the intervals.
        let t0 = ((c.x - a.x) * r.x + (c.y - a.y) * r.y) / rr;
        let t1 = ((d.x - a.x) * r.x + (d.y - a.y) * r.y) / rr;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);

        if hi < lo {
            return None;
        }

        let len = (r.x * r.x + r.y * r.y).sqrt() * (hi - lo);
        if len < COLLINEAR_EPS {
            return None;
        }

        return Some(SegmentIntersection::Overlap { len });
    }

    let t = cross(&ca, &s) / denom;
    let u = cross(&ca, &r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        let point = Point2::new(a.x + t * r.x, a.y + t * r.y);
        return Some(SegmentIntersection::Point { point, t, u });
    }

    None
}

fn cross(v: &Vector2, w: &Vector2) -> f64 {
    v.x * w.y - v.y * w.x
}
