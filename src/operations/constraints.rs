use crate::math::distance_2d::{point_to_point_dist, project_point_to_segment};
use crate::math::intersect_2d::{segment_segment_intersect_2d, SegmentIntersection};
use crate::math::polygon_2d::point_in_polygon_inclusive;
use crate::math::{Point2, TOLERANCE};
use crate::plan::units::CAPITAL_CLEARANCE;
use crate::plan::{EnvelopeCache, PlanStore, ViewScale, WallId};

/// Interior sample count for envelope containment and clearance checks.
const SEGMENT_SAMPLES: usize = 24;

/// Decides whether a candidate wall segment is geometrically legal.
///
/// A segment passes when it lies inside the capital envelope (inclusive, with
/// a pixel-derived tolerance) and makes no improper crossings with partition
/// walls: collinear overlaps longer than the tolerance are rejected, and a
/// point intersection is legal only when it happens near an endpoint of
/// either segment — that is the rule that allows clean T- and L-junctions
/// while forbidding a wall crossing through the interior of another.
///
/// Rejection is an ordinary `false`, never an error.
#[derive(Debug)]
pub struct SegmentAllowed {
    a: Point2,
    b: Point2,
    ignore_wall: Option<WallId>,
    tol_px: f64,
}

impl SegmentAllowed {
    /// Creates a validation query for the segment `a → b`.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            a,
            b,
            ignore_wall: None,
            tol_px: 2.0,
        }
    }

    /// Excludes a wall from the crossing check (the wall being moved or
    /// resized).
    #[must_use]
    pub fn ignore_wall(mut self, wall: WallId) -> Self {
        self.ignore_wall = Some(wall);
        self
    }

    /// Overrides the pixel tolerance (default 2 px).
    #[must_use]
    pub fn tolerance_px(mut self, tol_px: f64) -> Self {
        self.tol_px = tol_px;
        self
    }

    /// Executes the validation against the current wall set.
    #[must_use]
    pub fn execute(
        &self,
        store: &PlanStore,
        cache: &mut EnvelopeCache,
        view: ViewScale,
    ) -> bool {
        let tol_world = view.world_tol(self.tol_px);

        // 1) Inside the capital envelope, if one exists.
        if let Some(envelope) = cache.envelope(store) {
            let poly = envelope.polygon();
            if poly.len() >= 3 {
                if !point_in_polygon_inclusive(&self.a, poly, tol_world)
                    || !point_in_polygon_inclusive(&self.b, poly, tol_world)
                {
                    return false;
                }
                for i in 1..SEGMENT_SAMPLES {
                    #[allow(clippy::cast_precision_loss)]
                    let t = i as f64 / SEGMENT_SAMPLES as f64;
                    let p = lerp(&self.a, &self.b, t);
                    if !point_in_polygon_inclusive(&p, poly, tol_world) {
                        return false;
                    }
                }
            }
        }

        // 2) No interior-interior crossings with partition axes.
        for (id, wall) in store.partitions() {
            if self.ignore_wall == Some(id) {
                continue;
            }

            let c = wall.construction_a();
            let d = wall.construction_b();

            match segment_segment_intersect_2d(&self.a, &self.b, &c, &d) {
                None => {}
                Some(SegmentIntersection::Overlap { len }) => {
                    // Collinear overlap beyond touching is never legal.
                    if len > tol_world {
                        return false;
                    }
                }
                Some(SegmentIntersection::Point { t, u, .. }) => {
                    let t_band = end_band(tol_world, &self.a, &self.b);
                    let u_band = end_band(tol_world, &c, &d);
                    let t_is_end = t <= t_band || t >= 1.0 - t_band;
                    let u_is_end = u <= u_band || u >= 1.0 - u_band;
                    if !t_is_end && !u_is_end {
                        return false;
                    }
                }
            }
        }

        true
    }
}

/// World tolerance expressed as a parameter band at a segment's ends,
/// capped at a quarter of the segment.
fn end_band(tol_world: f64, a: &Point2, b: &Point2) -> f64 {
    let len = point_to_point_dist(a, b);
    if len < TOLERANCE {
        return 1.0;
    }
    (tol_world / len).min(0.25)
}

/// Minimum distance from `p` to any capital wall axis; infinity when the
/// plan has no capital walls.
#[must_use]
pub fn min_dist_to_capitals(store: &PlanStore, p: &Point2) -> f64 {
    let mut best = f64::INFINITY;
    for (_, wall) in store.capitals() {
        let pr = project_point_to_segment(p, &wall.a, &wall.b);
        if pr.distance < best {
            best = pr.distance;
        }
    }
    best
}

/// Checks that a segment's interior keeps clear of capital wall thickness.
///
/// Interior stations are sampled with a guard band at each end — the ends
/// are allowed to touch or snap onto a capital axis; only the span between
/// them must stay out of the rendered wall thickness.
#[derive(Debug)]
pub struct SegmentClearOfCapitals {
    a: Point2,
    b: Point2,
    clear_world: f64,
    end_guard: f64,
    samples: usize,
}

impl SegmentClearOfCapitals {
    /// Creates a clearance query with the default clearance
    /// (half capital + half partition thickness, minus the joint overlap).
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            a,
            b,
            clear_world: CAPITAL_CLEARANCE,
            end_guard: 0.06,
            samples: SEGMENT_SAMPLES,
        }
    }

    /// Overrides the required clearance, in world units.
    #[must_use]
    pub fn clearance(mut self, clear_world: f64) -> Self {
        self.clear_world = clear_world;
        self
    }

    /// Overrides the parameter-space guard band at each end (default 6%).
    #[must_use]
    pub fn end_guard(mut self, end_guard: f64) -> Self {
        self.end_guard = end_guard;
        self
    }

    /// Executes the clearance check.
    #[must_use]
    pub fn execute(&self, store: &PlanStore) -> bool {
        for i in 0..=self.samples {
            #[allow(clippy::cast_precision_loss)]
            let s = i as f64 / self.samples as f64;
            let t = self.end_guard + (1.0 - 2.0 * self.end_guard) * s;
            let p = lerp(&self.a, &self.b, t);
            if min_dist_to_capitals(store, &p) < self.clear_world {
                return false;
            }
        }
        true
    }
}

fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
