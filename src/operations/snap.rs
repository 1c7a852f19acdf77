use crate::math::distance_2d::{point_to_point_dist, project_point_to_segment};
use crate::math::{Point2, TOLERANCE};
use crate::plan::units::GRID_STEP_SNAP;
use crate::plan::{PlanStore, ViewScale, WallId};

/// Which construction aid produced a snap candidate.
///
/// Variant order is priority order: when several candidates sit within the
/// snap radius, the later variant wins and equal kinds are decided by
/// distance. The capital-axis pull is intentionally weakest so it never
/// overrides a partition-to-partition joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnapKind {
    /// Clamped projection onto the nearest capital wall axis (tier 1).
    CapitalAxis,
    /// Nearest grid multiple (tier 2).
    Grid,
    /// Horizontal/vertical alignment with the reference point (tier 3).
    Axis,
    /// Projection onto the interior of a partition wall axis (tier 4).
    TJunction,
    /// Wall endpoint or a grid-pitch station along a partition axis (tier 5).
    Endpoint,
}

/// Tuning knobs for [`SnapQuery`].
///
/// Defaults mirror the interactive draw mode: 22 px snap radius, 14 px axis
/// gate, 25 cm grid, 8% guard at partition ends.
#[derive(Debug, Clone, Copy)]
pub struct SnapOptions {
    /// Grid pitch in world units; `<= 0` disables the grid candidate.
    pub grid: f64,
    /// Snap acceptance radius, in pixels.
    pub snap_px: f64,
    /// Axis-alignment gate, in pixels.
    pub axis_px: f64,
    pub to_grid: bool,
    pub to_endpoints: bool,
    pub to_axis: bool,
    pub to_partitions: bool,
    pub to_capitals: bool,
    /// Fraction of a host wall near each end where T-snapping gives way to
    /// endpoint snapping.
    pub t_guard: f64,
    /// Quantize T-junction hits to whole grid steps measured along the host.
    pub quantize_t: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            grid: GRID_STEP_SNAP,
            snap_px: 22.0,
            axis_px: 14.0,
            to_grid: true,
            to_endpoints: true,
            to_axis: true,
            to_partitions: true,
            to_capitals: true,
            t_guard: 0.08,
            quantize_t: false,
        }
    }
}

/// Outcome of a snap resolution.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The resolved construction point.
    pub point: Point2,
    /// The winning candidate kind, or `None` when the raw point was
    /// returned unsnapped.
    pub kind: Option<SnapKind>,
}

/// Resolves an ambiguous pointer position into one exact construction point.
///
/// Candidates are gathered from the grid, existing wall endpoints (plus
/// grid-pitch stations along partition axes), axis alignment with an optional
/// reference point, T-junction projections onto partition interiors, and
/// capital axes. A candidate is accepted when its distance to the raw point
/// is within the pixel-derived snap radius; the highest-priority accepted
/// kind wins, ties broken by distance.
#[derive(Debug)]
pub struct SnapQuery {
    raw: Point2,
    reference: Option<Point2>,
    ignore_wall: Option<WallId>,
    options: SnapOptions,
}

impl SnapQuery {
    /// Creates a snap query for a raw pointer position in world units.
    #[must_use]
    pub fn new(raw: Point2) -> Self {
        Self {
            raw,
            reference: None,
            ignore_wall: None,
            options: SnapOptions::default(),
        }
    }

    /// Sets the reference point for axis alignment (typically the segment's
    /// first endpoint while drawing).
    #[must_use]
    pub fn reference(mut self, reference: Point2) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Excludes a wall from T-junction projections (the wall currently
    /// being dragged).
    #[must_use]
    pub fn ignore_wall(mut self, wall: WallId) -> Self {
        self.ignore_wall = Some(wall);
        self
    }

    /// Overrides the snap options.
    #[must_use]
    pub fn options(mut self, options: SnapOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the query against the current wall set.
    #[must_use]
    pub fn execute(&self, store: &PlanStore, view: ViewScale) -> SnapResult {
        let opts = &self.options;
        let snap_world = view.world_tol(opts.snap_px);
        let axis_world = view.world_tol(opts.axis_px);

        let mut best: Option<(Point2, SnapKind, f64)> = None;
        let mut consider = |point: Point2, kind: SnapKind| {
            let d = point_to_point_dist(&self.raw, &point);
            if d > snap_world {
                return;
            }
            let better = match best {
                None => true,
                Some((_, bk, bd)) => kind > bk || (kind == bk && d < bd),
            };
            if better {
                best = Some((point, kind, d));
            }
        };

        if opts.to_grid && opts.grid > 0.0 {
            consider(
                Point2::new(
                    (self.raw.x / opts.grid).round() * opts.grid,
                    (self.raw.y / opts.grid).round() * opts.grid,
                ),
                SnapKind::Grid,
            );
        }

        if opts.to_endpoints {
            for point in endpoint_candidates(store, opts.grid) {
                consider(point, SnapKind::Endpoint);
            }
        }

        if opts.to_axis {
            if let Some(reference) = self.reference {
                let snap_free = |v: f64| {
                    if opts.to_grid && opts.grid > 0.0 {
                        (v / opts.grid).round() * opts.grid
                    } else {
                        v
                    }
                };
                if (self.raw.x - reference.x).abs() <= axis_world {
                    consider(Point2::new(reference.x, snap_free(self.raw.y)), SnapKind::Axis);
                }
                if (self.raw.y - reference.y).abs() <= axis_world {
                    consider(Point2::new(snap_free(self.raw.x), reference.y), SnapKind::Axis);
                }
            }
        }

        if opts.to_partitions {
            for point in self.t_junction_candidates(store, snap_world) {
                consider(point, SnapKind::TJunction);
            }
        }

        if opts.to_capitals {
            for (_, wall) in store.capitals() {
                let pr = project_point_to_segment(&self.raw, &wall.a, &wall.b);
                consider(pr.point, SnapKind::CapitalAxis);
            }
        }

        match best {
            Some((point, kind, _)) => SnapResult {
                point,
                kind: Some(kind),
            },
            None => SnapResult {
                point: self.raw,
                kind: None,
            },
        }
    }

    /// Projections onto partition interiors, guarded away from the ends.
    fn t_junction_candidates(&self, store: &PlanStore, tol_world: f64) -> Vec<Point2> {
        let opts = &self.options;
        let mut candidates = Vec::new();

        for (id, wall) in store.partitions() {
            if self.ignore_wall == Some(id) {
                continue;
            }

            let a = wall.construction_a();
            let b = wall.construction_b();
            let len = point_to_point_dist(&a, &b);
            if len < TOLERANCE {
                continue;
            }

            let pr = project_point_to_segment(&self.raw, &a, &b);
            if pr.distance > tol_world {
                continue;
            }
            // Territory near the ends belongs to endpoint snapping.
            if pr.t <= opts.t_guard || pr.t >= 1.0 - opts.t_guard {
                continue;
            }

            if opts.quantize_t && opts.grid > 0.0 {
                let station = ((pr.t * len) / opts.grid).round() * opts.grid;
                let t = (station / len).clamp(opts.t_guard, 1.0 - opts.t_guard);
                candidates.push(Point2::new(
                    a.x + (b.x - a.x) * t,
                    a.y + (b.y - a.y) * t,
                ));
            } else {
                candidates.push(pr.point);
            }
        }

        candidates
    }
}

/// Wall endpoints plus grid-pitch stations along partition construction axes.
fn endpoint_candidates(store: &PlanStore, grid: f64) -> Vec<Point2> {
    let mut points = Vec::new();
    for (_, wall) in store.walls() {
        points.push(wall.a);
        points.push(wall.b);

        if wall.is_capital() || grid <= 0.0 {
            continue;
        }

        let a = wall.construction_a();
        let b = wall.construction_b();
        let len = point_to_point_dist(&a, &b);
        if len < TOLERANCE {
            continue;
        }

        let mut station = grid;
        while station < len - TOLERANCE {
            let t = station / len;
            points.push(Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
            station += grid;
        }
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::WallData;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn view() -> ViewScale {
        ViewScale::new(1.0)
    }

    #[test]
    fn grid_snap_when_alone() {
        let store = PlanStore::new();
        let result = SnapQuery::new(p(30.0, 30.0)).execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::Grid));
        assert!((result.point.x - 25.0).abs() < 1e-12);
        assert!((result.point.y - 25.0).abs() < 1e-12);
    }

    #[test]
    fn endpoint_beats_marginally_closer_grid() {
        // Endpoint at (110, 110), raw at (104, 104): the grid point (100, 100)
        // is closer, but the endpoint tier wins.
        let mut store = PlanStore::new();
        store.add_wall(WallData::partition(p(110.0, 110.0), p(110.0, 400.0)));

        let result = SnapQuery::new(p(104.0, 104.0)).execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::Endpoint));
        assert!((result.point.x - 110.0).abs() < 1e-12);
        assert!((result.point.y - 110.0).abs() < 1e-12);
    }

    #[test]
    fn station_snapping_along_partition() {
        // Stations every 25 along the axis make mid-wall points at round
        // distances first-class endpoint targets.
        let mut store = PlanStore::new();
        store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));

        let result = SnapQuery::new(p(98.0, 6.0)).execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::Endpoint));
        assert!((result.point.x - 100.0).abs() < 1e-12);
        assert!(result.point.y.abs() < 1e-12);
    }

    #[test]
    fn axis_alignment_with_reference() {
        let store = PlanStore::new();
        let options = SnapOptions {
            to_grid: false,
            ..SnapOptions::default()
        };
        let result = SnapQuery::new(p(3.0, 77.0))
            .reference(p(0.0, 10.0))
            .options(options)
            .execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::Axis));
        assert!(result.point.x.abs() < 1e-12);
        assert!((result.point.y - 77.0).abs() < 1e-12);
    }

    #[test]
    fn t_junction_on_partition_interior() {
        let mut store = PlanStore::new();
        store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));

        // Tight radius rejects the nearby stations; the projection onto the
        // host interior is the only surviving candidate.
        let options = SnapOptions {
            snap_px: 8.0,
            to_grid: false,
            ..SnapOptions::default()
        };
        let result = SnapQuery::new(p(112.0, 6.0))
            .options(options)
            .execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::TJunction));
        assert!((result.point.x - 112.0).abs() < 1e-12);
        assert!(result.point.y.abs() < 1e-12);
    }

    #[test]
    fn t_junction_guard_rejects_near_ends() {
        let mut store = PlanStore::new();
        store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));

        let options = SnapOptions {
            snap_px: 8.0,
            to_grid: false,
            to_endpoints: false,
            ..SnapOptions::default()
        };
        // t = 0.05 sits inside the 8% guard band.
        let result = SnapQuery::new(p(10.0, 5.0))
            .options(options)
            .execute(&store, view());
        assert!(result.kind.is_none());
        assert!((result.point.x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn quantized_t_junction_lands_on_station() {
        let mut store = PlanStore::new();
        store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));

        let options = SnapOptions {
            snap_px: 16.0,
            to_grid: false,
            to_endpoints: false,
            quantize_t: true,
            ..SnapOptions::default()
        };
        let result = SnapQuery::new(p(88.0, 4.0))
            .options(options)
            .execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::TJunction));
        assert!((result.point.x - 100.0).abs() < 1e-12);
    }

    #[test]
    fn capital_axis_loses_to_endpoint() {
        let mut store = PlanStore::new();
        store.add_wall(WallData::capital(p(0.0, 0.0), p(1000.0, 0.0)));
        store.add_wall(WallData::partition(p(500.0, 10.0), p(500.0, 400.0)));

        // Raw point near both the capital axis and the partition endpoint.
        let result = SnapQuery::new(p(503.0, 7.0)).execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::Endpoint));
        assert!((result.point.x - 500.0).abs() < 1e-12);
        assert!((result.point.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn capital_axis_catches_lone_pointer() {
        let mut store = PlanStore::new();
        store.add_wall(WallData::capital(p(0.0, 0.0), p(1000.0, 0.0)));

        let options = SnapOptions {
            to_grid: false,
            to_endpoints: false,
            ..SnapOptions::default()
        };
        let result = SnapQuery::new(p(333.0, 9.0))
            .options(options)
            .execute(&store, view());
        assert_eq!(result.kind, Some(SnapKind::CapitalAxis));
        assert!((result.point.x - 333.0).abs() < 1e-12);
        assert!(result.point.y.abs() < 1e-12);
    }

    #[test]
    fn out_of_tolerance_returns_raw() {
        let mut store = PlanStore::new();
        store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));

        let options = SnapOptions {
            to_grid: false,
            ..SnapOptions::default()
        };
        let result = SnapQuery::new(p(113.0, 90.0))
            .options(options)
            .execute(&store, view());
        assert!(result.kind.is_none());
        assert!((result.point.x - 113.0).abs() < 1e-12);
        assert!((result.point.y - 90.0).abs() < 1e-12);
    }

    #[test]
    fn tolerance_scales_with_view() {
        let store = PlanStore::new();
        // At 0.5 px/unit the 22 px radius covers 44 world units.
        let result = SnapQuery::new(p(40.0, 0.0)).execute(&store, ViewScale::new(0.5));
        assert_eq!(result.kind, Some(SnapKind::Grid));
        assert!((result.point.x - 50.0).abs() < 1e-12);
    }
}
