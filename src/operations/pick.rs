use crate::math::distance_2d::{point_to_point_dist, point_to_segment_dist};
use crate::math::Point2;
use crate::plan::{PlanStore, ViewScale, WallId};

/// Which endpoint of a wall a pick landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHandle {
    A,
    B,
}

/// Finds the partition wall endpoint nearest to a world-space point.
///
/// Capital walls expose no handles — they are not interactively editable.
#[derive(Debug)]
pub struct PickWallHandle {
    point: Point2,
    tol_px: f64,
}

impl PickWallHandle {
    /// Creates a handle pick at the given world point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            tol_px: 14.0,
        }
    }

    /// Overrides the pick radius (default 14 px).
    #[must_use]
    pub fn tolerance_px(mut self, tol_px: f64) -> Self {
        self.tol_px = tol_px;
        self
    }

    /// Returns the nearest endpoint within tolerance, if any.
    #[must_use]
    pub fn execute(&self, store: &PlanStore, view: ViewScale) -> Option<(WallId, WallHandle)> {
        let tol_world = view.world_tol(self.tol_px);
        let mut best: Option<(WallId, WallHandle, f64)> = None;

        for (id, wall) in store.partitions() {
            for (handle, endpoint) in [(WallHandle::A, wall.a), (WallHandle::B, wall.b)] {
                let d = point_to_point_dist(&self.point, &endpoint);
                if d <= tol_world && best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((id, handle, d));
                }
            }
        }

        best.map(|(id, handle, _)| (id, handle))
    }
}

/// Finds the partition wall nearest to a world-space point by segment
/// distance.
#[derive(Debug)]
pub struct PickWall {
    point: Point2,
    tol_px: f64,
}

impl PickWall {
    /// Creates a wall pick at the given world point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            tol_px: 16.0,
        }
    }

    /// Overrides the pick radius (default 16 px).
    #[must_use]
    pub fn tolerance_px(mut self, tol_px: f64) -> Self {
        self.tol_px = tol_px;
        self
    }

    /// Returns the nearest partition wall within tolerance, if any.
    #[must_use]
    pub fn execute(&self, store: &PlanStore, view: ViewScale) -> Option<WallId> {
        let tol_world = view.world_tol(self.tol_px);
        let mut best: Option<(WallId, f64)> = None;

        for (id, wall) in store.partitions() {
            let d = point_to_segment_dist(&self.point, &wall.a, &wall.b);
            if d <= tol_world && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }

        best.map(|(id, _)| id)
    }
}
