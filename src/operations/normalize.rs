use crate::error::Result;
use crate::math::distance_2d::{project_point_to_segment, SegmentProjection};
use crate::math::Point2;
use crate::plan::units::CAPITAL_CLEARANCE;
use crate::plan::{PlanStore, ViewScale, WallId};

/// Reconciles a partition wall's construction geometry with its rendered
/// geometry at capital joints.
///
/// Each construction endpoint within the snap radius of a capital axis is
/// moved exactly onto that axis (so architectural lengths come out round),
/// and the corresponding visual endpoint is pulled back along the wall's own
/// direction by half the capital thickness plus half the partition thickness
/// minus the joint overlap, leaving a short gap that renders as a clean
/// perpendicular joint instead of a thickness collision.
///
/// The operation is idempotent: re-running it on its own output reproduces
/// the same construction and visual endpoints. It decides placement of
/// points only — legality stays with [`super::SegmentAllowed`] and
/// [`super::SegmentClearOfCapitals`].
#[derive(Debug)]
pub struct NormalizeWall {
    wall: WallId,
    snap_px: f64,
    trim: bool,
}

impl NormalizeWall {
    /// Creates a normalization pass for the given wall.
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self {
            wall,
            snap_px: 22.0,
            trim: true,
        }
    }

    /// Overrides the capital snap radius (default 22 px).
    #[must_use]
    pub fn snap_px(mut self, snap_px: f64) -> Self {
        self.snap_px = snap_px;
        self
    }

    /// Disables the visual trim; construction and visual endpoints then
    /// coincide.
    #[must_use]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Executes the normalization, writing updated endpoints back to the
    /// store. Capital walls are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found in the store.
    pub fn execute(&self, store: &mut PlanStore, view: ViewScale) -> Result<()> {
        let caps: Vec<(Point2, Point2)> = store.capitals().map(|(_, w)| (w.a, w.b)).collect();

        {
            let wall = store.wall(self.wall)?;
            if wall.is_capital() {
                return Ok(());
            }
        }

        let (mut va, mut vb) = {
            let wall = store.wall(self.wall)?;
            (wall.construction_a(), wall.construction_b())
        };

        if caps.is_empty() {
            // No capitals: just materialize the construction pair.
            let wall = store.wall_mut(self.wall)?;
            wall.va = Some(va);
            wall.vb = Some(vb);
            return Ok(());
        }

        let tol_world = view.world_tol(self.snap_px);

        // Snap construction ends onto the nearest capital axis.
        let hit_a = nearest_on_capitals(&va, &caps);
        let snapped_a = hit_a.distance <= tol_world;
        if snapped_a {
            va = hit_a.point;
        }

        let hit_b = nearest_on_capitals(&vb, &caps);
        let snapped_b = hit_b.distance <= tol_world;
        if snapped_b {
            vb = hit_b.point;
        }

        let (a, b) = if self.trim {
            (
                if snapped_a {
                    trim_point_back(&vb, &va, CAPITAL_CLEARANCE)
                } else {
                    va
                },
                if snapped_b {
                    trim_point_back(&va, &vb, CAPITAL_CLEARANCE)
                } else {
                    vb
                },
            )
        } else {
            (va, vb)
        };

        let wall = store.wall_mut(self.wall)?;
        wall.va = Some(va);
        wall.vb = Some(vb);
        wall.a = a;
        wall.b = b;
        Ok(())
    }
}

fn nearest_on_capitals(p: &Point2, caps: &[(Point2, Point2)]) -> SegmentProjection {
    let mut best = project_point_to_segment(p, &caps[0].0, &caps[0].1);
    for (a, b) in &caps[1..] {
        let pr = project_point_to_segment(p, a, b);
        if pr.distance < best.distance {
            best = pr;
        }
    }
    best
}

/// Moves `to` back towards `from` by `trim_len` along the segment direction.
fn trim_point_back(from: &Point2, to: &Point2, trim_len: f64) -> Point2 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-12 {
        return *to;
    }
    Point2::new(to.x - dx / len * trim_len, to.y - dy / len * trim_len)
}
