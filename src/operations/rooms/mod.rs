mod arrangement;
mod label;
mod split;
mod trace;

use std::collections::HashSet;

use crate::math::polygon_2d::{point_in_polygon, rotate_to_canonical_start, signed_area_2d};
use crate::math::Point2;
use crate::plan::units::units_to_square_meters;
use crate::plan::{EnvelopeCache, PlanStore};

use self::arrangement::{build_arrangement, node_key};
use self::label::room_label;
use self::split::{collect_axes, split_segments};
use self::trace::{dedupe_face, trace_face};

/// Node merge tolerance for the room topology, in world units.
///
/// 8% of the 25 cm snap pitch, floored at 1: joints and near-joints within
/// 2 cm fuse into one junction instead of spawning sliver faces.
pub(crate) const NODE_EPS: f64 = 2.0;

/// Faces below this signed-area magnitude (squared world units) are noise.
const MIN_FACE_AREA: f64 = 1.0;

/// A detected room: a simple polygon with its area and label anchor.
///
/// Fully ephemeral — recomputed from the wall set on every query, never
/// persisted or mutated in place.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room boundary, canonically rotated to start at the leftmost vertex.
    pub polygon: Vec<Point2>,
    /// Enclosed area in square meters.
    pub area_m2: f64,
    /// Label anchor, guaranteed inside the polygon.
    pub label: Point2,
}

/// Derives room polygons from the current wall set.
///
/// Builds a planar arrangement of all construction axes, traces its faces,
/// discards the unbounded outer face, and filters the rest by area and by
/// containment in the capital envelope. Best-effort: malformed regions are
/// omitted, never fatal.
#[derive(Debug)]
pub struct ComputeRooms {
    min_area_m2: f64,
    label_precision: f64,
}

impl Default for ComputeRooms {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeRooms {
    /// Creates a room query with the default filters (½ m² minimum, 2 world
    /// units of label precision).
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_area_m2: 0.5,
            label_precision: 2.0,
        }
    }

    /// Overrides the minimum real-world room area.
    #[must_use]
    pub fn min_area_m2(mut self, min_area_m2: f64) -> Self {
        self.min_area_m2 = min_area_m2;
        self
    }

    /// Overrides the label search precision, in world units.
    #[must_use]
    pub fn label_precision(mut self, precision: f64) -> Self {
        self.label_precision = precision;
        self
    }

    /// Executes the room extraction.
    #[must_use]
    pub fn execute(&self, store: &PlanStore, cache: &mut EnvelopeCache) -> Vec<Room> {
        let envelope: Option<Vec<Point2>> = cache.envelope(store).map(|e| e.polygon().to_vec());

        let axes = collect_axes(store);
        let subs = split_segments(&axes);
        let arr = build_arrangement(&subs);

        let mut used = vec![false; arr.edges.len()];
        let mut faces: Vec<(Vec<Point2>, f64)> = Vec::new();
        let mut seen: HashSet<(Vec<(i64, i64)>, bool)> = HashSet::new();
        let mut discarded = 0_usize;

        for start in 0..arr.edges.len() {
            if used[start] {
                continue;
            }
            let Some(raw) = trace_face(&arr, &mut used, start) else {
                discarded += 1;
                continue;
            };
            let poly = dedupe_face(&raw);
            if poly.len() < 3 {
                continue;
            }
            let area = signed_area_2d(&poly);
            if !area.is_finite() || area.abs() < MIN_FACE_AREA {
                continue;
            }

            // Orientation is part of the identity: a lone closed loop is
            // traced once per side, and both twins must survive to the
            // outer-face selection below.
            let mut key: Vec<(i64, i64)> = poly.iter().map(node_key).collect();
            key.sort_unstable();
            if !seen.insert((key, area > 0.0)) {
                continue;
            }

            faces.push((poly, area));
        }

        if faces.is_empty() {
            return Vec::new();
        }

        // The unbounded outer face has the greatest |area|; on a tie (a lone
        // closed loop seen from both sides) the clockwise twin is the outer.
        let mut outer = 0;
        for i in 1..faces.len() {
            let ai = faces[i].1.abs();
            let a0 = faces[outer].1.abs();
            let tie = (ai - a0).abs() <= 1e-9 * a0.max(1.0);
            if (tie && faces[i].1 < 0.0 && faces[outer].1 >= 0.0) || (!tie && ai > a0) {
                outer = i;
            }
        }

        let mut rooms = Vec::new();
        for (i, (poly, area)) in faces.iter().enumerate() {
            if i == outer {
                continue;
            }

            let area_m2 = units_to_square_meters(area.abs());
            if area_m2 < self.min_area_m2 {
                continue;
            }

            let room_anchor = room_label(poly, self.label_precision);
            if let Some(env) = &envelope {
                if env.len() >= 3 && !point_in_polygon(&room_anchor, env) {
                    continue;
                }
            }

            rooms.push(Room {
                polygon: rotate_to_canonical_start(poly),
                area_m2,
                label: room_anchor,
            });
        }

        tracing::debug!(
            axes = axes.len(),
            sub_segments = subs.len(),
            faces = faces.len(),
            discarded,
            rooms = rooms.len(),
            "computed rooms"
        );

        rooms
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::point_in_polygon;
    use crate::plan::WallData;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn capital_box(store: &mut PlanStore, w: f64, h: f64) {
        store.add_wall(WallData::capital(p(0.0, 0.0), p(w, 0.0)));
        store.add_wall(WallData::capital(p(w, 0.0), p(w, h)));
        store.add_wall(WallData::capital(p(w, h), p(0.0, h)));
        store.add_wall(WallData::capital(p(0.0, h), p(0.0, 0.0)));
    }

    #[test]
    fn lone_capital_loop_yields_one_room() {
        let mut store = PlanStore::new();
        capital_box(&mut store, 1000.0, 800.0);
        let mut cache = EnvelopeCache::new();

        let rooms = ComputeRooms::new().execute(&store, &mut cache);
        assert_eq!(rooms.len(), 1);

        let room = &rooms[0];
        assert!((room.area_m2 - 80.0).abs() < 1e-9, "area={}", room.area_m2);
        assert!(point_in_polygon(&room.label, &room.polygon));
        // Strictly inside, not hugging a wall.
        assert!(room.label.x > 1.0 && room.label.x < 999.0);
        assert!(room.label.y > 1.0 && room.label.y < 799.0);
    }

    #[test]
    fn spanning_partition_splits_into_two_rooms() {
        let mut store = PlanStore::new();
        capital_box(&mut store, 1000.0, 800.0);
        store.add_wall(WallData::partition(p(600.0, 0.0), p(600.0, 800.0)));
        let mut cache = EnvelopeCache::new();

        let mut rooms = ComputeRooms::new().execute(&store, &mut cache);
        assert_eq!(rooms.len(), 2);

        rooms.sort_by(|a, b| a.area_m2.total_cmp(&b.area_m2));
        assert!((rooms[0].area_m2 - 32.0).abs() < 1e-9);
        assert!((rooms[1].area_m2 - 48.0).abs() < 1e-9);
        for room in &rooms {
            assert!(point_in_polygon(&room.label, &room.polygon));
        }
    }

    #[test]
    fn touching_stub_does_not_change_room_area() {
        let mut store = PlanStore::new();
        capital_box(&mut store, 1000.0, 800.0);
        // T-junction into the room; does not close anything off.
        store.add_wall(WallData::partition(p(300.0, 0.0), p(300.0, 400.0)));
        let mut cache = EnvelopeCache::new();

        let rooms = ComputeRooms::new().execute(&store, &mut cache);
        assert_eq!(rooms.len(), 1);
        assert!((rooms[0].area_m2 - 80.0).abs() < 1e-9);
    }

    #[test]
    fn isolated_stub_is_ignored() {
        let mut store = PlanStore::new();
        capital_box(&mut store, 1000.0, 800.0);
        // Floating partition, connected to nothing.
        store.add_wall(WallData::partition(p(300.0, 300.0), p(300.0, 500.0)));
        let mut cache = EnvelopeCache::new();

        let rooms = ComputeRooms::new().execute(&store, &mut cache);
        assert_eq!(rooms.len(), 1);
        assert!((rooms[0].area_m2 - 80.0).abs() < 1e-9);
    }

    #[test]
    fn min_area_filter_drops_closets() {
        let mut store = PlanStore::new();
        // 0.25 m² box: below the default half-square-meter floor.
        capital_box(&mut store, 50.0, 50.0);
        let mut cache = EnvelopeCache::new();

        assert!(ComputeRooms::new().execute(&store, &mut cache).is_empty());
        let rooms = ComputeRooms::new()
            .min_area_m2(0.1)
            .execute(&store, &mut cache);
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn empty_plan_yields_no_rooms() {
        let store = PlanStore::new();
        let mut cache = EnvelopeCache::new();
        assert!(ComputeRooms::new().execute(&store, &mut cache).is_empty());
    }

    #[test]
    fn trimmed_partition_still_closes_rooms() {
        // Construction endpoints reach the capital axes even though the
        // visual pair is trimmed back; topology must see no gap.
        let mut store = PlanStore::new();
        capital_box(&mut store, 1000.0, 800.0);
        let mut wall = WallData::partition(p(600.0, 14.0), p(600.0, 786.0));
        wall.va = Some(p(600.0, 0.0));
        wall.vb = Some(p(600.0, 800.0));
        store.add_wall(wall);
        let mut cache = EnvelopeCache::new();

        let rooms = ComputeRooms::new().execute(&store, &mut cache);
        assert_eq!(rooms.len(), 2);
    }
}
