//! Length and area queries over the plan.
//!
//! All measurements run on construction geometry — the visual trim at
//! capital joints must not shorten reported dimensions.

use crate::math::distance_2d::point_to_point_dist;
use crate::math::polygon_2d::signed_area_2d;
use crate::plan::units::{units_to_meters, units_to_square_meters};
use crate::plan::{EnvelopeCache, PlanStore, WallData};

/// Construction-axis length of a wall, in world units.
#[must_use]
pub fn wall_length_units(wall: &WallData) -> f64 {
    point_to_point_dist(&wall.construction_a(), &wall.construction_b())
}

/// Construction-axis length of a wall, in meters.
#[must_use]
pub fn wall_length_m(wall: &WallData) -> f64 {
    units_to_meters(wall_length_units(wall))
}

/// Total length of all partition walls, in meters.
#[must_use]
pub fn total_partition_length_m(store: &PlanStore) -> f64 {
    store.partitions().map(|(_, w)| wall_length_m(w)).sum()
}

/// Area enclosed by the capital envelope, in squared world units.
///
/// Returns `0.0` when the capitals do not form one clean loop — the bbox
/// fallback is a containment approximation, not a measurable contour.
#[must_use]
pub fn envelope_area_units2(store: &PlanStore, cache: &mut EnvelopeCache) -> f64 {
    match cache.envelope(store) {
        Some(envelope) if envelope.is_loop() => signed_area_2d(envelope.polygon()).abs(),
        _ => 0.0,
    }
}

/// Area enclosed by the capital envelope, in square meters.
#[must_use]
pub fn envelope_area_m2(store: &PlanStore, cache: &mut EnvelopeCache) -> f64 {
    units_to_square_meters(envelope_area_units2(store, cache))
}
