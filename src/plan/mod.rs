pub mod envelope;
pub mod opening;
pub mod units;
pub mod wall;

pub use envelope::{Envelope, EnvelopeCache};
pub use opening::{OpeningData, OpeningId, OpeningKind};
pub use units::ViewScale;
pub use wall::{WallData, WallId, WallKind};

use slotmap::SlotMap;

use crate::error::{AtriumError, OperationError, TopologyError};
use crate::math::Point2;

/// Central arena that owns all plan entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation. The
/// collection is externally owned: every kernel operation borrows it for the
/// duration of a single call.
#[derive(Debug, Default)]
pub struct PlanStore {
    walls: SlotMap<WallId, WallData>,
    openings: SlotMap<OpeningId, OpeningData>,
}

impl PlanStore {
    /// Creates a new, empty plan store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Wall operations ---

    /// Inserts a wall and returns its ID.
    pub fn add_wall(&mut self, data: WallData) -> WallId {
        self.walls.insert(data)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall(&self, id: WallId) -> Result<&WallData, TopologyError> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut WallData, TopologyError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Moves a wall to a new segment.
    ///
    /// Construction endpoints are reset alongside the visual ones, so the
    /// construction axis always reflects the latest placement; run
    /// [`crate::operations::NormalizeWall`] afterwards to re-derive the
    /// snapped/trimmed pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn set_wall_segment(
        &mut self,
        id: WallId,
        a: Point2,
        b: Point2,
    ) -> Result<(), TopologyError> {
        let wall = self.wall_mut(id)?;
        wall.a = a;
        wall.b = b;
        wall.va = None;
        wall.vb = None;
        Ok(())
    }

    /// Removes a wall along with any openings hosted on it.
    ///
    /// Returns the removed wall data, or `None` if the ID was stale.
    pub fn remove_wall(&mut self, id: WallId) -> Option<WallData> {
        let removed = self.walls.remove(id)?;
        self.openings.retain(|_, opening| opening.wall != id);
        Some(removed)
    }

    /// Iterates over all walls.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Iterates over capital walls only.
    pub fn capitals(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter().filter(|(_, w)| w.is_capital())
    }

    /// Iterates over partition walls only.
    pub fn partitions(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter().filter(|(_, w)| !w.is_capital())
    }

    // --- Opening operations ---

    /// Inserts an opening and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the host wall does not exist or the opening has a
    /// non-positive width.
    pub fn add_opening(&mut self, data: OpeningData) -> Result<OpeningId, AtriumError> {
        self.wall(data.wall)?;
        if data.width <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "opening width must be positive, got {}",
                data.width
            ))
            .into());
        }
        Ok(self.openings.insert(data))
    }

    /// Returns a reference to the opening data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn opening(&self, id: OpeningId) -> Result<&OpeningData, TopologyError> {
        self.openings
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("opening".into()))
    }

    /// Returns a mutable reference to the opening data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn opening_mut(&mut self, id: OpeningId) -> Result<&mut OpeningData, TopologyError> {
        self.openings
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("opening".into()))
    }

    /// Removes an opening, returning its data if it existed.
    pub fn remove_opening(&mut self, id: OpeningId) -> Option<OpeningData> {
        self.openings.remove(id)
    }

    /// Iterates over all openings.
    pub fn openings(&self) -> impl Iterator<Item = (OpeningId, &OpeningData)> {
        self.openings.iter()
    }

    /// Resolves the anchor point of an opening on its host wall's
    /// construction axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening or its host wall is not found.
    pub fn opening_anchor(&self, id: OpeningId) -> Result<Point2, TopologyError> {
        let opening = self.opening(id)?;
        let wall = self.wall(opening.wall)?;
        let a = wall.construction_a();
        let b = wall.construction_b();
        Ok(Point2::new(
            a.x + (b.x - a.x) * opening.t,
            a.y + (b.y - a.y) * opening.t,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn wall_crud_round_trip() {
        let mut store = PlanStore::new();
        let id = store.add_wall(WallData::partition(p(0.0, 0.0), p(100.0, 0.0)));
        assert!(store.wall(id).is_ok());
        assert_eq!(store.partitions().count(), 1);
        assert_eq!(store.capitals().count(), 0);

        store.remove_wall(id);
        assert!(store.wall(id).is_err());
    }

    #[test]
    fn set_wall_segment_resets_construction() {
        let mut store = PlanStore::new();
        let id = store.add_wall(WallData::partition(p(0.0, 0.0), p(100.0, 0.0)));
        {
            let wall = store.wall_mut(id).unwrap();
            wall.va = Some(p(0.0, 0.0));
            wall.vb = Some(p(110.0, 0.0));
        }

        store.set_wall_segment(id, p(0.0, 50.0), p(100.0, 50.0)).unwrap();
        let wall = store.wall(id).unwrap();
        assert!(wall.va.is_none() && wall.vb.is_none());
        assert!((wall.construction_b().y - 50.0).abs() < 1e-12);
    }

    #[test]
    fn removing_wall_drops_hosted_openings() {
        let mut store = PlanStore::new();
        let wall = store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));
        let other = store.add_wall(WallData::partition(p(0.0, 100.0), p(200.0, 100.0)));
        let door = store
            .add_opening(OpeningData::new(wall, OpeningKind::Interior, 0.5, 75.0, 10.0))
            .unwrap();
        let kept = store
            .add_opening(OpeningData::new(other, OpeningKind::Interior, 0.25, 75.0, 10.0))
            .unwrap();

        store.remove_wall(wall);
        assert!(store.opening(door).is_err());
        assert!(store.opening(kept).is_ok());
    }

    #[test]
    fn opening_anchor_uses_construction_axis() {
        let mut store = PlanStore::new();
        let wall = store.add_wall(WallData::partition(p(0.0, 0.0), p(80.0, 0.0)));
        {
            // Visual endpoints trimmed; construction axis is the full span.
            let w = store.wall_mut(wall).unwrap();
            w.va = Some(p(0.0, 0.0));
            w.vb = Some(p(100.0, 0.0));
        }
        let door = store
            .add_opening(OpeningData::new(wall, OpeningKind::Interior, 0.5, 75.0, 10.0))
            .unwrap();
        let anchor = store.opening_anchor(door).unwrap();
        assert!((anchor.x - 50.0).abs() < 1e-12);
        assert!(anchor.y.abs() < 1e-12);
    }

    #[test]
    fn locked_opening_builder() {
        let mut store = PlanStore::new();
        let wall = store.add_wall(WallData::capital(p(0.0, 0.0), p(500.0, 0.0)));
        let entry = store
            .add_opening(OpeningData::new(wall, OpeningKind::Entry, 0.2, 90.0, 28.0).locked())
            .unwrap();
        assert!(store.opening(entry).unwrap().locked);
    }

    #[test]
    fn opening_validation_rejects_bad_input() {
        let mut store = PlanStore::new();
        let wall = store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));
        let stale = wall;
        store.remove_wall(wall);

        assert!(store
            .add_opening(OpeningData::new(stale, OpeningKind::Interior, 0.5, 75.0, 10.0))
            .is_err());

        let host = store.add_wall(WallData::partition(p(0.0, 0.0), p(200.0, 0.0)));
        assert!(store
            .add_opening(OpeningData::new(host, OpeningKind::Interior, 0.5, 0.0, 10.0))
            .is_err());
    }
}
