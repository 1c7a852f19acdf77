use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the plan store.
    pub struct WallId;
}

/// The structural class of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    /// Load-bearing wall; the set of capital walls defines the building envelope.
    Capital,
    /// Interior partition wall; may be added, moved, resized, and deleted.
    Partition,
}

/// Data associated with a wall.
///
/// `a`/`b` are the visual endpoints (what gets rendered; possibly shortened
/// at capital joints). `va`/`vb` are the construction endpoints defining the
/// true architectural axis, used for measurement, snapping targets, and room
/// topology. `None` means the construction endpoint coincides with the
/// visual one. For capital walls the construction axis is the inner room
/// contour, so `va`/`vb` stay `None`.
#[derive(Debug, Clone)]
pub struct WallData {
    pub kind: WallKind,
    pub a: Point2,
    pub b: Point2,
    pub va: Option<Point2>,
    pub vb: Option<Point2>,
}

impl WallData {
    /// Creates a new wall of the given kind.
    #[must_use]
    pub fn new(kind: WallKind, a: Point2, b: Point2) -> Self {
        Self {
            kind,
            a,
            b,
            va: None,
            vb: None,
        }
    }

    /// Creates a capital wall.
    #[must_use]
    pub fn capital(a: Point2, b: Point2) -> Self {
        Self::new(WallKind::Capital, a, b)
    }

    /// Creates a partition wall.
    #[must_use]
    pub fn partition(a: Point2, b: Point2) -> Self {
        Self::new(WallKind::Partition, a, b)
    }

    /// Whether this wall is load-bearing.
    #[must_use]
    pub fn is_capital(&self) -> bool {
        self.kind == WallKind::Capital
    }

    /// Construction endpoint at the `a` end.
    #[must_use]
    pub fn construction_a(&self) -> Point2 {
        self.va.unwrap_or(self.a)
    }

    /// Construction endpoint at the `b` end.
    #[must_use]
    pub fn construction_b(&self) -> Point2 {
        self.vb.unwrap_or(self.b)
    }
}
