use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a door or window in the plan store.
    pub struct OpeningId;
}

/// The kind of opening hosted on a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    /// Entry door, typically on a capital wall.
    Entry,
    /// Interior door on a partition wall.
    Interior,
    /// Window.
    Window,
}

/// A door or window positioned parametrically along a host wall.
///
/// `t` locates the opening's center on the host wall's construction axis.
/// Geometry queries ignore openings entirely; they ride along with their
/// host wall.
#[derive(Debug, Clone)]
pub struct OpeningData {
    pub wall: WallId,
    pub kind: OpeningKind,
    /// Position of the opening center along the host axis, in `[0, 1]`.
    pub t: f64,
    /// Clear width of the opening, in world units.
    pub width: f64,
    /// Rendered thickness, in world units.
    pub thickness: f64,
    /// Locked openings are ignored by interactive editing.
    pub locked: bool,
}

impl OpeningData {
    /// Creates a new opening; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(wall: WallId, kind: OpeningKind, t: f64, width: f64, thickness: f64) -> Self {
        Self {
            wall,
            kind,
            t: t.clamp(0.0, 1.0),
            width,
            thickness,
            locked: false,
        }
    }

    /// Marks the opening as locked.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}
