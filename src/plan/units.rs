//! Unit conventions and interactive tolerances.
//!
//! World units are centimeters: `100` world units = 1 meter.

/// World units per meter.
pub const UNITS_PER_M: f64 = 100.0;

/// Snap grid pitch in world units (25 cm).
pub const GRID_STEP_SNAP: f64 = 25.0;

/// Rendered thickness of a capital wall, in world units.
pub const CAPITAL_THICKNESS: f64 = 28.0;

/// Rendered thickness of a partition wall, in world units.
pub const PARTITION_THICKNESS: f64 = 10.0;

/// Allowed visual overlap at a partition-to-capital joint, in world units.
pub const JOINT_OVERLAP: f64 = 5.0;

/// Minimum distance a partition's interior must keep from a capital axis so
/// the rendered thicknesses don't collide.
pub const CAPITAL_CLEARANCE: f64 =
    CAPITAL_THICKNESS / 2.0 + PARTITION_THICKNESS / 2.0 - JOINT_OVERLAP;

/// Converts world units to meters.
#[must_use]
pub fn units_to_meters(units: f64) -> f64 {
    units / UNITS_PER_M
}

/// Converts meters to world units.
#[must_use]
pub fn meters_to_units(meters: f64) -> f64 {
    meters * UNITS_PER_M
}

/// Converts squared world units to square meters.
#[must_use]
pub fn units_to_square_meters(units_sq: f64) -> f64 {
    units_sq / (UNITS_PER_M * UNITS_PER_M)
}

/// View scale supplied by the rendering layer: pixels per world unit.
///
/// The kernel works purely in world units; every UI tolerance arrives as a
/// pixel radius and is divided by the scale here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewScale(f64);

impl ViewScale {
    /// Creates a view scale, clamped away from zero.
    #[must_use]
    pub fn new(pixels_per_unit: f64) -> Self {
        Self(pixels_per_unit.max(1e-6))
    }

    /// Converts a pixel tolerance into a world-space tolerance.
    #[must_use]
    pub fn world_tol(self, pixels: f64) -> f64 {
        pixels / self.0
    }

    /// Raw pixels-per-world-unit factor.
    #[must_use]
    pub fn pixels_per_unit(self) -> f64 {
        self.0
    }
}

impl Default for ViewScale {
    fn default() -> Self {
        Self(1.0)
    }
}
