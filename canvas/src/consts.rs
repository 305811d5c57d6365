//! Shared numeric constants for the road canvas crate.

// ── Tile geometry ───────────────────────────────────────────────

/// Length of a road segment along its travel axis, in logical units.
pub const SEGMENT_LENGTH: f64 = 150.0;

/// Width contributed by a single lane; cross size is `LANE_WIDTH * lanes`.
pub const LANE_WIDTH: f64 = 25.0;

/// Side of the square bounding box of curved tiles.
pub const CURVE_SIZE: f64 = 150.0;

/// Side of the square bounding box of intersection tiles.
pub const INTERSECTION_SIZE: f64 = 150.0;

/// Lane count applied by the palette when nothing else was chosen.
pub const DEFAULT_LANES: u32 = 2;

// ── Snapping ────────────────────────────────────────────────────

/// Maximum absolute edge gap, in logical units, at which a drop snaps.
pub const SNAP_THRESHOLD: f64 = 30.0;

// ── Surface ─────────────────────────────────────────────────────

/// Default visible interior width of the canvas surface.
pub const DEFAULT_SURFACE_WIDTH: f64 = 1200.0;

/// Default visible interior height of the canvas surface.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 800.0;
