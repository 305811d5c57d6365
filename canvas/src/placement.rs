//! Naive placement: center a tile's bounding box on the drop point.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::catalog::TileGeometry;
use crate::doc::Surface;
use crate::viewport::{Point, Rect};

/// The centered box would extend past the surface's visible interior.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("tile at ({x}, {y}) sized {width}x{height} falls outside the surface")]
pub struct OutOfBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Top-left position that centers `geometry` on `drop_point`.
#[must_use]
pub fn centered_position(drop_point: Point, geometry: &TileGeometry) -> Point {
    Point {
        x: drop_point.x - geometry.width / 2.0,
        y: drop_point.y - geometry.height / 2.0,
    }
}

/// Resolve the naive top-left for a drop, rejecting boxes that leave the surface.
///
/// # Errors
///
/// Returns [`OutOfBounds`] if any part of the centered box lies outside the
/// surface interior.
pub fn resolve_naive_position(
    drop_point: Point,
    geometry: &TileGeometry,
    surface: &Surface,
) -> Result<Point, OutOfBounds> {
    let position = centered_position(drop_point, geometry);
    let rect = Rect::new(position.x, position.y, geometry.width, geometry.height);
    if !surface.contains_rect(&rect) {
        return Err(OutOfBounds { x: rect.x, y: rect.y, width: rect.width, height: rect.height });
    }
    Ok(position)
}
