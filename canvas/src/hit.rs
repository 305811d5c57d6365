#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Surface, TileId};
use crate::viewport::Point;

/// Which tile (if any) is under `pt`.
///
/// Later tiles draw on top of earlier ones, so the most recently placed tile
/// containing the point wins. Bounding-box edges count as hits.
#[must_use]
pub fn hit_test(pt: Point, surface: &Surface) -> Option<TileId> {
    surface
        .tiles()
        .iter()
        .rev()
        .find(|tile| tile.rect().contains(pt))
        .map(|tile| tile.id)
}
