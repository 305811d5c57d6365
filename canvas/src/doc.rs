//! Document model: placed tiles, their observable snapshot, and the surface
//! that owns them.
//!
//! `Surface` is the single owner of placement state. Tiles are kept in
//! creation order, which doubles as the snap engine's tie-break order and the
//! draw order (later tiles on top). Selection is a flag on each tile; every
//! mutating operation leaves at most one tile selected.
//!
//! Readers outside this module get copies: `footprints` for the snap engine
//! and `snapshot` for renderers and tests.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::catalog::{LaneCount, Orientation, TileGeometry, TileType};
use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::snap::Footprint;
use crate::viewport::{Point, Rect};

/// Unique identifier for a placed tile. Assigned in creation order, never reused.
pub type TileId = u64;

/// A tile on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTile {
    pub id: TileId,
    pub tile_type: TileType,
    pub orientation: Orientation,
    pub lanes: LaneCount,
    /// Left edge of the bounding box in canvas-local coordinates.
    pub x: f64,
    /// Top edge of the bounding box in canvas-local coordinates.
    pub y: f64,
    /// Geometry resolved when the tile was dropped.
    pub geometry: TileGeometry,
    pub selected: bool,
}

impl PlacedTile {
    /// Rendered bounding box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.geometry.width, self.geometry.height)
    }

    #[must_use]
    pub fn footprint(&self) -> Footprint {
        Footprint { id: self.id, rect: self.rect(), open_ports: self.geometry.open_ports }
    }

    /// Observable snapshot of this tile.
    #[must_use]
    pub fn view(&self) -> TileView {
        TileView {
            id: self.id,
            tile_type: self.tile_type,
            orientation: self.orientation,
            lanes: self.lanes,
            x: self.x,
            y: self.y,
            width: self.geometry.width,
            height: self.geometry.height,
            unrotated_width: self.geometry.unrotated_width,
            unrotated_height: self.geometry.unrotated_height,
            selected: self.selected,
        }
    }
}

/// Everything needed to put a new tile on the surface. The id is assigned on insert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewTile {
    pub tile_type: TileType,
    pub orientation: Orientation,
    pub lanes: LaneCount,
    pub position: Point,
    pub geometry: TileGeometry,
}

/// Serializable view of a placed tile, as exposed to renderers and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub tile_type: TileType,
    pub orientation: Orientation,
    pub lanes: LaneCount,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub unrotated_width: f64,
    pub unrotated_height: f64,
    pub selected: bool,
}

/// The canvas surface: ordered placed tiles plus the visible interior size.
#[derive(Debug, Clone)]
pub struct Surface {
    tiles: Vec<PlacedTile>,
    next_id: TileId,
    width: f64,
    height: f64,
}

impl Surface {
    /// Create an empty surface with the given visible interior size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { tiles: Vec::new(), next_id: 1, width, height }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether `rect` lies entirely inside the visible interior.
    #[must_use]
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.fits_within(self.width, self.height)
    }

    /// Append a tile, select it, and clear every other selection.
    pub fn place(&mut self, tile: NewTile) -> TileId {
        let id = self.next_id;
        self.next_id += 1;
        self.deselect_all();
        self.tiles.push(PlacedTile {
            id,
            tile_type: tile.tile_type,
            orientation: tile.orientation,
            lanes: tile.lanes,
            x: tile.position.x,
            y: tile.position.y,
            geometry: tile.geometry,
            selected: true,
        });
        id
    }

    /// Select `id`, clearing any other selection. Returns false (and changes
    /// nothing) if no such tile exists.
    pub fn select(&mut self, id: TileId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        for tile in &mut self.tiles {
            tile.selected = tile.id == id;
        }
        true
    }

    pub fn deselect_all(&mut self) {
        for tile in &mut self.tiles {
            tile.selected = false;
        }
    }

    /// Remove the selected tile, returning it. `None` if nothing is selected.
    pub fn delete_selected(&mut self) -> Option<PlacedTile> {
        let index = self.tiles.iter().position(|t| t.selected)?;
        Some(self.tiles.remove(index))
    }

    /// The currently selected tile, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.tiles.iter().find(|t| t.selected).map(|t| t.id)
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&PlacedTile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// All tiles in creation order.
    #[must_use]
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    /// Snap-engine view of every tile, in creation order.
    #[must_use]
    pub fn footprints(&self) -> Vec<Footprint> {
        self.tiles.iter().map(PlacedTile::footprint).collect()
    }

    /// Observable state of every tile, in creation order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TileView> {
        self.tiles.iter().map(PlacedTile::view).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}
