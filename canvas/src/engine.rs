use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use crate::catalog::{Catalog, CurvePorts, LaneCount, Orientation, TileGeometry, TileType, UnsupportedConfiguration};
use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, SNAP_THRESHOLD};
use crate::doc::{NewTile, PlacedTile, Surface, TileId, TileView};
use crate::hit::hit_test;
use crate::placement::{OutOfBounds, resolve_naive_position};
use crate::snap::{SnapCandidate, SnapOutcome, attempt_snap};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// A single drop gesture, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropRequest {
    pub tile_type: TileType,
    pub orientation: Orientation,
    pub lanes: LaneCount,
    pub drop_point: Point,
}

/// Why a drop produced no tile. The surface is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DropRejected {
    #[error(transparent)]
    UnsupportedConfiguration(#[from] UnsupportedConfiguration),
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
}

/// Engine settings fixed at construction time, apart from the snap toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub surface_width: f64,
    pub surface_height: f64,
    pub snap_threshold: f64,
    /// Initial state of the snap toggle.
    pub snap_enabled: bool,
    pub curve_ports: CurvePorts,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            snap_threshold: SNAP_THRESHOLD,
            snap_enabled: true,
            curve_ports: CurvePorts::default(),
        }
    }
}

/// Where a drop would land, computed without touching the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub tile_type: TileType,
    /// Orientation recorded on the tile (fixed for intersections).
    pub orientation: Orientation,
    pub lanes: LaneCount,
    pub geometry: TileGeometry,
    /// Drop-point-centered top-left.
    pub naive: Point,
    /// Final top-left.
    pub position: Point,
    /// The alignment that moved the tile, if one did.
    pub snap: Option<SnapCandidate>,
}

/// Core engine state: the surface plus the settings that drive placement.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub surface: Surface,
    pub catalog: Catalog,
    pub snap_threshold: f64,
    snap_enabled: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            surface: Surface::new(config.surface_width, config.surface_height),
            catalog: Catalog::new(config.curve_ports),
            snap_threshold: config.snap_threshold,
            snap_enabled: config.snap_enabled,
        }
    }

    // --- Placement ---

    /// Work out where `request` would land without changing anything.
    ///
    /// # Errors
    ///
    /// [`DropRejected::UnsupportedConfiguration`] for an unknown tile
    /// configuration, [`DropRejected::OutOfBounds`] if the centered tile
    /// leaves the surface.
    pub fn plan_drop(&self, request: &DropRequest) -> Result<Placement, DropRejected> {
        let geometry = self
            .catalog
            .resolve_geometry(request.tile_type, request.orientation, request.lanes)?;
        let naive = resolve_naive_position(request.drop_point, &geometry, &self.surface)?;

        let outcome = if self.snap_enabled {
            attempt_snap(
                naive,
                &geometry,
                &self.surface.footprints(),
                self.snap_threshold,
                self.surface.width(),
                self.surface.height(),
            )
        } else {
            SnapOutcome::unsnapped(naive)
        };

        Ok(Placement {
            tile_type: request.tile_type,
            orientation: request.tile_type.canonical_orientation(request.orientation),
            lanes: request.lanes,
            geometry,
            naive,
            position: outcome.position,
            snap: outcome.snap,
        })
    }

    /// Place a tile for `request` and select it.
    ///
    /// Either exactly one tile is added and becomes the only selection, or
    /// the surface is left untouched and the reason is returned.
    ///
    /// # Errors
    ///
    /// See [`EngineCore::plan_drop`].
    pub fn drop_tile(&mut self, request: &DropRequest) -> Result<TileId, DropRejected> {
        let placement = match self.plan_drop(request) {
            Ok(placement) => placement,
            Err(e) => {
                debug!(error = %e, tile_type = %request.tile_type, "drop rejected");
                return Err(e);
            }
        };

        if let Some(candidate) = placement.snap {
            debug!(
                neighbor = candidate.neighbor,
                port = ?candidate.own_port,
                gap = candidate.gap,
                "snapped to neighbor"
            );
        }

        let id = self.surface.place(NewTile {
            tile_type: placement.tile_type,
            orientation: placement.orientation,
            lanes: placement.lanes,
            position: placement.position,
            geometry: placement.geometry,
        });
        info!(
            id,
            tile_type = %placement.tile_type,
            orientation = %placement.orientation,
            lanes = %placement.lanes,
            x = placement.position.x,
            y = placement.position.y,
            "tile placed"
        );
        Ok(id)
    }

    // --- Selection ---

    /// Select a tile. Unknown ids are ignored and return false.
    pub fn select(&mut self, id: TileId) -> bool {
        self.surface.select(id)
    }

    pub fn deselect(&mut self) {
        self.surface.deselect_all();
    }

    /// Delete the selected tile, returning its id. `None` when nothing is selected.
    pub fn delete_selected(&mut self) -> Option<TileId> {
        let removed = self.surface.delete_selected()?;
        info!(id = removed.id, tile_type = %removed.tile_type, "tile deleted");
        Some(removed.id)
    }

    /// Select the topmost tile under `pt`, or clear the selection when the
    /// click lands on bare canvas. Returns the selected tile, if any.
    pub fn click(&mut self, pt: Point) -> Option<TileId> {
        match hit_test(pt, &self.surface) {
            Some(id) => {
                self.surface.select(id);
                Some(id)
            }
            None => {
                self.surface.deselect_all();
                None
            }
        }
    }

    // --- Snap toggle ---

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    // --- Queries ---

    /// The currently selected tile, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.surface.selection()
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&PlacedTile> {
        self.surface.get(id)
    }

    /// Observable state of every tile, in creation order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TileView> {
        self.surface.snapshot()
    }
}

/// Browser-facing engine. Wraps `EngineCore` and the canvas's page offset.
///
/// Payloads cross the boundary as JSON strings: drop requests in, tile
/// snapshots out.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
    viewport: Viewport,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine with a surface of the given visible size.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        let config = EngineConfig { surface_width, surface_height, ..EngineConfig::default() };
        Self { core: EngineCore::with_config(config), viewport: Viewport::default() }
    }

    /// Record where the canvas sits in the page, for client-coordinate drops.
    pub fn set_viewport_origin(&mut self, left: f64, top: f64) {
        self.viewport = Viewport::new(left, top);
    }

    /// Drop a tile described by a JSON [`DropRequest`]. Returns the new tile id.
    ///
    /// # Errors
    ///
    /// Malformed JSON or a rejected drop.
    pub fn drop_tile(&mut self, request_json: &str) -> Result<TileId, JsError> {
        let request: DropRequest = serde_json::from_str(request_json)?;
        Ok(self.core.drop_tile(&request)?)
    }

    /// Drop a tile whose position is given in client coordinates. The
    /// payload's `drop_point` is ignored in favor of `client_x`/`client_y`.
    ///
    /// # Errors
    ///
    /// Malformed JSON or a rejected drop.
    pub fn drop_tile_client(&mut self, request_json: &str, client_x: f64, client_y: f64) -> Result<TileId, JsError> {
        let mut request: DropRequest = serde_json::from_str(request_json)?;
        request.drop_point = self.viewport.client_to_local(Point::new(client_x, client_y));
        Ok(self.core.drop_tile(&request)?)
    }

    pub fn select(&mut self, id: TileId) -> bool {
        self.core.select(id)
    }

    pub fn deselect(&mut self) {
        self.core.deselect();
    }

    pub fn delete_selected(&mut self) -> Option<TileId> {
        self.core.delete_selected()
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.core.set_snap_enabled(enabled);
    }

    /// Click at a canvas-local point.
    pub fn click(&mut self, x: f64, y: f64) -> Option<TileId> {
        self.core.click(Point::new(x, y))
    }

    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.core.selection()
    }

    /// JSON array of every tile's observable state.
    ///
    /// # Errors
    ///
    /// Serialization failure.
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.snapshot())?)
    }
}

impl Engine {
    /// Borrow the wrapped core.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }
}
