//! Palette model: per-type pending defaults and the options menu rules.
//!
//! The palette decides what the *next* drop of each tile type looks like.
//! `PaletteDefaults` is an immutable value: every change returns a new one,
//! and the host copies the relevant entry into a [`DropRequest`] when a drag
//! starts. The engine never reads palette state during a drop.
//!
//! `OptionsMenu` models one palette item's gear menu: its visibility, which
//! sub-menu is open, and which items are disabled. The intersection's
//! Orientation item is permanently disabled and never opens its sub-menu.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use crate::catalog::{LaneCount, Orientation, TileType};
use crate::consts::DEFAULT_LANES;
use crate::engine::DropRequest;
use crate::viewport::Point;

const STRAIGHT_ORIENTATIONS: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];
const CURVED_ORIENTATIONS: [Orientation; 4] =
    [Orientation::Deg0, Orientation::Deg90, Orientation::Deg180, Orientation::Deg270];
const INTERSECTION_ORIENTATIONS: [Orientation; 1] = [Orientation::Fixed];

/// Lane counts offered by the Lanes sub-menu, in display order.
pub const LANE_OPTIONS: [LaneCount; 2] = [LaneCount(2), LaneCount(4)];

/// Orientations offered for a tile type, in display order.
#[must_use]
pub fn orientation_options(tile_type: TileType) -> &'static [Orientation] {
    match tile_type {
        TileType::Straight => &STRAIGHT_ORIENTATIONS,
        TileType::Curved => &CURVED_ORIENTATIONS,
        TileType::Intersection => &INTERSECTION_ORIENTATIONS,
    }
}

/// Errors from palette edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// The tile type has a fixed orientation.
    #[error("{0} tiles have a fixed orientation")]
    OrientationLocked(TileType),
    /// The orientation is not one the tile type offers.
    #[error("orientation {orientation} is not available for {tile_type} tiles")]
    UnsupportedOrientation { tile_type: TileType, orientation: Orientation },
    /// The lane count is not one the palette offers.
    #[error("{0} lanes is not an available lane option")]
    UnsupportedLanes(LaneCount),
    /// The open sub-menu has no option at this index.
    #[error("no {item:?} option at index {index}")]
    InvalidOption { item: MenuItem, index: usize },
    /// An option was chosen while no sub-menu was open.
    #[error("no sub-menu is open")]
    NoSubMenuOpen,
}

/// Pending settings for one tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub orientation: Orientation,
    pub lanes: LaneCount,
}

/// Pending settings for every tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteDefaults {
    straight: PaletteEntry,
    curved: PaletteEntry,
    intersection: PaletteEntry,
}

impl Default for PaletteDefaults {
    fn default() -> Self {
        let lanes = LaneCount(DEFAULT_LANES);
        Self {
            straight: PaletteEntry { orientation: Orientation::Horizontal, lanes },
            curved: PaletteEntry { orientation: Orientation::Deg0, lanes },
            intersection: PaletteEntry { orientation: Orientation::Fixed, lanes },
        }
    }
}

impl PaletteDefaults {
    #[must_use]
    pub fn entry(&self, tile_type: TileType) -> PaletteEntry {
        match tile_type {
            TileType::Straight => self.straight,
            TileType::Curved => self.curved,
            TileType::Intersection => self.intersection,
        }
    }

    /// Defaults with `tile_type`'s pending orientation replaced.
    ///
    /// # Errors
    ///
    /// [`PaletteError::OrientationLocked`] for intersections and
    /// [`PaletteError::UnsupportedOrientation`] for values the type does not offer.
    pub fn with_orientation(self, tile_type: TileType, orientation: Orientation) -> Result<Self, PaletteError> {
        if !tile_type.has_orientation() {
            return Err(PaletteError::OrientationLocked(tile_type));
        }
        if !orientation_options(tile_type).contains(&orientation) {
            return Err(PaletteError::UnsupportedOrientation { tile_type, orientation });
        }
        let mut next = self;
        next.entry_mut(tile_type).orientation = orientation;
        Ok(next)
    }

    /// Defaults with `tile_type`'s pending lane count replaced.
    ///
    /// # Errors
    ///
    /// [`PaletteError::UnsupportedLanes`] if `lanes` is not in [`LANE_OPTIONS`].
    pub fn with_lanes(self, tile_type: TileType, lanes: LaneCount) -> Result<Self, PaletteError> {
        if !LANE_OPTIONS.contains(&lanes) {
            return Err(PaletteError::UnsupportedLanes(lanes));
        }
        let mut next = self;
        next.entry_mut(tile_type).lanes = lanes;
        Ok(next)
    }

    /// The drop request a drag of `tile_type` released at `drop_point` carries.
    #[must_use]
    pub fn drop_request(&self, tile_type: TileType, drop_point: Point) -> DropRequest {
        let entry = self.entry(tile_type);
        DropRequest { tile_type, orientation: entry.orientation, lanes: entry.lanes, drop_point }
    }

    fn entry_mut(&mut self, tile_type: TileType) -> &mut PaletteEntry {
        match tile_type {
            TileType::Straight => &mut self.straight,
            TileType::Curved => &mut self.curved,
            TileType::Intersection => &mut self.intersection,
        }
    }
}

/// Entries of a palette item's options menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Orientation,
    Lanes,
}

/// Gear menu state for a single palette item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionsMenu {
    tile_type: TileType,
    visible: bool,
    sub_menu: Option<MenuItem>,
}

impl OptionsMenu {
    /// A closed menu for `tile_type`'s palette item.
    #[must_use]
    pub fn new(tile_type: TileType) -> Self {
        Self { tile_type, visible: false, sub_menu: None }
    }

    #[must_use]
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The sub-menu currently shown, if any.
    #[must_use]
    pub fn open_sub_menu(&self) -> Option<MenuItem> {
        self.sub_menu
    }

    /// Show or hide the menu (gear icon click). Hiding also closes any sub-menu.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if !self.visible {
            self.sub_menu = None;
        }
    }

    /// Whether `item` is interactive for this palette item.
    #[must_use]
    pub fn item_enabled(&self, item: MenuItem) -> bool {
        match item {
            MenuItem::Orientation => self.tile_type.has_orientation(),
            MenuItem::Lanes => true,
        }
    }

    /// Click on a menu item. Opens its sub-menu and returns true, or does
    /// nothing and returns false when the menu is hidden or the item disabled.
    pub fn activate(&mut self, item: MenuItem) -> bool {
        if !self.visible || !self.item_enabled(item) {
            return false;
        }
        self.sub_menu = Some(item);
        true
    }

    /// Number of options listed by `item`'s sub-menu.
    #[must_use]
    pub fn option_count(&self, item: MenuItem) -> usize {
        match item {
            MenuItem::Orientation => orientation_options(self.tile_type).len(),
            MenuItem::Lanes => LANE_OPTIONS.len(),
        }
    }

    /// Pick the option at `index` in the open sub-menu, returning updated
    /// defaults. The sub-menu closes on success; the menu stays visible.
    ///
    /// # Errors
    ///
    /// [`PaletteError::NoSubMenuOpen`] without an open sub-menu and
    /// [`PaletteError::InvalidOption`] for an out-of-range index.
    pub fn choose(&mut self, index: usize, defaults: PaletteDefaults) -> Result<PaletteDefaults, PaletteError> {
        let item = self.sub_menu.ok_or(PaletteError::NoSubMenuOpen)?;
        let next = match item {
            MenuItem::Orientation => {
                let orientation = orientation_options(self.tile_type)
                    .get(index)
                    .copied()
                    .ok_or(PaletteError::InvalidOption { item, index })?;
                defaults.with_orientation(self.tile_type, orientation)?
            }
            MenuItem::Lanes => {
                let lanes = LANE_OPTIONS
                    .get(index)
                    .copied()
                    .ok_or(PaletteError::InvalidOption { item, index })?;
                defaults.with_lanes(self.tile_type, lanes)?
            }
        };
        self.sub_menu = None;
        Ok(next)
    }
}
