//! Component catalog: tile types, orientations, lane counts, and the table
//! that turns them into bounding dimensions and open connection ports.
//!
//! Every placed tile's geometry comes from [`Catalog::resolve_geometry`]. The
//! table is static apart from the curved-tile port mapping, which is supplied
//! as a [`CurvePorts`] value so hosts can swap it without touching the engine.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{CURVE_SIZE, INTERSECTION_SIZE, LANE_WIDTH, SEGMENT_LENGTH};

/// The kind of a road tile.
///
/// Wire names also accept the palette's component identifiers
/// (`straight-road`, `curved-road`, `crossroads`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    /// Straight segment, horizontal or vertical.
    #[serde(alias = "straight-road")]
    Straight,
    /// Quarter-turn curve inside a square box.
    #[serde(alias = "curved-road")]
    Curved,
    /// Four-way crossing; has no orientation.
    #[serde(alias = "crossroads")]
    Intersection,
}

impl TileType {
    pub const ALL: [TileType; 3] = [TileType::Straight, TileType::Curved, TileType::Intersection];

    /// Orientation recorded on a tile of this type when dropped with `requested`.
    ///
    /// Intersections always carry [`Orientation::Fixed`]; other types keep the
    /// requested value untouched.
    #[must_use]
    pub fn canonical_orientation(self, requested: Orientation) -> Orientation {
        match self {
            Self::Intersection => Orientation::Fixed,
            Self::Straight | Self::Curved => requested,
        }
    }

    /// Whether users may change this type's orientation at all.
    #[must_use]
    pub fn has_orientation(self) -> bool {
        !matches!(self, Self::Intersection)
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Straight => "straight",
            Self::Curved => "curved",
            Self::Intersection => "intersection",
        };
        f.write_str(name)
    }
}

/// Orientation of a tile. Which values are legal depends on the [`TileType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "horizontal")]
    Horizontal,
    #[serde(rename = "vertical")]
    Vertical,
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
    /// The single orientation of an intersection.
    #[serde(rename = "fixed")]
    Fixed,
}

impl Orientation {
    /// Clockwise quarter turns for curve angles; `None` for anything else.
    #[must_use]
    pub fn quarter_turns(self) -> Option<usize> {
        match self {
            Self::Deg0 => Some(0),
            Self::Deg90 => Some(1),
            Self::Deg180 => Some(2),
            Self::Deg270 => Some(3),
            Self::Horizontal | Self::Vertical | Self::Fixed => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Deg0 => "0",
            Self::Deg90 => "90",
            Self::Deg180 => "180",
            Self::Deg270 => "270",
            Self::Fixed => "fixed",
        };
        f.write_str(name)
    }
}

/// Number of lanes on a tile. Valid counts are positive and even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneCount(pub u32);

impl LaneCount {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 > 0 && self.0 % 2 == 0
    }

    /// Physical size perpendicular to the travel axis.
    #[must_use]
    pub fn cross_size(self) -> f64 {
        LANE_WIDTH * f64::from(self.0)
    }
}

impl fmt::Display for LaneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A compass-facing edge of a tile's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    N,
    E,
    S,
    W,
}

impl Port {
    /// Search order used wherever ports are enumerated.
    pub const ALL: [Port; 4] = [Port::N, Port::E, Port::S, Port::W];

    /// The port that faces this one across a shared edge.
    #[must_use]
    pub fn opposite(self) -> Port {
        match self {
            Self::N => Self::S,
            Self::E => Self::W,
            Self::S => Self::N,
            Self::W => Self::E,
        }
    }

    /// The next port clockwise.
    #[must_use]
    pub fn rotate_cw(self) -> Port {
        match self {
            Self::N => Self::E,
            Self::E => Self::S,
            Self::S => Self::W,
            Self::W => Self::N,
        }
    }

    /// Whether the port's edge is vertical (so it faces along the x axis).
    #[must_use]
    pub fn is_horizontal_facing(self) -> bool {
        matches!(self, Self::E | Self::W)
    }

    fn bit(self) -> u8 {
        match self {
            Self::N => 0b0001,
            Self::E => 0b0010,
            Self::S => 0b0100,
            Self::W => 0b1000,
        }
    }
}

/// Set of open ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortSet(u8);

impl PortSet {
    pub const NONE: PortSet = PortSet(0);
    pub const ALL: PortSet = PortSet(0b1111);

    #[must_use]
    pub fn of(ports: &[Port]) -> Self {
        ports.iter().fold(Self::NONE, |set, port| set.with(*port))
    }

    #[must_use]
    pub fn with(self, port: Port) -> Self {
        Self(self.0 | port.bit())
    }

    #[must_use]
    pub fn contains(self, port: Port) -> bool {
        self.0 & port.bit() != 0
    }

    /// Open ports in N, E, S, W order.
    pub fn iter(self) -> impl Iterator<Item = Port> {
        Port::ALL.into_iter().filter(move |port| self.contains(*port))
    }
}

/// Resolved tile dimensions and connection faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    /// Rendered width after rotation.
    pub width: f64,
    /// Rendered height after rotation.
    pub height: f64,
    /// Length-axis size before rotation.
    pub unrotated_width: f64,
    /// Cross-axis size before rotation.
    pub unrotated_height: f64,
    pub open_ports: PortSet,
}

/// Angle → open-port table for curved tiles, indexed by clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePorts {
    table: [[Port; 2]; 4],
}

impl CurvePorts {
    /// Build a table from explicit pairs for 0°, 90°, 180° and 270°.
    ///
    /// Returns `None` unless every pair names two adjacent, distinct sides.
    #[must_use]
    pub fn from_table(table: [[Port; 2]; 4]) -> Option<Self> {
        let adjacent = table
            .iter()
            .all(|[a, b]| a.rotate_cw() == *b || b.rotate_cw() == *a);
        adjacent.then_some(Self { table })
    }

    /// Build a table by rotating the 0° pair clockwise for each later angle.
    #[must_use]
    pub fn rotated_from(base: [Port; 2]) -> Option<Self> {
        let mut table = [base; 4];
        for turn in 1..4 {
            let [a, b] = table[turn - 1];
            table[turn] = [a.rotate_cw(), b.rotate_cw()];
        }
        Self::from_table(table)
    }

    /// Open ports for a curve angle, or `None` if `orientation` is not an angle.
    #[must_use]
    pub fn ports(&self, orientation: Orientation) -> Option<PortSet> {
        let turns = orientation.quarter_turns()?;
        let [a, b] = self.table[turns];
        Some(PortSet::NONE.with(a).with(b))
    }
}

impl Default for CurvePorts {
    fn default() -> Self {
        Self {
            table: [[Port::N, Port::E], [Port::E, Port::S], [Port::S, Port::W], [Port::W, Port::N]],
        }
    }
}

/// Error returned by [`Catalog::resolve_geometry`] for an unknown combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported configuration: {tile_type} tile with orientation {orientation} and {lanes} lanes")]
pub struct UnsupportedConfiguration {
    pub tile_type: TileType,
    pub orientation: Orientation,
    pub lanes: LaneCount,
}

/// Lookup table from tile configuration to geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Catalog {
    pub curve_ports: CurvePorts,
}

impl Catalog {
    #[must_use]
    pub fn new(curve_ports: CurvePorts) -> Self {
        Self { curve_ports }
    }

    /// Resolve the bounding box and open ports for a tile configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedConfiguration`] when the orientation is not legal
    /// for the tile type or the lane count is not a positive even number.
    pub fn resolve_geometry(
        &self,
        tile_type: TileType,
        orientation: Orientation,
        lanes: LaneCount,
    ) -> Result<TileGeometry, UnsupportedConfiguration> {
        let unsupported = UnsupportedConfiguration { tile_type, orientation, lanes };
        if !lanes.is_valid() {
            return Err(unsupported);
        }

        match (tile_type, orientation) {
            (TileType::Straight, Orientation::Horizontal) => Ok(TileGeometry {
                width: SEGMENT_LENGTH,
                height: lanes.cross_size(),
                unrotated_width: SEGMENT_LENGTH,
                unrotated_height: lanes.cross_size(),
                open_ports: PortSet::of(&[Port::E, Port::W]),
            }),
            (TileType::Straight, Orientation::Vertical) => Ok(TileGeometry {
                width: lanes.cross_size(),
                height: SEGMENT_LENGTH,
                unrotated_width: SEGMENT_LENGTH,
                unrotated_height: lanes.cross_size(),
                open_ports: PortSet::of(&[Port::N, Port::S]),
            }),
            (TileType::Curved, _) => {
                let open_ports = self.curve_ports.ports(orientation).ok_or(unsupported)?;
                Ok(TileGeometry {
                    width: CURVE_SIZE,
                    height: CURVE_SIZE,
                    unrotated_width: CURVE_SIZE,
                    unrotated_height: CURVE_SIZE,
                    open_ports,
                })
            }
            (TileType::Intersection, _) => Ok(TileGeometry {
                width: INTERSECTION_SIZE,
                height: INTERSECTION_SIZE,
                unrotated_width: INTERSECTION_SIZE,
                unrotated_height: INTERSECTION_SIZE,
                open_ports: PortSet::ALL,
            }),
            (TileType::Straight, _) => Err(unsupported),
        }
    }
}
