//! Snap engine: pull a dropped tile flush against a neighbor's facing port.
//!
//! DESIGN
//! ======
//! Every existing tile is checked against every open port of the new tile.
//! A pair qualifies when the neighbor has the opposite port open and the
//! signed edge gap along the shared axis is within the threshold. Cross-axis
//! offset is never filtered; the snap itself re-centers the tile on the
//! neighbor's centerline.
//!
//! The winner is the smallest absolute gap. Ties go to the earliest-created
//! neighbor, then to port order N, E, S, W, which falls out of scanning in
//! creation order and only replacing on a strictly smaller gap.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::catalog::{Port, PortSet, TileGeometry};
use crate::doc::TileId;
use crate::viewport::{Point, Rect};
use tracing::debug;

/// What the snap engine needs to know about an existing tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub id: TileId,
    pub rect: Rect,
    pub open_ports: PortSet,
}

/// The winning alignment for a drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    /// Neighbor the new tile snaps to.
    pub neighbor: TileId,
    /// Port of the new tile that meets the neighbor.
    pub own_port: Port,
    /// Signed gap at the naive position; positive means apart, negative overlapping.
    pub gap: f64,
    /// Flush, centerline-aligned top-left.
    pub position: Point,
}

/// Find the best snap for a tile at `naive`, if any neighbor is close enough.
#[must_use]
pub fn find_snap(naive: Point, geometry: &TileGeometry, existing: &[Footprint], threshold: f64) -> Option<SnapCandidate> {
    let own = Rect::new(naive.x, naive.y, geometry.width, geometry.height);
    let mut best: Option<SnapCandidate> = None;

    for neighbor in existing {
        for own_port in geometry.open_ports.iter() {
            if !neighbor.open_ports.contains(own_port.opposite()) {
                continue;
            }
            let (gap, position) = align(own_port, &own, &neighbor.rect);
            if gap.is_nan() || gap.abs() > threshold {
                continue;
            }
            let better = best.as_ref().map_or(true, |b| gap.abs() < b.gap.abs());
            if better {
                best = Some(SnapCandidate { neighbor: neighbor.id, own_port, gap, position });
            }
        }
    }

    best
}

/// Where a drop lands after snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    /// Final top-left.
    pub position: Point,
    /// The alignment that moved the tile, if one did.
    pub snap: Option<SnapCandidate>,
}

impl SnapOutcome {
    /// The tile stays where it was dropped.
    #[must_use]
    pub fn unsnapped(naive: Point) -> Self {
        Self { position: naive, snap: None }
    }
}

/// Resolve the final position for a tile dropped at `naive` on a surface of
/// `surface_width` x `surface_height`.
///
/// The best candidate wins only if the snapped tile still lies inside the
/// surface; otherwise the tile keeps `naive`.
#[must_use]
pub fn attempt_snap(
    naive: Point,
    geometry: &TileGeometry,
    existing: &[Footprint],
    threshold: f64,
    surface_width: f64,
    surface_height: f64,
) -> SnapOutcome {
    let Some(candidate) = find_snap(naive, geometry, existing, threshold) else {
        return SnapOutcome::unsnapped(naive);
    };
    let snapped = Rect::new(candidate.position.x, candidate.position.y, geometry.width, geometry.height);
    if !snapped.fits_within(surface_width, surface_height) {
        debug!(neighbor = candidate.neighbor, "snap would leave the surface; keeping naive position");
        return SnapOutcome::unsnapped(naive);
    }
    SnapOutcome { position: candidate.position, snap: Some(candidate) }
}

/// Signed gap between `own`'s `port` edge and `other`'s facing edge, plus the
/// top-left that closes the gap and lines up centerlines.
fn align(port: Port, own: &Rect, other: &Rect) -> (f64, Point) {
    let center = other.center();
    let centered_x = center.x - own.width / 2.0;
    let centered_y = center.y - own.height / 2.0;
    match port {
        Port::N => (own.top() - other.bottom(), Point::new(centered_x, other.bottom())),
        Port::S => (other.top() - own.bottom(), Point::new(centered_x, other.top() - own.height)),
        Port::E => (other.left() - own.right(), Point::new(other.left() - own.width, centered_y)),
        Port::W => (own.left() - other.right(), Point::new(other.right(), centered_y)),
    }
}
