#![allow(clippy::float_cmp)]

use super::*;
use crate::catalog::{Catalog, Port, PortSet};

fn straight(x: f64, y: f64) -> NewTile {
    let geometry = Catalog::default()
        .resolve_geometry(TileType::Straight, Orientation::Horizontal, LaneCount(2))
        .unwrap();
    NewTile {
        tile_type: TileType::Straight,
        orientation: Orientation::Horizontal,
        lanes: LaneCount(2),
        position: Point::new(x, y),
        geometry,
    }
}

fn selected_count(surface: &Surface) -> usize {
    surface.tiles().iter().filter(|t| t.selected).count()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_surface_is_empty() {
    let surface = Surface::new(640.0, 480.0);
    assert!(surface.is_empty());
    assert_eq!(surface.len(), 0);
    assert_eq!(surface.width(), 640.0);
    assert_eq!(surface.height(), 480.0);
    assert!(surface.selection().is_none());
}

#[test]
fn default_surface_uses_default_size() {
    let surface = Surface::default();
    assert_eq!(surface.width(), 1200.0);
    assert_eq!(surface.height(), 800.0);
}

#[test]
fn contains_rect_checks_interior() {
    let surface = Surface::new(400.0, 300.0);
    assert!(surface.contains_rect(&Rect::new(0.0, 0.0, 400.0, 300.0)));
    assert!(!surface.contains_rect(&Rect::new(300.0, 0.0, 150.0, 50.0)));
}

// =============================================================
// place
// =============================================================

#[test]
fn place_assigns_monotonic_ids() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    let b = surface.place(straight(200.0, 0.0));
    let c = surface.place(straight(400.0, 0.0));
    assert!(a < b && b < c);
}

#[test]
fn place_selects_new_tile_and_clears_others() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    assert_eq!(surface.selection(), Some(a));
    let b = surface.place(straight(200.0, 0.0));
    assert_eq!(surface.selection(), Some(b));
    assert!(!surface.get(a).unwrap().selected);
    assert_eq!(selected_count(&surface), 1);
}

#[test]
fn place_records_position_and_geometry() {
    let mut surface = Surface::default();
    let id = surface.place(straight(225.0, 275.0));
    let tile = surface.get(id).unwrap();
    assert_eq!(tile.x, 225.0);
    assert_eq!(tile.y, 275.0);
    assert_eq!(tile.rect(), Rect::new(225.0, 275.0, 150.0, 50.0));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    surface.delete_selected();
    let b = surface.place(straight(0.0, 0.0));
    assert_ne!(a, b);
    assert!(b > a);
}

// =============================================================
// select / deselect_all
// =============================================================

#[test]
fn select_switches_selection() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    let b = surface.place(straight(200.0, 0.0));
    assert!(surface.select(a));
    assert_eq!(surface.selection(), Some(a));
    assert!(!surface.get(b).unwrap().selected);
    assert_eq!(selected_count(&surface), 1);
}

#[test]
fn select_missing_id_changes_nothing() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    assert!(!surface.select(999));
    assert_eq!(surface.selection(), Some(a));
}

#[test]
fn deselect_all_clears_selection() {
    let mut surface = Surface::default();
    surface.place(straight(0.0, 0.0));
    surface.deselect_all();
    assert!(surface.selection().is_none());
    assert_eq!(selected_count(&surface), 0);
}

// =============================================================
// delete_selected
// =============================================================

#[test]
fn delete_selected_removes_only_selected() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    let b = surface.place(straight(200.0, 0.0));
    let removed = surface.delete_selected().unwrap();
    assert_eq!(removed.id, b);
    assert_eq!(surface.len(), 1);
    assert!(surface.get(a).is_some());
    assert!(surface.selection().is_none());
}

#[test]
fn delete_selected_without_selection_is_noop() {
    let mut surface = Surface::default();
    surface.place(straight(0.0, 0.0));
    surface.deselect_all();
    assert!(surface.delete_selected().is_none());
    assert_eq!(surface.len(), 1);
}

#[test]
fn delete_selected_on_empty_surface_is_noop() {
    let mut surface = Surface::default();
    assert!(surface.delete_selected().is_none());
}

#[test]
fn delete_preserves_creation_order() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    let b = surface.place(straight(200.0, 0.0));
    let c = surface.place(straight(400.0, 0.0));
    surface.select(b);
    surface.delete_selected();
    let ids: Vec<TileId> = surface.tiles().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a, c]);
}

// =============================================================
// Views
// =============================================================

#[test]
fn footprints_follow_creation_order() {
    let mut surface = Surface::default();
    let a = surface.place(straight(0.0, 0.0));
    let b = surface.place(straight(200.0, 100.0));
    let prints = surface.footprints();
    assert_eq!(prints.len(), 2);
    assert_eq!(prints[0].id, a);
    assert_eq!(prints[1].id, b);
    assert_eq!(prints[1].rect, Rect::new(200.0, 100.0, 150.0, 50.0));
    assert_eq!(prints[1].open_ports, PortSet::of(&[Port::E, Port::W]));
}

#[test]
fn snapshot_exposes_observable_fields() {
    let mut surface = Surface::default();
    let id = surface.place(straight(225.0, 275.0));
    let views = surface.snapshot();
    assert_eq!(
        views,
        vec![TileView {
            id,
            tile_type: TileType::Straight,
            orientation: Orientation::Horizontal,
            lanes: LaneCount(2),
            x: 225.0,
            y: 275.0,
            width: 150.0,
            height: 50.0,
            unrotated_width: 150.0,
            unrotated_height: 50.0,
            selected: true,
        }]
    );
}

#[test]
fn tile_view_serializes_snake_case() {
    let mut surface = Surface::default();
    surface.place(straight(225.0, 275.0));
    let json = serde_json::to_value(&surface.snapshot()[0]).unwrap();
    assert_eq!(json["tile_type"], "straight");
    assert_eq!(json["orientation"], "horizontal");
    assert_eq!(json["lanes"], 2);
    assert_eq!(json["unrotated_width"], 150.0);
    assert_eq!(json["unrotated_height"], 50.0);
    assert_eq!(json["selected"], true);
}

#[test]
fn tile_view_roundtrips_through_json() {
    let mut surface = Surface::default();
    surface.place(straight(10.0, 20.0));
    let view = surface.snapshot().remove(0);
    let text = serde_json::to_string(&view).unwrap();
    let back: TileView = serde_json::from_str(&text).unwrap();
    assert_eq!(back, view);
}
