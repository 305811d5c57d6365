#![allow(clippy::float_cmp)]

use std::io::Cursor;

use super::*;

fn session() -> Session {
    Session::new(EngineCore::new())
}

fn script(text: &str) -> Vec<Command> {
    parse_script(Cursor::new(text)).unwrap()
}

fn positions(session: &Session) -> Vec<(f64, f64)> {
    session.engine.snapshot().iter().map(|v| (v.x, v.y)).collect()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_every_op() {
    let commands = script(
        r#"{"op":"drop","tile_type":"straight","orientation":"vertical","lanes":4,"x":10,"y":20.5}
{"op":"select","id":3}
{"op":"deselect"}
{"op":"delete_selected"}
{"op":"set_snap","enabled":false}
{"op":"click","x":1,"y":2}
{"op":"palette","tile_type":"curved","orientation":"180"}"#,
    );
    assert_eq!(
        commands,
        vec![
            Command::Drop {
                tile_type: TileType::Straight,
                orientation: Some(Orientation::Vertical),
                lanes: Some(LaneCount(4)),
                x: 10.0,
                y: 20.5,
            },
            Command::Select { id: 3 },
            Command::Deselect,
            Command::DeleteSelected,
            Command::SetSnap { enabled: false },
            Command::Click { x: 1.0, y: 2.0 },
            Command::Palette { tile_type: TileType::Curved, orientation: Some(Orientation::Deg180), lanes: None },
        ]
    );
}

#[test]
fn drop_fields_are_optional() {
    let command = parse_line(r#"{"op":"drop","tile_type":"crossroads","x":0,"y":0}"#).unwrap();
    assert_eq!(
        command,
        Some(Command::Drop { tile_type: TileType::Intersection, orientation: None, lanes: None, x: 0.0, y: 0.0 })
    );
}

#[test]
fn blank_and_comment_lines_skipped() {
    assert_eq!(parse_line("").unwrap(), None);
    assert_eq!(parse_line("   ").unwrap(), None);
    assert_eq!(parse_line("# a comment").unwrap(), None);
    let commands = script("\n# setup\n{\"op\":\"deselect\"}\n\n");
    assert_eq!(commands, vec![Command::Deselect]);
}

#[test]
fn malformed_line_reports_line_number() {
    let err = parse_script(Cursor::new("# header\n{\"op\":\"deselect\"}\n{\"op\":\"fly\"}\n")).unwrap_err();
    match err {
        ScriptError::Parse { line, .. } => assert_eq!(line, 3),
        ScriptError::Io(e) => panic!("unexpected io error: {e}"),
    }
}

#[test]
fn unknown_tile_type_is_a_parse_error() {
    assert!(parse_line(r#"{"op":"drop","tile_type":"roundabout","x":0,"y":0}"#).is_err());
}

#[test]
fn parse_error_message_names_the_line() {
    let err = parse_script(Cursor::new("not json")).unwrap_err();
    assert!(err.to_string().starts_with("line 1: "));
}

// =============================================================
// Replay
// =============================================================

#[test]
fn replays_snap_scenario() {
    let mut session = session();
    let summary = session.replay(&script(
        r#"{"op":"drop","tile_type":"straight","orientation":"horizontal","lanes":2,"x":300,"y":300}
{"op":"drop","tile_type":"straight","orientation":"horizontal","lanes":2,"x":452,"y":300}"#,
    ));
    assert_eq!(summary, ReplaySummary { placed: 2, rejected: 0, deleted: 0 });
    assert_eq!(positions(&session), vec![(225.0, 275.0), (375.0, 275.0)]);
    assert_eq!(session.engine.selection(), Some(2));
}

#[test]
fn set_snap_false_keeps_naive_position() {
    let mut session = session();
    session.replay(&script(
        r#"{"op":"set_snap","enabled":false}
{"op":"drop","tile_type":"straight","x":300,"y":300}
{"op":"drop","tile_type":"straight","x":452,"y":300}"#,
    ));
    assert_eq!(positions(&session), vec![(225.0, 275.0), (377.0, 275.0)]);
}

#[test]
fn rejected_drop_is_counted_and_replay_continues() {
    let mut session = session();
    let summary = session.replay(&script(
        r#"{"op":"drop","tile_type":"straight","x":10,"y":300}
{"op":"drop","tile_type":"straight","x":300,"y":300}"#,
    ));
    assert_eq!(summary.placed, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(session.engine.snapshot().len(), 1);
}

#[test]
fn odd_lane_drop_is_rejected() {
    let mut session = session();
    let summary = session.replay(&script(r#"{"op":"drop","tile_type":"straight","lanes":3,"x":300,"y":300}"#));
    assert_eq!(summary.rejected, 1);
    assert!(session.engine.snapshot().is_empty());
}

#[test]
fn drop_falls_back_to_palette_defaults() {
    let mut session = session();
    session.replay(&script(
        r#"{"op":"palette","tile_type":"straight","orientation":"vertical","lanes":4}
{"op":"drop","tile_type":"straight","x":300,"y":300}"#,
    ));
    let view = &session.engine.snapshot()[0];
    assert_eq!(view.orientation, Orientation::Vertical);
    assert_eq!(view.lanes, LaneCount(4));
}

#[test]
fn explicit_drop_fields_override_palette() {
    let mut session = session();
    session.replay(&script(
        r#"{"op":"palette","tile_type":"curved","orientation":"90"}
{"op":"drop","tile_type":"curved","orientation":"270","x":300,"y":300}"#,
    ));
    assert_eq!(session.engine.snapshot()[0].orientation, Orientation::Deg270);
    assert_eq!(session.palette.entry(TileType::Curved).orientation, Orientation::Deg90);
}

#[test]
fn rejected_palette_edit_leaves_defaults() {
    let mut session = session();
    session.replay(&script(
        r#"{"op":"palette","tile_type":"intersection","orientation":"fixed"}
{"op":"palette","tile_type":"straight","orientation":"vertical","lanes":6}"#,
    ));
    assert_eq!(session.palette, PaletteDefaults::default());
}

#[test]
fn select_click_and_delete() {
    let mut session = session();
    let summary = session.replay(&script(
        r#"{"op":"drop","tile_type":"straight","x":300,"y":300}
{"op":"drop","tile_type":"straight","x":300,"y":600}
{"op":"select","id":1}
{"op":"delete_selected"}
{"op":"delete_selected"}
{"op":"click","x":300,"y":600}"#,
    ));
    assert_eq!(summary.deleted, 1);
    assert_eq!(session.engine.snapshot().len(), 1);
    assert_eq!(session.engine.selection(), Some(2));
}

#[test]
fn unknown_select_is_ignored_and_background_click_deselects() {
    let mut session = session();
    session.replay(&script(
        r#"{"op":"drop","tile_type":"straight","x":300,"y":300}
{"op":"select","id":99}"#,
    ));
    assert_eq!(session.engine.selection(), Some(1));
    session.apply(&Command::Click { x: 1000.0, y: 700.0 });
    assert_eq!(session.engine.selection(), None);
}
