//! Newline-delimited JSON command scripts and their replay.
//!
//! One command per line, tagged by `op`:
//!
//! ```text
//! # comments and blank lines are skipped
//! {"op":"drop","tile_type":"straight","orientation":"horizontal","lanes":2,"x":300,"y":300}
//! {"op":"palette","tile_type":"curved","orientation":"90"}
//! {"op":"drop","tile_type":"curved","x":450,"y":300}
//! {"op":"select","id":1}
//! {"op":"delete_selected"}
//! ```
//!
//! A `drop` without `orientation` or `lanes` takes them from the session's
//! palette defaults.

use std::io::BufRead;

use road_canvas::catalog::{LaneCount, Orientation, TileType};
use road_canvas::doc::TileId;
use road_canvas::engine::EngineCore;
use road_canvas::palette::PaletteDefaults;
use road_canvas::viewport::Point;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse { line: usize, source: serde_json::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Drop {
        tile_type: TileType,
        #[serde(default)]
        orientation: Option<Orientation>,
        #[serde(default)]
        lanes: Option<LaneCount>,
        x: f64,
        y: f64,
    },
    Select {
        id: TileId,
    },
    Deselect,
    DeleteSelected,
    SetSnap {
        enabled: bool,
    },
    Click {
        x: f64,
        y: f64,
    },
    Palette {
        tile_type: TileType,
        #[serde(default)]
        orientation: Option<Orientation>,
        #[serde(default)]
        lanes: Option<LaneCount>,
    },
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(raw: &str) -> Result<Option<Command>, serde_json::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Parse a whole script, reporting the 1-based line of the first bad command.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(source) => return Err(ScriptError::Parse { line: index + 1, source }),
        }
    }
    Ok(commands)
}

/// Counts of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub placed: usize,
    pub rejected: usize,
    pub deleted: usize,
}

/// A replay session: the engine plus the palette defaults drops fall back to.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub engine: EngineCore,
    pub palette: PaletteDefaults,
    pub summary: ReplaySummary,
}

impl Session {
    #[must_use]
    pub fn new(engine: EngineCore) -> Self {
        Self { engine, palette: PaletteDefaults::default(), summary: ReplaySummary::default() }
    }

    /// Apply every command in order. Rejected drops and palette edits are
    /// logged and skipped.
    pub fn replay(&mut self, commands: &[Command]) -> ReplaySummary {
        for command in commands {
            self.apply(command);
        }
        self.summary
    }

    pub fn apply(&mut self, command: &Command) {
        match *command {
            Command::Drop { tile_type, orientation, lanes, x, y } => {
                let mut request = self.palette.drop_request(tile_type, Point::new(x, y));
                if let Some(orientation) = orientation {
                    request.orientation = orientation;
                }
                if let Some(lanes) = lanes {
                    request.lanes = lanes;
                }
                match self.engine.drop_tile(&request) {
                    Ok(_) => self.summary.placed += 1,
                    Err(e) => {
                        warn!(error = %e, %tile_type, x, y, "drop rejected");
                        self.summary.rejected += 1;
                    }
                }
            }
            Command::Select { id } => {
                if !self.engine.select(id) {
                    debug!(id, "select ignored; no such tile");
                }
            }
            Command::Deselect => self.engine.deselect(),
            Command::DeleteSelected => {
                if self.engine.delete_selected().is_some() {
                    self.summary.deleted += 1;
                }
            }
            Command::SetSnap { enabled } => self.engine.set_snap_enabled(enabled),
            Command::Click { x, y } => {
                self.engine.click(Point::new(x, y));
            }
            Command::Palette { tile_type, orientation, lanes } => {
                let mut next = Ok(self.palette);
                if let Some(orientation) = orientation {
                    next = next.and_then(|p| p.with_orientation(tile_type, orientation));
                }
                if let Some(lanes) = lanes {
                    next = next.and_then(|p| p.with_lanes(tile_type, lanes));
                }
                match next {
                    Ok(palette) => self.palette = palette,
                    Err(e) => warn!(error = %e, %tile_type, "palette edit rejected"),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
