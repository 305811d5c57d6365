#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either client or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in canvas-local coordinates, anchored at its top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `pt` lies inside the box. Edges count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left() && pt.x <= self.right() && pt.y >= self.top() && pt.y <= self.bottom()
    }

    /// Whether this box lies entirely within `[0, width] x [0, height]`.
    #[must_use]
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

/// Placement of the canvas element inside the page.
///
/// `left` / `top` are the client coordinates of the canvas's own top-left
/// corner. Drop gestures reported in client coordinates are shifted by this
/// origin before they reach the engine, which only speaks canvas-local space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Convert a client-space point to canvas-local coordinates.
    #[must_use]
    pub fn client_to_local(&self, client: Point) -> Point {
        Point { x: client.x - self.left, y: client.y - self.top }
    }
}
