//! 2D primitives used by the editor core.
//!
//! The graph stores node placement as plain rectangles in canvas
//! coordinates. Rendering transforms (zoom, pan) are the host's concern;
//! everything here is same-space arithmetic.

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle (x, y, width, height).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Default room-node dimensions when a node is placed on the canvas.
pub const NODE_WIDTH: f32 = 160.0;
pub const NODE_HEIGHT: f32 = 75.0;

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the default node size with its top-left at `position`.
    pub fn at_node_size(position: Point) -> Self {
        Self::new(position.x, position.y, NODE_WIDTH, NODE_HEIGHT)
    }

    /// Whether the point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Center point, used as the anchor for connection lines.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the rectangle by a delta, preserving its size.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}
