//! Rectangle hit tests and the transforms between node-local and canvas space.
//!
//! A node's children (its plugs) keep their rectangles relative to the node's
//! top-left corner. Everything the pointer reports is in canvas space.

use iced::{Point, Rectangle, Size, Vector};

pub const NODE_WIDTH: f32 = 100.0;
pub const NODE_HEADER: f32 = 20.0;
pub const PLUG_SIZE: f32 = 10.0;
pub const PLUG_SPACING: f32 = 15.0;

/// Local x of output plugs, flush with the node's right edge.
pub const OUTPUT_PLUG_X: f32 = NODE_WIDTH - PLUG_SIZE;

/// Half-open containment: the left and top edges are inside, the right and
/// bottom edges are not.
pub fn contains(rect: Rectangle, point: Point) -> bool {
    rect.x <= point.x
        && point.x < rect.x + rect.width
        && rect.y <= point.y
        && point.y < rect.y + rect.height
}

/// Canvas point expressed relative to `origin`.
pub fn to_local(origin: Point, point: Point) -> Point {
    Point::new(point.x - origin.x, point.y - origin.y)
}

/// Local point relative to `origin` expressed in canvas space.
pub fn to_canvas(origin: Point, point: Point) -> Point {
    point + Vector::new(origin.x, origin.y)
}

pub fn offset(rect: Rectangle, origin: Point) -> Rectangle {
    Rectangle::new(to_canvas(origin, rect.position()), rect.size())
}

pub fn center(rect: Rectangle) -> Point {
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

/// Height of a node holding `plugs` plugs.
pub fn node_height(plugs: usize) -> f32 {
    PLUG_SPACING * plugs as f32 + NODE_HEADER
}

/// Local rectangle of the plug occupying `slot` (inputs and outputs share slots).
pub fn plug_rect(x: f32, slot: usize) -> Rectangle {
    Rectangle::new(
        Point::new(x, PLUG_SPACING * slot as f32 + NODE_HEADER),
        Size::new(PLUG_SIZE, PLUG_SIZE),
    )
}
