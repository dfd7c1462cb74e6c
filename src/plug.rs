use iced::{Point, Rectangle};

use crate::geometry::{self, OUTPUT_PLUG_X};
use crate::node::NodeId;

/// Handle to an input plug: its node and its position among that node's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId {
    pub node: NodeId,
    pub index: usize,
}

/// Handle to an output plug: its node and its position among that node's outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputId {
    pub node: NodeId,
    pub index: usize,
}

/// Behaviour shared by both plug kinds.
pub trait Plug {
    /// Rectangle relative to the owning node's top-left corner.
    fn rect(&self) -> Rectangle;
    fn name(&self) -> &str;
    fn node(&self) -> NodeId;

    /// Center of the plug in canvas space, given where the node currently sits.
    fn position(&self, node_origin: Point) -> Point {
        geometry::center(geometry::offset(self.rect(), node_origin))
    }

    /// Whether a canvas-space `point` lands on the plug of a node sitting at
    /// `node_origin`.
    fn hit_test(&self, node_origin: Point, point: Point) -> bool {
        self.contains_local(geometry::to_local(node_origin, point))
    }

    /// Same test with `local` already relative to the owning node.
    fn contains_local(&self, local: Point) -> bool {
        geometry::contains(self.rect(), local)
    }
}

#[derive(Debug, Clone)]
pub struct InputPlug {
    id: InputId,
    rect: Rectangle,
    name: String,
    pressed: bool,
    hovered: bool,
    source: Option<OutputId>,
}

impl InputPlug {
    pub(crate) fn new(id: InputId, slot: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            rect: geometry::plug_rect(0.0, slot),
            name: name.into(),
            pressed: false,
            hovered: false,
            source: None,
        }
    }

    pub fn id(&self) -> InputId {
        self.id
    }

    pub fn source(&self) -> Option<OutputId> {
        self.source
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_source(&mut self, source: Option<OutputId>) {
        self.source = source;
    }

    /// Marks the plug pressed when hit. The caller re-activates the source.
    pub(crate) fn mouse_down(&mut self, local: Point) -> bool {
        if self.contains_local(local) {
            self.pressed = true;
            return true;
        }
        false
    }

    /// Always releases; reports whether the pointer came up over the plug.
    pub(crate) fn mouse_up(&mut self, local: Point) -> bool {
        self.pressed = false;
        self.contains_local(local)
    }

    pub(crate) fn track(&mut self, local: Point) {
        self.hovered = self.contains_local(local);
    }

    pub(crate) fn clear_hover(&mut self) {
        self.hovered = false;
    }

    pub(crate) fn release(&mut self) {
        self.pressed = false;
    }
}

impl Plug for InputPlug {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn node(&self) -> NodeId {
        self.id.node
    }
}

#[derive(Debug, Clone)]
pub struct OutputPlug {
    id: OutputId,
    rect: Rectangle,
    name: String,
    pressed: bool,
    hovered: bool,
    targets: Vec<InputId>,
}

impl OutputPlug {
    pub(crate) fn new(id: OutputId, slot: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            rect: geometry::plug_rect(OUTPUT_PLUG_X, slot),
            name: name.into(),
            pressed: false,
            hovered: false,
            targets: Vec::new(),
        }
    }

    pub fn id(&self) -> OutputId {
        self.id
    }

    /// Connected inputs in the order they were attached.
    pub fn targets(&self) -> &[InputId] {
        &self.targets
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Appends `input` unless it is already a target.
    pub(crate) fn push_target(&mut self, input: InputId) {
        if !self.targets.contains(&input) {
            self.targets.push(input);
        }
    }

    /// Returns whether `input` was present.
    pub(crate) fn drop_target(&mut self, input: InputId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| *t != input);
        self.targets.len() != before
    }

    pub(crate) fn drop_targets_on(&mut self, node: NodeId) {
        self.targets.retain(|t| t.node != node);
    }

    pub(crate) fn mouse_down(&mut self, local: Point) -> bool {
        if self.contains_local(local) {
            self.pressed = true;
            return true;
        }
        false
    }

    pub(crate) fn mouse_up(&mut self, local: Point) -> bool {
        self.pressed = false;
        self.contains_local(local)
    }

    pub(crate) fn track(&mut self, local: Point) {
        self.hovered = self.contains_local(local);
    }

    pub(crate) fn clear_hover(&mut self) {
        self.hovered = false;
    }

    pub(crate) fn release(&mut self) {
        self.pressed = false;
    }
}

impl Plug for OutputPlug {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn node(&self) -> NodeId {
        self.id.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(slot: usize) -> OutputPlug {
        OutputPlug::new(OutputId { node: NodeId(1), index: 0 }, slot, "Out")
    }

    #[test]
    fn position_is_recomputed_from_node_origin() {
        let plug = output(0);
        assert_eq!(plug.position(Point::new(10.0, 100.0)), Point::new(105.0, 125.0));
        assert_eq!(plug.position(Point::new(0.0, 0.0)), Point::new(95.0, 25.0));
    }

    #[test]
    fn input_sits_on_left_edge() {
        let plug = InputPlug::new(InputId { node: NodeId(1), index: 0 }, 2, "In");
        assert_eq!(plug.node(), NodeId(1));
        assert_eq!(plug.rect().x, 0.0);
        assert_eq!(plug.rect().y, 50.0);
        assert!(plug.contains_local(Point::new(3.0, 55.0)));
        assert!(!plug.contains_local(Point::new(3.0, 45.0)));
    }

    #[test]
    fn hit_test_takes_canvas_points() {
        let plug = output(1);
        let origin = Point::new(250.0, 150.0);
        // Local rect is (90, 35)..(100, 45).
        assert!(plug.hit_test(origin, Point::new(345.0, 190.0)));
        assert!(!plug.hit_test(origin, Point::new(95.0, 40.0)));
        assert!(!plug.hit_test(Point::ORIGIN, Point::new(345.0, 190.0)));
        assert!(plug.hit_test(Point::ORIGIN, Point::new(95.0, 40.0)));
    }

    #[test]
    fn push_target_skips_duplicates() {
        let mut plug = output(0);
        let input = InputId { node: NodeId(2), index: 0 };
        plug.push_target(input);
        plug.push_target(input);
        assert_eq!(plug.targets(), &[input]);
        assert!(plug.drop_target(input));
        assert!(!plug.drop_target(input));
    }

    #[test]
    fn mouse_up_clears_pressed_even_on_miss() {
        let mut plug = output(0);
        assert!(plug.mouse_down(Point::new(92.0, 22.0)));
        assert!(plug.is_pressed());
        assert!(!plug.mouse_up(Point::new(0.0, 0.0)));
        assert!(!plug.is_pressed());
    }
}
