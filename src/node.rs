use iced::{Point, Rectangle, Size, Vector};

use crate::draw::{palette, BoxStyle, DrawBackend, LabelStyle};
use crate::geometry::{self, NODE_WIDTH};
use crate::graph::Graph;
use crate::plug::{InputId, InputPlug, OutputId, OutputPlug, Plug};

/// Stable identifier of a node. Never reused after the node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// What a mouse-down on a node landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Input(InputId),
    Output(OutputId),
    Body,
}

/// What a mouse-up on a node landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Input(InputId),
    Output(OutputId),
    Body,
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    rect: Rectangle,
    inputs: Vec<InputPlug>,
    outputs: Vec<OutputPlug>,
    dragging: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rect: Rectangle::new(Point::ORIGIN, Size::new(NODE_WIDTH, geometry::node_height(0))),
            inputs: Vec::new(),
            outputs: Vec::new(),
            dragging: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn position(&self) -> Point {
        self.rect.position()
    }

    pub fn inputs(&self) -> &[InputPlug] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputPlug] {
        &self.outputs
    }

    pub fn input(&self, index: usize) -> Option<&InputPlug> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&OutputPlug> {
        self.outputs.get(index)
    }

    pub(crate) fn input_mut(&mut self, index: usize) -> Option<&mut InputPlug> {
        self.inputs.get_mut(index)
    }

    pub(crate) fn output_mut(&mut self, index: usize) -> Option<&mut OutputPlug> {
        self.outputs.get_mut(index)
    }

    pub(crate) fn inputs_mut(&mut self) -> impl Iterator<Item = &mut InputPlug> {
        self.inputs.iter_mut()
    }

    pub(crate) fn outputs_mut(&mut self) -> impl Iterator<Item = &mut OutputPlug> {
        self.outputs.iter_mut()
    }

    pub fn plug_count(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Appends an input in the next free slot and grows the node to fit.
    pub fn add_input(&mut self, name: impl Into<String>) -> InputId {
        let id = InputId {
            node: self.id,
            index: self.inputs.len(),
        };
        let slot = self.plug_count();
        self.inputs.push(InputPlug::new(id, slot, name));
        self.fit_height();
        id
    }

    /// Appends an output in the next free slot and grows the node to fit.
    pub fn add_output(&mut self, name: impl Into<String>) -> OutputId {
        let id = OutputId {
            node: self.id,
            index: self.outputs.len(),
        };
        let slot = self.plug_count();
        self.outputs.push(OutputPlug::new(id, slot, name));
        self.fit_height();
        id
    }

    fn fit_height(&mut self) {
        self.rect.height = geometry::node_height(self.plug_count());
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn translate(&mut self, delta: Vector) {
        self.rect.x += delta.x;
        self.rect.y += delta.y;
    }

    pub fn hit_test(&self, point: Point) -> bool {
        geometry::contains(self.rect, point)
    }

    /// Whether `point` lands on one of this node's plugs.
    pub fn over_plug(&self, point: Point) -> bool {
        let origin = self.position();
        self.inputs.iter().any(|p| p.hit_test(origin, point))
            || self.outputs.iter().any(|p| p.hit_test(origin, point))
    }

    /// Body or plug under `point`.
    pub fn covers(&self, point: Point) -> bool {
        self.hit_test(point) || self.over_plug(point)
    }

    /// Plugs are tried before the body: inputs in order, then outputs.
    pub(crate) fn mouse_down(&mut self, point: Point) -> Option<Press> {
        let local = geometry::to_local(self.position(), point);

        for plug in &mut self.inputs {
            if plug.mouse_down(local) {
                return Some(Press::Input(plug.id()));
            }
        }
        for plug in &mut self.outputs {
            if plug.mouse_down(local) {
                return Some(Press::Output(plug.id()));
            }
        }

        if self.hit_test(point) {
            self.dragging = true;
            return Some(Press::Body);
        }
        None
    }

    pub(crate) fn mouse_up(&mut self, point: Point) -> Option<Release> {
        let local = geometry::to_local(self.position(), point);
        self.dragging = false;

        for plug in &mut self.inputs {
            if plug.mouse_up(local) {
                return Some(Release::Input(plug.id()));
            }
        }
        for plug in &mut self.outputs {
            if plug.mouse_up(local) {
                return Some(Release::Output(plug.id()));
            }
        }

        self.hit_test(point).then_some(Release::Body)
    }

    pub(crate) fn mouse_drag(&mut self, delta: Vector) {
        if self.dragging {
            self.translate(delta);
        }
    }

    /// Updates plug hover state for a pointer at `point`.
    pub(crate) fn track(&mut self, point: Point) {
        let local = geometry::to_local(self.position(), point);
        for plug in &mut self.inputs {
            plug.track(local);
        }
        for plug in &mut self.outputs {
            plug.track(local);
        }
    }

    pub(crate) fn clear_hover(&mut self) {
        for plug in &mut self.inputs {
            plug.clear_hover();
        }
        for plug in &mut self.outputs {
            plug.clear_hover();
        }
    }

    /// Drops every pressed flag and ends any drag.
    pub(crate) fn release(&mut self) {
        self.dragging = false;
        for plug in &mut self.inputs {
            plug.release();
        }
        for plug in &mut self.outputs {
            plug.release();
        }
    }

    /// One line per link leaving this node, in canvas space.
    pub fn render_links(&self, graph: &Graph, backend: &mut dyn DrawBackend, width: f32) {
        for plug in &self.outputs {
            let start = plug.position(self.position());
            for target in plug.targets() {
                if let Some(end) = graph.input_position(*target) {
                    backend.draw_line(start, end, palette::LINE, width);
                }
            }
        }
    }

    /// Body, then inputs, then outputs, in node-local coordinates.
    pub fn render(&self, backend: &mut dyn DrawBackend) {
        backend.begin_group(self.position());
        backend.draw_box(
            Rectangle::new(Point::ORIGIN, self.rect.size()),
            &self.name,
            BoxStyle::Node,
        );

        for plug in &self.inputs {
            let rect = plug.rect();
            let style = if plug.is_hovered() {
                BoxStyle::HoveredPlug
            } else {
                BoxStyle::InputPlug
            };
            backend.draw_box(rect, "", style);
            backend.draw_label(
                Rectangle::new(
                    Point::new(rect.x + rect.width, rect.y - 3.0),
                    Size::new(NODE_WIDTH, 20.0),
                ),
                plug.name(),
                LabelStyle::Input,
            );
        }

        for plug in &self.outputs {
            let rect = plug.rect();
            let style = if plug.is_hovered() {
                BoxStyle::HoveredPlug
            } else {
                BoxStyle::OutputPlug
            };
            backend.draw_box(rect, "", style);
            let width = plug.name().chars().count() as f32 * 12.0;
            backend.draw_label(
                Rectangle::new(Point::new(rect.x - width, rect.y - 3.0), Size::new(width, 20.0)),
                plug.name(),
                LabelStyle::Output,
            );
        }

        backend.end_group();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, DrawList};

    fn node() -> Node {
        Node::new(NodeId(7), "Node")
    }

    #[test]
    fn height_tracks_plug_count() {
        let mut n = node();
        assert_eq!(n.rect().height, 20.0);
        n.add_input("a");
        n.add_input("b");
        n.add_output("x");
        let fourth = n.add_input("c");
        n.add_output("y");
        assert_eq!(n.rect().height, 95.0);
        assert_eq!(n.input(fourth.index).unwrap().rect().y, 65.0);
        assert_eq!(n.output(0).unwrap().rect().y, 50.0);
    }

    #[test]
    fn plug_ids_index_within_kind() {
        let mut n = node();
        let a = n.add_input("a");
        let x = n.add_output("x");
        let b = n.add_input("b");
        assert_eq!((a.index, b.index, x.index), (0, 1, 0));
        assert_eq!(a.node, NodeId(7));
    }

    #[test]
    fn mouse_down_prefers_plugs_over_body() {
        let mut n = node();
        n.set_position(10.0, 100.0);
        let input = n.add_input("In");
        let output = n.add_output("Out");

        assert_eq!(n.mouse_down(Point::new(12.0, 122.0)), Some(Press::Input(input)));
        assert!(!n.is_dragging());
        assert_eq!(n.mouse_down(Point::new(105.0, 140.0)), Some(Press::Output(output)));
        assert_eq!(n.mouse_down(Point::new(50.0, 105.0)), Some(Press::Body));
        assert!(n.is_dragging());
        assert_eq!(n.mouse_down(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn drag_moves_only_while_pressed() {
        let mut n = node();
        n.mouse_drag(Vector::new(3.0, 4.0));
        assert_eq!(n.position(), Point::ORIGIN);

        n.mouse_down(Point::new(5.0, 5.0));
        n.mouse_drag(Vector::new(3.0, 4.0));
        assert_eq!(n.position(), Point::new(3.0, 4.0));

        assert_eq!(n.mouse_up(Point::new(8.0, 9.0)), Some(Release::Body));
        n.mouse_drag(Vector::new(12.0, 11.0));
        assert_eq!(n.position(), Point::new(3.0, 4.0));
    }

    #[test]
    fn mouse_up_misses_outside() {
        let mut n = node();
        n.add_output("Out");
        assert_eq!(n.mouse_up(Point::new(-1.0, 0.0)), None);
    }

    #[test]
    fn render_uses_node_local_group() {
        let mut n = node();
        n.set_position(250.0, 150.0);
        n.add_input("InFFF");
        n.add_output("Out");

        let mut list = DrawList::new();
        n.render(&mut list);

        let boxes: Vec<(Rectangle, BoxStyle)> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Box { rect, style, .. } => Some((*rect, *style)),
                _ => None,
            })
            .collect();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].0, Rectangle::new(Point::new(250.0, 150.0), Size::new(100.0, 50.0)));
        assert_eq!(boxes[1], (Rectangle::new(Point::new(250.0, 170.0), Size::new(10.0, 10.0)), BoxStyle::InputPlug));
        assert_eq!(boxes[2].0.position(), Point::new(340.0, 185.0));
        assert_eq!(list.node_labels(), vec!["Node"]);
    }
}
