use iced::{Point, Vector};
use tracing::{debug, trace};

use crate::draw::{palette, DrawBackend, LinkStyle};
use crate::node::{Node, NodeId, Press, Release};
use crate::plug::{InputId, InputPlug, OutputId, OutputPlug, Plug};

/// Every node on the canvas plus the link being dragged, if any.
///
/// `nodes` is kept in draw order: index 0 is drawn first and sits at the
/// bottom, the last node is drawn on top and sees the pointer first.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    next_id: u32,
    pending: Option<OutputId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let node = Node::new(id, name);
        debug!(node = id.0, name = node.name(), "node added");
        self.nodes.push(node);
        id
    }

    /// Removes the node and every link touching it.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.nodes.remove(index);

        for node in &mut self.nodes {
            for output in node.outputs_mut() {
                output.drop_targets_on(id);
            }
            for input in node.inputs_mut() {
                if input.source().is_some_and(|s| s.node == id) {
                    input.set_source(None);
                }
            }
        }
        if self.pending.is_some_and(|p| p.node == id) {
            self.pending = None;
        }

        debug!(node = id.0, "node removed");
        true
    }

    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
        self.pending = None;
        debug!("graph cleared");
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes from bottom to top.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn order(&self) -> Vec<NodeId> {
        self.nodes.iter().map(Node::id).collect()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn add_input(&mut self, node: NodeId, name: impl Into<String>) -> Option<InputId> {
        self.node_mut(node).map(|n| n.add_input(name))
    }

    pub fn add_output(&mut self, node: NodeId, name: impl Into<String>) -> Option<OutputId> {
        self.node_mut(node).map(|n| n.add_output(name))
    }

    pub fn set_position(&mut self, node: NodeId, x: f32, y: f32) -> bool {
        self.node_mut(node).map(|n| n.set_position(x, y)).is_some()
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }

    pub fn input(&self, id: InputId) -> Option<&InputPlug> {
        self.node(id.node)?.input(id.index)
    }

    pub fn output(&self, id: OutputId) -> Option<&OutputPlug> {
        self.node(id.node)?.output(id.index)
    }

    fn input_mut(&mut self, id: InputId) -> Option<&mut InputPlug> {
        self.node_mut(id.node)?.input_mut(id.index)
    }

    fn output_mut(&mut self, id: OutputId) -> Option<&mut OutputPlug> {
        self.node_mut(id.node)?.output_mut(id.index)
    }

    pub fn source_of(&self, input: InputId) -> Option<OutputId> {
        self.input(input)?.source()
    }

    pub fn targets_of(&self, output: OutputId) -> &[InputId] {
        self.output(output).map(OutputPlug::targets).unwrap_or_default()
    }

    pub fn input_position(&self, id: InputId) -> Option<Point> {
        let node = self.node(id.node)?;
        Some(node.input(id.index)?.position(node.position()))
    }

    pub fn output_position(&self, id: OutputId) -> Option<Point> {
        let node = self.node(id.node)?;
        Some(node.output(id.index)?.position(node.position()))
    }

    /// Links `output` to `input`, replacing whatever `input` was fed from.
    ///
    /// Returns false, leaving the graph untouched, when both plugs belong to
    /// the same node or either handle no longer resolves.
    pub fn add_target(&mut self, output: OutputId, input: InputId) -> bool {
        if output.node == input.node {
            debug!(node = output.node.0, "rejected link within one node");
            return false;
        }
        if self.output(output).is_none() {
            return false;
        }
        let previous = match self.input(input) {
            Some(plug) => plug.source(),
            None => return false,
        };
        if previous == Some(output) {
            return true;
        }
        if let Some(previous) = previous {
            self.remove_target(previous, input);
        }

        if let Some(plug) = self.output_mut(output) {
            plug.push_target(input);
        }
        if let Some(plug) = self.input_mut(input) {
            plug.set_source(Some(output));
        }
        debug!(
            from = output.node.0,
            output = output.index,
            to = input.node.0,
            input = input.index,
            "linked"
        );
        true
    }

    /// Feeds `input` from `output`; the input-side spelling of [`Graph::add_target`].
    pub fn connect_from(&mut self, input: InputId, output: OutputId) -> bool {
        self.add_target(output, input)
    }

    /// Unlinks `input` from `output`. Does nothing if they are not linked.
    pub fn remove_target(&mut self, output: OutputId, input: InputId) {
        let removed = self
            .output_mut(output)
            .is_some_and(|plug| plug.drop_target(input));
        if let Some(plug) = self.input_mut(input) {
            if plug.source() == Some(output) {
                plug.set_source(None);
            }
        }
        if removed {
            debug!(
                from = output.node.0,
                output = output.index,
                to = input.node.0,
                input = input.index,
                "unlinked"
            );
        }
    }

    /// The output a link is currently being dragged from.
    pub fn pending_connection(&self) -> Option<OutputId> {
        self.pending
    }

    /// Handles that no longer resolve are ignored.
    pub fn set_pending_connection(&mut self, output: Option<OutputId>) {
        match output {
            Some(id) if self.output(id).is_none() => {}
            other => self.pending = other,
        }
    }

    /// Offers a press to the nodes from the top down. The node that takes it
    /// is raised to the top.
    pub fn mouse_down(&mut self, point: Point) -> bool {
        for index in (0..self.nodes.len()).rev() {
            let Some(press) = self.nodes[index].mouse_down(point) else {
                continue;
            };
            match press {
                Press::Input(input) => {
                    if let Some(source) = self.source_of(input) {
                        self.pending = Some(source);
                        self.remove_target(source, input);
                    }
                }
                Press::Output(output) => self.pending = Some(output),
                Press::Body => {}
            }
            self.promote(index);
            return true;
        }
        false
    }

    /// Offers a release to the nodes from the top down, completing a pending
    /// link when it lands on an input. The pending link is always dropped.
    pub fn mouse_up(&mut self, point: Point) -> bool {
        let mut consumed = false;
        for index in (0..self.nodes.len()).rev() {
            let Some(release) = self.nodes[index].mouse_up(point) else {
                continue;
            };
            if let (Release::Input(input), Some(output)) = (release, self.pending) {
                self.add_target(output, input);
            }
            self.promote(index);
            consumed = true;
            break;
        }

        for node in &mut self.nodes {
            node.release();
        }
        self.pending = None;
        consumed
    }

    /// Moves every node being dragged by `delta`, then refreshes hover at
    /// the new pointer position.
    pub fn mouse_drag(&mut self, point: Point, delta: Vector) {
        for node in self.nodes.iter_mut().rev() {
            node.mouse_drag(delta);
        }
        self.pointer_moved(point);
    }

    /// Pointer motion with no button held. Only the topmost node under the
    /// pointer shows hovered plugs.
    pub fn pointer_moved(&mut self, point: Point) {
        let top = self.nodes.iter().rposition(|node| node.covers(point));
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if Some(index) == top {
                node.track(point);
            } else {
                node.clear_hover();
            }
        }
    }

    fn promote(&mut self, index: usize) {
        if index + 1 == self.nodes.len() {
            return;
        }
        let node = self.nodes.remove(index);
        trace!(node = node.id().0, "raised to top");
        self.nodes.push(node);
    }

    /// Links first so nodes cover them, then nodes bottom to top.
    pub fn render(&self, backend: &mut dyn DrawBackend, style: &LinkStyle) {
        for node in &self.nodes {
            node.render_links(self, backend, style.width);
        }
        for node in &self.nodes {
            node.render(backend);
        }
    }

    /// Line from the pending output to the pointer.
    pub fn render_pending(&self, backend: &mut dyn DrawBackend, pointer: Point, style: &LinkStyle) {
        if let Some(start) = self.pending.and_then(|p| self.output_position(p)) {
            backend.draw_line(start, pointer, palette::ACTIVE_LINE, style.preview_width);
        }
    }
}
