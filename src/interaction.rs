//! Pointer events and the per-frame driver that feeds them to the graph.

use iced::widget::canvas::Cache;
use iced::{Point, Vector};

use crate::config::EditorConfig;
use crate::draw::{DrawBackend, LinkStyle};
use crate::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    /// Motion with the button held.
    Drag,
    /// Motion with no button held.
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y))
    }

    pub fn drag(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Drag, Point::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }
}

/// The graph together with the pointer state that spans frames.
pub struct Editor {
    graph: Graph,
    /// Where the pointer was on the previous drag frame, or at the press.
    anchor: Point,
    pointer: Point,
    links: LinkStyle,
    pub(crate) cache: Cache,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Graph::new())
    }
}

impl Editor {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            anchor: Point::ORIGIN,
            pointer: Point::ORIGIN,
            links: LinkStyle::default(),
            cache: Cache::new(),
        }
    }

    pub fn with_config(graph: Graph, config: &EditorConfig) -> Self {
        Self {
            links: LinkStyle {
                width: config.line_width,
                preview_width: config.preview_line_width,
            },
            ..Self::new(graph)
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for host code; the cached drawing is invalidated.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.cache.clear();
        &mut self.graph
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn link_style(&self) -> &LinkStyle {
        &self.links
    }

    /// Applies at most one pointer event. Returns whether a node consumed it;
    /// drags and moves are never consumed.
    pub fn handle(&mut self, event: Option<PointerEvent>) -> bool {
        let Some(PointerEvent { kind, position }) = event else {
            return false;
        };
        self.pointer = position;
        self.cache.clear();

        match kind {
            PointerKind::Down => {
                self.anchor = position;
                self.graph.mouse_down(position)
            }
            PointerKind::Up => self.graph.mouse_up(position),
            PointerKind::Drag => {
                let delta = Vector::new(position.x - self.anchor.x, position.y - self.anchor.y);
                self.graph.mouse_drag(position, delta);
                self.anchor = position;
                false
            }
            PointerKind::Move => {
                self.graph.pointer_moved(position);
                false
            }
        }
    }

    /// Draws the current graph without the drag preview.
    pub fn render(&self, backend: &mut dyn DrawBackend) {
        self.graph.render(backend, &self.links);
    }

    pub fn render_pending(&self, backend: &mut dyn DrawBackend) {
        self.graph.render_pending(backend, self.pointer, &self.links);
    }

    /// One full frame: draw, apply the event, then draw the drag preview
    /// against the updated state.
    pub fn frame(&mut self, event: Option<PointerEvent>, backend: &mut dyn DrawBackend) -> bool {
        self.render(backend);
        let consumed = self.handle(event);
        self.render_pending(backend);
        consumed
    }
}
