//! iced host for the editor: turns canvas mouse events into pointer events
//! and paints recorded draw commands.

use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::{Point, Rectangle, Renderer, Theme};

use crate::draw::{palette, BoxStyle, DrawCommand, DrawList, LabelStyle};
use crate::interaction::{Editor, PointerEvent, PointerKind};
use crate::node::{Node, NodeId};

const LABEL_SIZE: f32 = 11.0;
/// Rough advance per glyph at `LABEL_SIZE`, used to right-align labels.
const GLYPH_WIDTH: f32 = 6.0;

#[derive(Debug, Clone, Copy)]
pub enum CanvasMessage {
    Pointer(PointerEvent),
    RemoveNode(NodeId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    None,
    /// Left button held since a press inside the canvas.
    Pressed,
}

impl canvas::Program<CanvasMessage> for Editor {
    type State = Interaction;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let content = self.cache.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette::BACKGROUND);
            let mut list = DrawList::new();
            self.render(&mut list);
            paint(frame, &list);
        });

        // Follows the pointer, so it is never cached.
        let mut preview = Frame::new(renderer, bounds.size());
        let mut list = DrawList::new();
        self.render_pending(&mut list);
        paint(&mut preview, &list);

        vec![content, preview.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<CanvasMessage>> {
        let iced::Event::Mouse(mouse_event) = event else {
            return None;
        };
        translate(self, state, mouse_event, bounds, cursor).map(canvas::Action::publish)
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let graph = self.graph();
        if graph.pending_connection().is_some() {
            return mouse::Interaction::Crosshair;
        }
        if graph.nodes().any(Node::is_dragging) {
            return mouse::Interaction::Grabbing;
        }

        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        match topmost_at(self, position) {
            Some(node) if node.over_plug(position) => mouse::Interaction::Crosshair,
            Some(_) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }
}

/// Maps one iced mouse event to what the editor should see, updating the
/// button state along the way.
fn translate(
    editor: &Editor,
    state: &mut Interaction,
    event: &mouse::Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
) -> Option<CanvasMessage> {
    let pointer = |kind: PointerKind, position: Point| {
        Some(CanvasMessage::Pointer(PointerEvent::new(kind, position)))
    };

    match event {
        mouse::Event::ButtonPressed(mouse::Button::Left) => {
            let position = cursor.position_in(bounds)?;
            *state = Interaction::Pressed;
            pointer(PointerKind::Down, position)
        }
        mouse::Event::ButtonReleased(mouse::Button::Left) => {
            if *state != Interaction::Pressed {
                return None;
            }
            *state = Interaction::None;
            // The gesture ends even when the pointer has left the window.
            let position = cursor
                .position_from(bounds.position())
                .unwrap_or(editor.pointer());
            pointer(PointerKind::Up, position)
        }
        mouse::Event::ButtonPressed(mouse::Button::Right) => {
            let position = cursor.position_in(bounds)?;
            let node = topmost_at(editor, position)?;
            Some(CanvasMessage::RemoveNode(node.id()))
        }
        mouse::Event::CursorMoved { .. } => match state {
            Interaction::Pressed => {
                let position = cursor.position_from(bounds.position())?;
                pointer(PointerKind::Drag, position)
            }
            Interaction::None => {
                let position = cursor.position_in(bounds)?;
                pointer(PointerKind::Move, position)
            }
        },
        _ => None,
    }
}

fn topmost_at(editor: &Editor, position: Point) -> Option<&Node> {
    editor.graph().nodes().rev().find(|node| node.covers(position))
}

/// Paints commands recorded in canvas space onto an iced frame.
pub fn paint(frame: &mut Frame, list: &DrawList) {
    for command in list.commands() {
        match command {
            DrawCommand::Box { rect, label, style } => {
                frame.fill_rectangle(rect.position(), rect.size(), style.fill());
                if *style == BoxStyle::Node {
                    frame.stroke(
                        &Path::rectangle(rect.position(), rect.size()),
                        Stroke::default()
                            .with_color(palette::NODE_BORDER)
                            .with_width(1.0),
                    );
                }
                if !label.is_empty() {
                    let width = label.chars().count() as f32 * GLYPH_WIDTH;
                    frame.fill_text(Text {
                        content: label.clone(),
                        position: Point::new(rect.x + (rect.width - width) / 2.0, rect.y + 3.0),
                        color: palette::NODE_TEXT,
                        size: iced::Pixels(LABEL_SIZE + 1.0),
                        ..Text::default()
                    });
                }
            }
            DrawCommand::Label { rect, text, style } => {
                let x = match style {
                    LabelStyle::Input => rect.x + 2.0,
                    LabelStyle::Output => {
                        rect.x + rect.width - text.chars().count() as f32 * GLYPH_WIDTH - 2.0
                    }
                };
                frame.fill_text(Text {
                    content: text.clone(),
                    position: Point::new(x, rect.y + 2.0),
                    color: style.color(),
                    size: iced::Pixels(LABEL_SIZE),
                    ..Text::default()
                });
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                frame.stroke(
                    &Path::line(*from, *to),
                    Stroke::default().with_color(*color).with_width(*width),
                );
            }
        }
    }
}
