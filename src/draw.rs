//! The drawing seam between the graph and whatever paints it.
//!
//! The graph only ever talks to a [`DrawBackend`]. [`DrawList`] is the one
//! backend in this crate: it records commands in canvas space so the iced
//! canvas can paint them and tests can inspect them.

use iced::{Color, Point, Rectangle, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Node,
    InputPlug,
    OutputPlug,
    /// A plug under the pointer, either kind.
    HoveredPlug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Left aligned, to the right of an input plug.
    Input,
    /// Right aligned, to the left of an output plug.
    Output,
}

pub mod palette {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.16, 0.16, 0.16);
    pub const LINE: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const ACTIVE_LINE: Color = Color::from_rgb(1.0, 0.0, 0.0);
    pub const NODE_BASE: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const NODE_BORDER: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const INPUT_PLUG: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const OUTPUT_PLUG: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const HOVERED_PLUG: Color = Color::from_rgb(0.55, 0.55, 0.55);
    pub const NODE_TEXT: Color = Color::WHITE;
    pub const INPUT_TEXT: Color = Color::WHITE;
    pub const OUTPUT_TEXT: Color = Color::WHITE;
}

impl BoxStyle {
    pub fn fill(self) -> Color {
        match self {
            BoxStyle::Node => palette::NODE_BASE,
            BoxStyle::InputPlug => palette::INPUT_PLUG,
            BoxStyle::OutputPlug => palette::OUTPUT_PLUG,
            BoxStyle::HoveredPlug => palette::HOVERED_PLUG,
        }
    }
}

impl LabelStyle {
    pub fn color(self) -> Color {
        match self {
            LabelStyle::Input => palette::INPUT_TEXT,
            LabelStyle::Output => palette::OUTPUT_TEXT,
        }
    }
}

/// Stroke widths for committed links and for the drag preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    pub width: f32,
    pub preview_width: f32,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            preview_width: 2.0,
        }
    }
}

/// Immediate-mode drawing interface.
///
/// Boxes and labels are positioned relative to the innermost open group;
/// lines are always in canvas space.
pub trait DrawBackend {
    fn draw_box(&mut self, rect: Rectangle, label: &str, style: BoxStyle);
    fn draw_label(&mut self, rect: Rectangle, text: &str, style: LabelStyle);
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);
    fn begin_group(&mut self, origin: Point);
    fn end_group(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Box {
        rect: Rectangle,
        label: String,
        style: BoxStyle,
    },
    Label {
        rect: Rectangle,
        text: String,
        style: LabelStyle,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
}

/// Records commands with group offsets already applied.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    groups: Vec<Vector>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.groups.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    /// Node bodies in the order they were drawn, bottom first.
    pub fn node_labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Box {
                    label,
                    style: BoxStyle::Node,
                    ..
                } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    fn origin(&self) -> Vector {
        self.groups.last().copied().unwrap_or(Vector::ZERO)
    }

    fn place(&self, rect: Rectangle) -> Rectangle {
        Rectangle::new(rect.position() + self.origin(), rect.size())
    }
}

impl DrawBackend for DrawList {
    fn draw_box(&mut self, rect: Rectangle, label: &str, style: BoxStyle) {
        self.commands.push(DrawCommand::Box {
            rect: self.place(rect),
            label: label.to_string(),
            style,
        });
    }

    fn draw_label(&mut self, rect: Rectangle, text: &str, style: LabelStyle) {
        self.commands.push(DrawCommand::Label {
            rect: self.place(rect),
            text: text.to_string(),
            style,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn begin_group(&mut self, origin: Point) {
        let nested = self.origin() + Vector::new(origin.x, origin.y);
        self.groups.push(nested);
    }

    fn end_group(&mut self) {
        self.groups.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    #[test]
    fn groups_offset_boxes_but_not_lines() {
        let mut list = DrawList::new();
        list.begin_group(Point::new(10.0, 100.0));
        list.draw_box(
            Rectangle::new(Point::new(0.0, 20.0), Size::new(10.0, 10.0)),
            "",
            BoxStyle::InputPlug,
        );
        list.draw_line(Point::ORIGIN, Point::new(5.0, 5.0), palette::LINE, 2.0);
        list.end_group();

        match &list.commands()[0] {
            DrawCommand::Box { rect, .. } => assert_eq!(rect.position(), Point::new(10.0, 120.0)),
            other => panic!("unexpected {other:?}"),
        }
        let (from, to, _) = list.lines().next().unwrap();
        assert_eq!(from, Point::ORIGIN);
        assert_eq!(to, Point::new(5.0, 5.0));
    }

    #[test]
    fn nested_groups_accumulate() {
        let mut list = DrawList::new();
        list.begin_group(Point::new(10.0, 10.0));
        list.begin_group(Point::new(5.0, 5.0));
        list.draw_label(
            Rectangle::new(Point::ORIGIN, Size::new(1.0, 1.0)),
            "x",
            LabelStyle::Input,
        );
        list.end_group();
        list.draw_label(
            Rectangle::new(Point::ORIGIN, Size::new(1.0, 1.0)),
            "y",
            LabelStyle::Input,
        );
        list.end_group();

        let origins: Vec<Point> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { rect, .. } => Some(rect.position()),
                _ => None,
            })
            .collect();
        assert_eq!(origins, vec![Point::new(15.0, 15.0), Point::new(10.0, 10.0)]);
    }
}
