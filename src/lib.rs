//! A small node-graph editor: boxes with input and output plugs that can be
//! dragged around a canvas and wired together by dragging from an output to
//! an input.
//!
//! [`Graph`] owns the nodes and the links between their plugs. [`Editor`]
//! drives it one pointer event per frame. Drawing goes through
//! [`DrawBackend`]; [`canvas`] hosts the editor in an iced window.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod node;
pub mod plug;
pub mod sample;

pub use config::EditorConfig;
pub use draw::{DrawBackend, DrawList};
pub use error::ConfigError;
pub use graph::Graph;
pub use interaction::{Editor, PointerEvent, PointerKind};
pub use node::{Node, NodeId};
pub use plug::{InputId, InputPlug, OutputId, OutputPlug, Plug};
