use iced::widget::{button, canvas, column, row};
use iced::{Element, Length, Task, Theme};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use plugboard::canvas::CanvasMessage;
use plugboard::{sample, Editor, EditorConfig, Graph};

fn main() -> iced::Result {
    let loaded = EditorConfig::load();

    let fallback = loaded
        .as_ref()
        .ok()
        .and_then(|c| c.log_filter.clone())
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();

    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "using default configuration");
        EditorConfig::default()
    });

    info!("starting plugboard");
    iced::application(move || init(&config), update, view)
        .title("Plugboard")
        .theme(theme)
        .antialiasing(true)
        .run()
}

fn theme(_state: &Plugboard) -> Theme {
    Theme::Dark
}

fn init(config: &EditorConfig) -> (Plugboard, Task<Message>) {
    let mut graph = Graph::new();
    if config.seed_sample {
        sample::populate(&mut graph);
    }
    let editor = Editor::with_config(graph, config);
    (Plugboard { editor }, Task::none())
}

#[derive(Debug, Clone)]
enum Message {
    Canvas(CanvasMessage),
    NewNode,
    Clear,
}

struct Plugboard {
    editor: Editor,
}

fn update(state: &mut Plugboard, message: Message) -> Task<Message> {
    match message {
        Message::Canvas(CanvasMessage::Pointer(event)) => {
            state.editor.handle(Some(event));
        }
        Message::Canvas(CanvasMessage::RemoveNode(id)) => {
            state.editor.graph_mut().remove_node(id);
        }
        Message::NewNode => {
            sample::add_default_node(state.editor.graph_mut());
        }
        Message::Clear => {
            state.editor.graph_mut().clear_nodes();
        }
    }
    Task::none()
}

fn view(state: &Plugboard) -> Element<'_, Message> {
    let toolbar = row![
        button("New node").on_press(Message::NewNode),
        button("Clear").on_press(Message::Clear),
    ]
    .spacing(8)
    .padding(8);

    let board: Element<'_, CanvasMessage> = canvas(&state.editor)
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

    column![toolbar, board.map(Message::Canvas)].into()
}
