#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod export;
mod http;
pub mod loader;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod search;
pub mod state;
pub mod task;
pub mod util;

pub use app::CaptionApp;
pub use command::{Command, CommandError, CommandResult};
pub use config::AppConfig;
pub use element::{ObjectId, ObjectKind, SceneObject, ShapeKind};
pub use export::{ExportRequest, ExportService};
pub use renderer::Renderer;
pub use scene::Scene;
pub use state::{EditorState, LoadState};
