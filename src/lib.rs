#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod drawable;
pub mod error;
pub mod event;
pub mod export;
pub mod history;
pub mod preview;
pub mod renderer;
pub mod session;
pub mod settings;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use drawable::{Drawable, MarkerLine, Point, Stamp};
pub use error::{ConfigError, ExportError};
pub use event::{EventBus, EventHandler, PointerHint, SessionEvent};
pub use history::History;
pub use preview::Preview;
pub use renderer::Renderer;
pub use session::{ControlState, SessionState, ToolSession};
pub use settings::{ToolKind, ToolSettings};
