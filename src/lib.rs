#![warn(clippy::all, rust_2018_idioms)]

pub mod alerts;
pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod file_saver;
pub mod history;
pub mod input;
pub mod panels;
pub mod roulette;
pub mod screens;
pub mod stroke;
pub mod surface;
pub mod timer;
pub mod tool;
pub mod util;

pub use app::BoardApp;
pub use canvas::{CanvasAction, CanvasController};
pub use config::BoardConfig;
pub use error::{BoardError, BoardResult};
pub use file_saver::{FileSaver, MemorySaver};
pub use history::History;
pub use input::{CanvasInput, InputHandler};
pub use roulette::Roulette;
pub use screens::ScreenCarousel;
pub use stroke::StrokeSession;
pub use surface::{PixmapSurface, RasterSurface, Snapshot};
pub use timer::Countdown;
pub use tool::{StrokeStyle, ToolState};
