#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bitmap;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod path;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod texture_manager;
pub mod tools;

pub use app::SketchpadApp;
pub use bitmap::{Bitmap, SelectedImage};
pub use color::{Palette, PenColor};
pub use controller::DrawingController;
pub use input::PointerEvent;
pub use renderer::Renderer;
pub use surface::{Canvas, DrawCommand, Surface};
pub use tools::Tool;
