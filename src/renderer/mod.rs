//! Rendering module
//!
//! `scene` turns the game state into a list of 2D draw commands; on the web
//! `canvas` replays them onto the page canvas.

pub mod command;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use command::{DrawCommand, TextAlign};
pub use scene::build_scene;
