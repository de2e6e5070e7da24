//! Window + frame loop.
//!
//! Owns the `winit` event loop and window, pumps it once per frame and wires
//! them to the GL layer.

mod config;
mod context;

pub use config::WindowConfig;
pub use context::Context;
pub use winit::dpi::LogicalSize;
