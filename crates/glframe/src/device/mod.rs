//! OpenGL context management.
//!
//! This module is responsible for:
//! - creating the GL display/config/surface/context for a window
//! - loading the function table and installing the debug logger
//! - sharing the loaded context with every resource wrapper

mod debug;
mod gpu;
mod init;
mod surface;

pub use gpu::Gpu;
pub use init::GpuInit;

pub(crate) use debug::install as install_debug_output;
pub(crate) use surface::{create_gl, WindowGl};
