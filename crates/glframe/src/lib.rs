//! glframe: a small OpenGL + window framework for rendering demos.
//!
//! This crate owns the window, the GL context and RAII wrappers for the GL
//! objects a demo needs (meshes, shaders, textures, render targets), plus an
//! orbit camera driven by mouse events.
//!
//! ```rust,ignore
//! use glframe::{Camera, Context, Mesh, MeshDescriptor, VertexAttribute, VertexBufferDescriptor};
//!
//! let mut ctx = Context::init("demo")?;
//! let camera = Rc::new(RefCell::new(Camera::default()));
//! ctx.set_events_callbacks([Camera::events_callbacks(&camera)]);
//!
//! let triangle = Mesh::new(ctx.gpu(), &MeshDescriptor {
//!     vertex_buffers: &[VertexBufferDescriptor {
//!         layout: &[VertexAttribute::position_2d(0)],
//!         data: &[-0.5, -0.5, 0.5, -0.5, 0.0, 0.5],
//!     }],
//!     index_buffer: &[],
//! })?;
//!
//! while ctx.window_is_open() {
//!     ctx.bind_default_shader()?;
//!     triangle.draw();
//! }
//! ```

pub mod camera;
pub mod device;
pub mod error;
pub mod img;
pub mod input;
pub mod logging;
pub mod path;
pub mod render;
pub mod time;
pub mod window;

pub use camera::{Camera, CameraState};
pub use device::{Gpu, GpuInit};
pub use error::{handle_error, Error, Result};
pub use input::{EventsCallbacks, EventsHandler};
pub use path::make_absolute_path;
pub use render::{
    ColorAttachment, DepthStencilAttachment, Mesh, MeshDescriptor, RenderTarget,
    RenderTargetDescriptor, Shader, ShaderDescriptor, ShaderSource, Texture, TextureOptions,
    TextureSource, VertexAttribute, VertexBufferDescriptor,
};
pub use window::{Context, WindowConfig};

pub use glam;
pub use glow;
