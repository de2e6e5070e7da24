//! GPU resource wrappers.
//!
//! Every wrapper owns its GL objects through [`Unique`] and releases them on
//! drop. Creation binds whatever it needs and leaves it bound; only
//! [`RenderTarget::render`] restores previous state.
//!
//! Convention:
//! - all sizes are in pixels, GL-style `i32`
//! - texture unit 0 is reserved for uploads and resizes

mod formats;
pub mod handle;
mod layout;
mod mesh;
mod render_target;
mod shader;
mod texture;
mod texture_units;
mod uniform;

pub use formats::{
    framebuffer_status_name, ColorFormat, DepthStencilFormat, Filter, InternalFormat,
    InternalFormatSized, PixelFormat, PixelType, Wrap,
};
pub use handle::{Release, Unique};
pub use layout::{triangle_count, VertexAttribute, VertexLayout};
pub use mesh::{Mesh, MeshDescriptor, VertexBufferDescriptor};
pub use render_target::{
    ColorAttachment, DepthStencilAttachment, RenderTarget, RenderTargetDescriptor,
};
pub use shader::{Shader, ShaderDescriptor, ShaderSource};
pub use texture::{Texture, TextureOptions, TextureSource};
pub use texture_units::TextureUnits;
pub use uniform::{LocationCache, Uniform};

pub(crate) use shader::default_shader_descriptor;
