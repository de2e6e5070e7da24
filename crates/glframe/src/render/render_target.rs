use std::rc::Rc;

use glow::HasContext;

use crate::device::Gpu;
use crate::error::{allocation, handle_error, Error, Result};

use super::formats::{framebuffer_status_name, ColorFormat, DepthStencilFormat};
use super::handle::Unique;
use super::texture::{Texture, TextureOptions, TextureSource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAttachment {
    pub format: ColorFormat,
    pub options: TextureOptions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStencilAttachment {
    pub format: DepthStencilFormat,
    pub options: TextureOptions,
}

/// Size and attachments of a [`RenderTarget`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetDescriptor {
    pub width: i32,
    pub height: i32,
    /// Attached in order to `COLOR_ATTACHMENT0..`.
    pub color_textures: Vec<ColorAttachment>,
    pub depth_stencil_texture: Option<DepthStencilAttachment>,
}

impl RenderTargetDescriptor {
    fn validate(&self) {
        assert!(
            !self.color_textures.is_empty() || self.depth_stencil_texture.is_some(),
            "A RenderTarget needs at least one color texture or a depth_stencil_texture."
        );
    }

    /// Same attachments at another size. `self` is left untouched.
    fn with_size(&self, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..self.clone()
        }
    }
}

fn color_attachment_point(index: usize) -> u32 {
    glow::COLOR_ATTACHMENT0 + index as u32
}

/// Framebuffer bindings and viewport captured on creation, restored on drop.
struct SavedBindings<'a> {
    gl: &'a glow::Context,
    draw: Option<glow::Framebuffer>,
    read: Option<glow::Framebuffer>,
    viewport: [i32; 4],
}

impl<'a> SavedBindings<'a> {
    fn capture(gl: &'a glow::Context) -> Self {
        let mut viewport = [0; 4];
        unsafe {
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            Self {
                gl,
                draw: gl.get_parameter_framebuffer(glow::DRAW_FRAMEBUFFER_BINDING),
                read: gl.get_parameter_framebuffer(glow::READ_FRAMEBUFFER_BINDING),
                viewport,
            }
        }
    }
}

impl Drop for SavedBindings<'_> {
    fn drop(&mut self) {
        let [x, y, w, h] = self.viewport;
        unsafe {
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, self.draw);
            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, self.read);
            self.gl.viewport(x, y, w, h);
        }
    }
}

/// Textures currently attached to a framebuffer.
struct Attachments {
    color: Vec<Texture>,
    depth_stencil: Option<Texture>,
}

impl Attachments {
    fn create(gpu: &Rc<Gpu>, desc: &RenderTargetDescriptor) -> Result<Self> {
        let mut color = Vec::with_capacity(desc.color_textures.len());
        for attachment in &desc.color_textures {
            let source = TextureSource::empty(desc.width, desc.height, attachment.format.into());
            color.push(Texture::new(gpu, &source, &attachment.options)?);
        }
        let depth_stencil = match &desc.depth_stencil_texture {
            Some(attachment) => {
                let source = TextureSource::empty(desc.width, desc.height, attachment.format.into());
                Some(Texture::new(gpu, &source, &attachment.options)?)
            }
            None => None,
        };
        Ok(Self {
            color,
            depth_stencil,
        })
    }
}

/// An offscreen framebuffer with its own colour / depth-stencil textures.
pub struct RenderTarget {
    framebuffer: Unique<glow::Framebuffer>,
    attachments: Attachments,
    desc: RenderTargetDescriptor,
}

impl RenderTarget {
    pub fn new(gpu: &Rc<Gpu>, desc: RenderTargetDescriptor) -> Result<Self> {
        desc.validate();

        let framebuffer = Unique::new(
            gpu.clone(),
            unsafe { gpu.create_framebuffer() }.map_err(allocation("framebuffer"))?,
        );
        let attachments = Attachments::create(gpu, &desc)?;
        let target = Self {
            framebuffer,
            attachments,
            desc,
        };
        target.attach(&target.desc, &target.attachments)?;
        target.clear();
        target.log_created();
        Ok(target)
    }

    /// Runs `render_fn` with this target bound as the framebuffer and its
    /// size as the viewport. Previous bindings are restored afterwards, also
    /// when `render_fn` panics.
    pub fn render<R>(&self, render_fn: impl FnOnce() -> R) -> R {
        let _saved = self.bind();
        render_fn()
    }

    /// Recreates every attachment at the new size. Previous contents are lost.
    ///
    /// On failure the target keeps its previous size and attachments.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let desc = self.desc.with_size(width, height);
        let attachments = Attachments::create(self.gpu(), &desc)?;

        if let Err(e) = self.attach(&desc, &attachments) {
            if let Err(restore) = self.attach(&self.desc, &self.attachments) {
                log::error!("failed to restore render target attachments: {restore}");
            }
            return Err(e);
        }

        self.desc = desc;
        self.attachments = attachments;
        self.clear();
        self.log_created();
        Ok(())
    }

    pub fn color_texture(&self, index: usize) -> &Texture {
        &self.attachments.color[index]
    }

    pub fn depth_stencil_texture(&self) -> &Texture {
        match &self.attachments.depth_stencil {
            Some(texture) => texture,
            None => panic!(
                "You didn't create this RenderTarget with a depth_stencil_texture. See RenderTargetDescriptor."
            ),
        }
    }

    pub fn width(&self) -> i32 {
        self.desc.width
    }

    pub fn height(&self) -> i32 {
        self.desc.height
    }

    pub fn descriptor(&self) -> &RenderTargetDescriptor {
        &self.desc
    }

    fn gpu(&self) -> &Rc<Gpu> {
        self.framebuffer.owner()
    }

    fn bind(&self) -> SavedBindings<'_> {
        let gl = self.gpu().gl();
        let saved = SavedBindings::capture(gl);
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer.get()));
            gl.viewport(0, 0, self.desc.width, self.desc.height);
        }
        saved
    }

    /// Attaches `attachments` laid out as `desc` and checks completeness.
    fn attach(&self, desc: &RenderTargetDescriptor, attachments: &Attachments) -> Result<()> {
        let _saved = self.bind();
        let gl = self.gpu().gl();
        unsafe {
            if attachments.color.is_empty() {
                gl.draw_buffer(glow::NONE);
                gl.read_buffer(glow::NONE);
            }
            for (i, texture) in attachments.color.iter().enumerate() {
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    color_attachment_point(i),
                    glow::TEXTURE_2D,
                    Some(texture.raw()),
                    0,
                );
            }
            if let (Some(attachment), Some(texture)) =
                (&desc.depth_stencil_texture, &attachments.depth_stencil)
            {
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    attachment.format.attachment_point(),
                    glow::TEXTURE_2D,
                    Some(texture.raw()),
                    0,
                );
            }

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                return Err(handle_error(Error::IncompleteFramebuffer(
                    framebuffer_status_name(status),
                )));
            }
        }
        Ok(())
    }

    fn clear(&self) {
        let _saved = self.bind();
        let gl = self.gpu().gl();
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn log_created(&self) {
        log::debug!(
            "render target {}x{}: {} color attachment(s), depth/stencil={}",
            self.desc.width,
            self.desc.height,
            self.attachments.color.len(),
            self.attachments.depth_stencil.is_some()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(format: ColorFormat) -> ColorAttachment {
        ColorAttachment {
            format,
            options: TextureOptions::default(),
        }
    }

    fn descriptor() -> RenderTargetDescriptor {
        RenderTargetDescriptor {
            width: 800,
            height: 600,
            color_textures: vec![color(ColorFormat::RGBA8), color(ColorFormat::R32F)],
            depth_stencil_texture: Some(DepthStencilAttachment {
                format: DepthStencilFormat::Depth24_Stencil8,
                options: TextureOptions::default(),
            }),
        }
    }

    // ── validation ──────────────────────────────────────────────────────────

    #[test]
    fn color_or_depth_alone_is_enough() {
        let mut desc = descriptor();
        desc.depth_stencil_texture = None;
        desc.validate();

        let mut desc = descriptor();
        desc.color_textures.clear();
        desc.validate();
    }

    #[test]
    #[should_panic(expected = "at least one color texture")]
    fn target_without_attachments_is_rejected() {
        let mut desc = descriptor();
        desc.color_textures.clear();
        desc.depth_stencil_texture = None;
        desc.validate();
    }

    // ── resize ──────────────────────────────────────────────────────────────

    #[test]
    fn resize_keeps_attachment_list() {
        let desc = descriptor();
        let resized = desc.with_size(1920, 1080);
        assert_eq!((resized.width, resized.height), (1920, 1080));
        assert_eq!(resized.color_textures, desc.color_textures);
        assert_eq!(resized.depth_stencil_texture, desc.depth_stencil_texture);
    }

    #[test]
    fn resized_descriptor_leaves_current_one_untouched() {
        let desc = descriptor();
        let before = desc.clone();
        let _resized = desc.with_size(1, 1);
        assert_eq!(desc, before);
        assert_eq!((desc.width, desc.height), (800, 600));
    }

    // ── attachment points ───────────────────────────────────────────────────

    #[test]
    fn color_attachments_are_numbered_in_order() {
        assert_eq!(color_attachment_point(0), glow::COLOR_ATTACHMENT0);
        assert_eq!(color_attachment_point(1), glow::COLOR_ATTACHMENT1);
        assert_eq!(color_attachment_point(3), glow::COLOR_ATTACHMENT3);
    }
}
