use std::path::PathBuf;
use std::rc::Rc;

use glam::Vec4;
use glow::HasContext;

use crate::device::Gpu;
use crate::error::{allocation, Result};
use crate::img::{self, Channels};
use crate::path::make_absolute_path;

use super::formats::{
    bytes_per_pixel, Filter, InternalFormat, InternalFormatSized, PixelFormat, PixelType, Wrap,
};
use super::handle::Unique;

/// Where the texels of a new [`Texture`] come from.
#[derive(Debug, Clone)]
pub enum TextureSource<'a> {
    /// Image file, decoded to RGBA8.
    File {
        path: PathBuf,
        /// Image files and GL disagree on the direction of the Y axis.
        flip_y: bool,
        texture_format: InternalFormat,
    },
    /// Client memory uploaded as-is.
    Pixels {
        pixels: &'a [u8],
        width: i32,
        height: i32,
        source_pixels_type: PixelType,
        source_pixels_format: PixelFormat,
        texture_format: InternalFormat,
    },
    /// Uninitialised immutable storage, e.g. for render-target attachments.
    EmptyImage {
        width: i32,
        height: i32,
        texture_format: InternalFormatSized,
    },
}

impl TextureSource<'_> {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            flip_y: true,
            texture_format: InternalFormat::RGBA,
        }
    }

    pub fn empty(width: i32, height: i32, texture_format: InternalFormatSized) -> Self {
        Self::EmptyImage {
            width,
            height,
            texture_format,
        }
    }
}

impl<'a> TextureSource<'a> {
    /// Tightly packed RGBA8 pixels.
    pub fn rgba8(pixels: &'a [u8], width: i32, height: i32) -> Self {
        Self::Pixels {
            pixels,
            width,
            height,
            source_pixels_type: PixelType::UnsignedByte,
            source_pixels_format: PixelFormat::RGBA,
            texture_format: InternalFormat::RGBA,
        }
    }
}

/// Sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureOptions {
    pub minification_filter: Filter,
    pub magnification_filter: Filter,
    pub wrap_x: Wrap,
    pub wrap_y: Wrap,
    /// Only used when a wrap mode is [`Wrap::ClampToBorder`].
    pub border_color: Vec4,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            minification_filter: Filter::Linear,
            magnification_filter: Filter::Linear,
            wrap_x: Wrap::ClampToEdge,
            wrap_y: Wrap::ClampToEdge,
            border_color: Vec4::ZERO,
        }
    }
}

/// A 2D texture.
pub struct Texture {
    handle: Unique<glow::Texture>,
    width: i32,
    height: i32,
}

impl Texture {
    pub fn new(gpu: &Rc<Gpu>, source: &TextureSource<'_>, options: &TextureOptions) -> Result<Self> {
        let gl = gpu.gl();
        let handle = Unique::new(
            gpu.clone(),
            unsafe { gl.create_texture() }.map_err(allocation("texture"))?,
        );
        unsafe { gl.bind_texture(glow::TEXTURE_2D, Some(handle.get())) };

        let (width, height) = match source {
            TextureSource::File {
                path,
                flip_y,
                texture_format,
            } => {
                let image = img::load(make_absolute_path(path)?, Some(Channels::Rgba), *flip_y)?;
                let (width, height) = (image.width as i32, image.height as i32);
                upload_pixels(
                    gl,
                    &image.data,
                    width,
                    height,
                    PixelType::UnsignedByte,
                    PixelFormat::RGBA,
                    *texture_format,
                );
                (width, height)
            }
            TextureSource::Pixels {
                pixels,
                width,
                height,
                source_pixels_type,
                source_pixels_format,
                texture_format,
            } => {
                assert_pixels_fit(
                    pixels.len(),
                    *width,
                    *height,
                    *source_pixels_format,
                    *source_pixels_type,
                );
                upload_pixels(
                    gl,
                    pixels,
                    *width,
                    *height,
                    *source_pixels_type,
                    *source_pixels_format,
                    *texture_format,
                );
                (*width, *height)
            }
            TextureSource::EmptyImage {
                width,
                height,
                texture_format,
            } => {
                unsafe {
                    gl.tex_storage_2d(glow::TEXTURE_2D, 1, texture_format.gl(), *width, *height)
                };
                (*width, *height)
            }
        };

        unsafe {
            let params = [
                (glow::TEXTURE_MIN_FILTER, options.minification_filter.gl()),
                (glow::TEXTURE_MAG_FILTER, options.magnification_filter.gl()),
                (glow::TEXTURE_WRAP_S, options.wrap_x.gl()),
                (glow::TEXTURE_WRAP_T, options.wrap_y.gl()),
            ];
            for (name, value) in params {
                gl.tex_parameter_i32(glow::TEXTURE_2D, name, value as i32);
            }
            gl.tex_parameter_f32_slice(
                glow::TEXTURE_2D,
                glow::TEXTURE_BORDER_COLOR,
                &options.border_color.to_array(),
            );
        }

        Ok(Self {
            handle,
            width,
            height,
        })
    }

    pub fn raw(&self) -> glow::Texture {
        self.handle.get()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// `glTexImage2D` reads `width * height` pixels from the slice, whatever its length.
fn assert_pixels_fit(len: usize, width: i32, height: i32, format: PixelFormat, ty: PixelType) {
    assert!(
        width >= 0 && height >= 0,
        "Texture size can't be negative, got {width}x{height}."
    );
    let needed = width as usize * height as usize * bytes_per_pixel(format, ty);
    assert!(
        len >= needed,
        "A {width}x{height} texture needs {needed} bytes of pixels, but only {len} were given."
    );
}

/// Rows are read tightly packed.
fn upload_pixels(
    gl: &glow::Context,
    pixels: &[u8],
    width: i32,
    height: i32,
    ty: PixelType,
    format: PixelFormat,
    texture_format: InternalFormat,
) {
    unsafe {
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            texture_format.gl() as i32,
            width,
            height,
            0,
            format.gl(),
            ty.gl(),
            glow::PixelUnpackData::Slice(Some(pixels)),
        );
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── options ─────────────────────────────────────────────────────────────

    #[test]
    fn default_options_are_linear_and_clamped() {
        let options = TextureOptions::default();
        assert_eq!(options.minification_filter, Filter::Linear);
        assert_eq!(options.magnification_filter, Filter::Linear);
        assert_eq!(options.wrap_x, Wrap::ClampToEdge);
        assert_eq!(options.wrap_y, Wrap::ClampToEdge);
        assert_eq!(options.border_color, Vec4::ZERO);
    }

    // ── pixel uploads ───────────────────────────────────────────────────────

    #[test]
    fn exact_pixel_buffer_fits() {
        assert_pixels_fit(2 * 3 * 4, 2, 3, PixelFormat::RGBA, PixelType::UnsignedByte);
        assert_pixels_fit(5 * 5 * 3, 5, 5, PixelFormat::RGB, PixelType::UnsignedByte);
        assert_pixels_fit(0, 0, 0, PixelFormat::RGBA, PixelType::Float);
    }

    #[test]
    #[should_panic(expected = "needs 40000 bytes of pixels, but only 4 were given")]
    fn short_pixel_buffer_is_rejected() {
        let pixels = [0u8; 4];
        match TextureSource::rgba8(&pixels, 100, 100) {
            TextureSource::Pixels {
                pixels,
                width,
                height,
                source_pixels_type,
                source_pixels_format,
                ..
            } => assert_pixels_fit(
                pixels.len(),
                width,
                height,
                source_pixels_format,
                source_pixels_type,
            ),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "can't be negative")]
    fn negative_size_is_rejected() {
        assert_pixels_fit(1024, -1, 4, PixelFormat::R, PixelType::UnsignedByte);
    }

    #[test]
    fn float_pixels_count_four_bytes_per_component() {
        assert_pixels_fit(4 * 4 * 2 * 4, 4, 4, PixelFormat::RG, PixelType::Float);
    }

    // ── sources ─────────────────────────────────────────────────────────────

    #[test]
    fn file_source_flips_by_default() {
        match TextureSource::file("res/logo.png") {
            TextureSource::File {
                flip_y,
                texture_format,
                ..
            } => {
                assert!(flip_y);
                assert_eq!(texture_format, InternalFormat::RGBA);
            }
            other => panic!("unexpected source {other:?}"),
        }
    }
}
