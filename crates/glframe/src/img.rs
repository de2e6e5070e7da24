//! Image decoding for textures.

use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::{handle_error, Error, Result};

/// Channel layout to force when decoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    pub const fn count(self) -> u32 {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Tightly packed 8-bit pixels, row-major, `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub data: Vec<u8>,
}

/// Decodes the image at `path`.
///
/// With `desired_channels == None` the file's own channel count is kept
/// (converted to 8 bits per channel). `flip_vertically` puts the first row of
/// the file last, which matches OpenGL's bottom-left texture origin.
pub fn load(
    path: impl AsRef<Path>,
    desired_channels: Option<Channels>,
    flip_vertically: bool,
) -> Result<Image> {
    let path = path.as_ref();
    let image_error = |source| {
        handle_error(Error::Image {
            path: path.to_path_buf(),
            source,
        })
    };

    let reader = ImageReader::open(path)
        .map_err(|source| handle_error(Error::Io { path: path.to_path_buf(), source }))?
        .with_guessed_format()
        .map_err(|source| handle_error(Error::Io { path: path.to_path_buf(), source }))?;
    let mut decoded = reader.decode().map_err(image_error)?;

    if flip_vertically {
        decoded = decoded.flipv();
    }

    let (width, height) = (decoded.width(), decoded.height());
    let (channels, data) = match desired_channels {
        Some(Channels::Rgb) => (3, decoded.into_rgb8().into_raw()),
        Some(Channels::Rgba) => (4, decoded.into_rgba8().into_raw()),
        None => native_channels(decoded),
    };

    Ok(Image {
        width,
        height,
        channels,
        data,
    })
}

fn native_channels(decoded: DynamicImage) -> (u32, Vec<u8>) {
    match decoded.color().channel_count() {
        1 => (1, decoded.into_luma8().into_raw()),
        2 => (2, decoded.into_luma_alpha8().into_raw()),
        3 => (3, decoded.into_rgb8().into_raw()),
        _ => (4, decoded.into_rgba8().into_raw()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_two_row_png(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn keeps_file_channel_count() {
        let path = write_two_row_png("glframe_img_native.png");
        let img = load(&path, None, false).unwrap();
        assert_eq!((img.width, img.height, img.channels), (1, 2, 3));
        assert_eq!(img.data, vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn forces_rgba_and_flips() {
        let path = write_two_row_png("glframe_img_rgba.png");
        let img = load(&path, Some(Channels::Rgba), true).unwrap();
        assert_eq!(img.channels, 4);
        assert_eq!(img.data, vec![0, 0, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load("/nonexistent/glframe/texture.png", None, true).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn garbage_file_is_an_image_error() {
        let path = std::env::temp_dir().join("glframe_img_garbage.png");
        std::fs::write(&path, b"not an image at all").unwrap();
        let err = load(&path, None, false).unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
    }
}
