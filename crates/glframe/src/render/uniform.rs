use std::cell::RefCell;
use std::collections::HashMap;

use glam::{Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
use glow::{HasContext, UniformLocation};

use crate::device::Gpu;

use super::texture::Texture;

/// A value that can be written to a shader uniform.
///
/// A `None` location means the program has no such uniform; the write is
/// skipped by the driver.
pub trait Uniform {
    fn apply(&self, gpu: &Gpu, location: Option<&UniformLocation>);
}

macro_rules! uniform_impl {
    ($ty:ty, |$gl:ident, $loc:ident, $v:ident| $body:expr) => {
        impl Uniform for $ty {
            fn apply(&self, gpu: &Gpu, $loc: Option<&UniformLocation>) {
                let $gl = gpu.gl();
                let $v = self;
                unsafe { $body }
            }
        }
    };
}

uniform_impl!(i32, |gl, loc, v| gl.uniform_1_i32(loc, *v));
uniform_impl!(u32, |gl, loc, v| gl.uniform_1_i32(loc, *v as i32));
uniform_impl!(bool, |gl, loc, v| gl.uniform_1_i32(loc, i32::from(*v)));
uniform_impl!(f32, |gl, loc, v| gl.uniform_1_f32(loc, *v));
uniform_impl!(Vec2, |gl, loc, v| gl.uniform_2_f32(loc, v.x, v.y));
uniform_impl!(Vec3, |gl, loc, v| gl.uniform_3_f32(loc, v.x, v.y, v.z));
uniform_impl!(Vec4, |gl, loc, v| gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w));
uniform_impl!(UVec2, |gl, loc, v| gl.uniform_2_u32(loc, v.x, v.y));
uniform_impl!(UVec3, |gl, loc, v| gl.uniform_3_u32(loc, v.x, v.y, v.z));
uniform_impl!(UVec4, |gl, loc, v| gl.uniform_4_u32(loc, v.x, v.y, v.z, v.w));
uniform_impl!(Mat2, |gl, loc, v| gl.uniform_matrix_2_f32_slice(
    loc,
    false,
    &v.to_cols_array()
));
uniform_impl!(Mat3, |gl, loc, v| gl.uniform_matrix_3_f32_slice(
    loc,
    false,
    &v.to_cols_array()
));
uniform_impl!(Mat4, |gl, loc, v| gl.uniform_matrix_4_f32_slice(
    loc,
    false,
    &v.to_cols_array()
));

/// Binds the texture on the next free unit and points the sampler at it.
///
/// Unit 0 is restored as the active unit afterwards, so incidental texture
/// work (uploads, resizes) never disturbs a sampler binding.
impl Uniform for &Texture {
    fn apply(&self, gpu: &Gpu, location: Option<&UniformLocation>) {
        let unit = gpu.next_texture_unit();
        let gl = gpu.gl();
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.raw()));
            gl.uniform_1_i32(location, unit as i32);
            gl.active_texture(glow::TEXTURE0);
        }
    }
}

/// Name → location memo. Misses are cached too.
#[derive(Debug)]
pub struct LocationCache<L> {
    entries: RefCell<HashMap<String, Option<L>>>,
}

impl<L> Default for LocationCache<L> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<L: Clone> LocationCache<L> {
    /// Returns the cached location for `name`, calling `resolve` only the
    /// first time this name is seen.
    pub fn get_or_resolve(&self, name: &str, resolve: impl FnOnce(&str) -> Option<L>) -> Option<L> {
        if let Some(hit) = self.entries.borrow().get(name) {
            return hit.clone();
        }
        let location = resolve(name);
        if location.is_none() {
            log::trace!("uniform `{name}` not found in program");
        }
        self.entries
            .borrow_mut()
            .insert(name.to_owned(), location.clone());
        location
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn resolves_each_name_once() {
        let cache = LocationCache::<i32>::default();
        let calls = Cell::new(0);
        let resolve = |name: &str| {
            calls.set(calls.get() + 1);
            (name == "u_color").then_some(3)
        };

        assert_eq!(cache.get_or_resolve("u_color", resolve), Some(3));
        assert_eq!(cache.get_or_resolve("u_color", resolve), Some(3));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn misses_are_remembered() {
        let cache = LocationCache::<i32>::default();
        let calls = Cell::new(0);
        let resolve = |_: &str| {
            calls.set(calls.get() + 1);
            None
        };

        assert_eq!(cache.get_or_resolve("u_typo", resolve), None);
        assert_eq!(cache.get_or_resolve("u_typo", resolve), None);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }
}
