use std::rc::Rc;

use glow::HasContext;

use crate::device::Gpu;

/// Something able to destroy a raw graphics object of type `T`.
pub trait Release<T> {
    fn release(&self, raw: T);
}

// Implemented on the concrete native types: the `glow::Texture`-style aliases
// are projections through `HasContext` and would overlap as impl targets.
macro_rules! release_with {
    ($raw:ty, $delete:ident) => {
        impl Release<$raw> for Gpu {
            fn release(&self, raw: $raw) {
                // Everything died with the context already.
                if self.is_alive() {
                    unsafe { self.gl().$delete(raw) }
                }
            }
        }
    };
}

release_with!(glow::NativeTexture, delete_texture);
release_with!(glow::NativeBuffer, delete_buffer);
release_with!(glow::NativeVertexArray, delete_vertex_array);
release_with!(glow::NativeProgram, delete_program);
release_with!(glow::NativeShader, delete_shader);
release_with!(glow::NativeFramebuffer, delete_framebuffer);

/// Exclusive owner of one raw graphics object.
///
/// Not `Clone`: moving the value moves ownership, and the moved-from binding
/// can no longer be used. Dropping releases the object exactly once.
/// Assigning over a live `Unique` drops (releases) the previous object first.
pub struct Unique<T: Copy, R: Release<T> = Gpu> {
    owner: Rc<R>,
    raw: Option<T>,
}

impl<T: Copy, R: Release<T>> Unique<T, R> {
    pub fn new(owner: Rc<R>, raw: T) -> Self {
        Self {
            owner,
            raw: Some(raw),
        }
    }

    /// The raw object. Only `None` after [`Unique::take`].
    pub fn raw(&self) -> Option<T> {
        self.raw
    }

    pub fn get(&self) -> T {
        match self.raw {
            Some(raw) => raw,
            None => unreachable!("graphics handle used after it was taken"),
        }
    }

    /// Gives up ownership without releasing. The wrapper's drop becomes a no-op.
    pub fn take(&mut self) -> Option<T> {
        self.raw.take()
    }

    pub fn owner(&self) -> &Rc<R> {
        &self.owner
    }
}

impl<T: Copy, R: Release<T>> Drop for Unique<T, R> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.owner.release(raw);
        }
    }
}

impl<T: Copy + std::fmt::Debug, R: Release<T>> std::fmt::Debug for Unique<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Unique").field(&self.raw).finish()
    }
}
