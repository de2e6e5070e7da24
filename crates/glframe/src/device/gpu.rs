use std::cell::{Cell, RefCell};
use std::ops::Deref;

use glow::HasContext;

use crate::render::TextureUnits;

/// Loaded OpenGL function table plus the little state the wrappers share.
///
/// Every resource keeps an `Rc<Gpu>` so it can release itself on drop. The
/// owning [`Context`](crate::window::Context) marks the `Gpu` as lost when it
/// tears the GL context down; releases after that point are skipped.
///
/// Derefs to [`glow::Context`] for raw calls (`clear`, `enable`, ...).
pub struct Gpu {
    gl: glow::Context,
    texture_units: RefCell<TextureUnits>,
    alive: Cell<bool>,
}

impl Gpu {
    pub(crate) fn new(gl: glow::Context) -> Self {
        let max_units = unsafe { gl.get_parameter_i32(glow::MAX_TEXTURE_IMAGE_UNITS) };
        log::debug!("{max_units} texture image units available");

        Self {
            gl,
            texture_units: RefCell::new(TextureUnits::new(max_units.max(0) as u32)),
            alive: Cell::new(true),
        }
    }

    /// Raw function table.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub(crate) fn mark_lost(&self) {
        self.alive.set(false);
    }

    /// Next texture unit for a sampler uniform. Never 0.
    pub(crate) fn next_texture_unit(&self) -> u32 {
        self.texture_units.borrow_mut().next_unit()
    }

    /// Logs vendor / renderer / version strings.
    pub(crate) fn log_driver_info(&self) {
        fn norm(value: String) -> String {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                "<unknown>".to_string()
            } else {
                trimmed.to_string()
            }
        }

        unsafe {
            let vendor = norm(self.gl.get_parameter_string(glow::VENDOR));
            let renderer = norm(self.gl.get_parameter_string(glow::RENDERER));
            let version = norm(self.gl.get_parameter_string(glow::VERSION));
            let glsl = norm(self.gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION));
            log::info!("OpenGL driver: {renderer} [{vendor}], {version}, GLSL {glsl}");
        }
    }
}

impl Deref for Gpu {
    type Target = glow::Context;

    fn deref(&self) -> &Self::Target {
        &self.gl
    }
}
