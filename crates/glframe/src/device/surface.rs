use std::num::NonZeroU32;

use anyhow::{Context as _, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::{handle_error, Error};

use super::GpuInit;

/// Window surface plus the GL context current on it.
pub(crate) struct WindowGl {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
}

impl WindowGl {
    pub(crate) fn swap_buffers(&self) {
        if let Err(e) = self.surface.swap_buffers(&self.context) {
            log::warn!("failed to present frame: {e}");
        }
    }

    /// Resizes the drawable. Zero sizes (minimized window) are skipped.
    pub(crate) fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, w, h);
        }
    }
}

/// Creates the GL surface/context for `window` and loads the function table.
pub(crate) fn create_gl(
    window: &Window,
    init: &GpuInit,
) -> crate::Result<(WindowGl, glow::Context)> {
    let (display, surface) = create_surface(window, init)
        .map_err(|e| handle_error(Error::Context(format!("{e:#}"))))?;

    if display.get_proc_address(c"glGetString").is_null() {
        return Err(handle_error(Error::Loader));
    }

    let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };
    Ok((surface, gl))
}

fn create_surface(window: &Window, init: &GpuInit) -> Result<(Display, WindowGl)> {
    let raw_display = window
        .display_handle()
        .context("window has no display handle")?
        .as_raw();
    let raw_window = window
        .window_handle()
        .context("window has no window handle")?
        .as_raw();

    let display = unsafe { Display::new(raw_display, api_preference(raw_window)) }
        .context("failed to open the GL display")?;

    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(init.depth_bits)
        .with_stencil_size(init.stencil_bits)
        .with_transparency(false)
        .build();

    let config = unsafe { display.find_configs(template) }
        .context("failed to enumerate GL configs")?
        .next()
        .context("no suitable GL config")?;

    let size = window.inner_size();
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window,
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
    );
    let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
        .context("failed to create the window surface")?;

    let (major, minor) = init.gl_version;
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
        .with_profile(GlProfile::Core)
        .with_debug(init.debug_context)
        .build(Some(raw_window));
    let context = unsafe { display.create_context(&config, &context_attributes) }
        .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?
        .make_current(&surface)
        .context("failed to make the GL context current")?;

    let interval = if init.vsync {
        SwapInterval::Wait(NonZeroU32::MIN)
    } else {
        SwapInterval::DontWait
    };
    if let Err(e) = surface.set_swap_interval(&context, interval) {
        log::warn!("failed to set swap interval: {e}");
    }

    Ok((display, WindowGl { surface, context }))
}

#[cfg(target_os = "windows")]
fn api_preference(raw_window: RawWindowHandle) -> DisplayApiPreference {
    log::debug!("using WGL for the OpenGL context");
    DisplayApiPreference::Wgl(Some(raw_window))
}

#[cfg(target_os = "macos")]
fn api_preference(_raw_window: RawWindowHandle) -> DisplayApiPreference {
    log::debug!("using CGL for the OpenGL context");
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn api_preference(_raw_window: RawWindowHandle) -> DisplayApiPreference {
    log::debug!("using EGL for the OpenGL context");
    DisplayApiPreference::Egl
}
