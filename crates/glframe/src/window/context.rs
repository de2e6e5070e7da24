use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use glow::HasContext;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::device::{self, create_gl, Gpu, GpuInit, WindowGl};
use crate::error::{handle_error, Error, Result};
use crate::input::platform::winit::translate_window_event;
use crate::input::{Event, EventDispatcher, EventsHandler, InputState};
use crate::render::{default_shader_descriptor, Shader};
use crate::time::FrameClock;

use super::config::WindowConfig;

/// Set while a [`Context`] exists. The platform allows a single event loop.
static CONTEXT_ALIVE: AtomicBool = AtomicBool::new(false);

/// Claims the single-context slot; releases it on drop.
struct Registration;

impl Registration {
    fn claim() -> Result<Self> {
        if CONTEXT_ALIVE.swap(true, Ordering::SeqCst) {
            return Err(handle_error(Error::AlreadyInitialized));
        }
        Ok(Self)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        CONTEXT_ALIVE.store(false, Ordering::SeqCst);
    }
}

/// Creates the window and GL context from inside the event loop.
struct Bootstrap<'a> {
    window: &'a WindowConfig,
    gpu: &'a GpuInit,
    result: Option<Result<(Window, WindowGl, glow::Context)>>,
}

impl Bootstrap<'_> {
    fn create(&self, event_loop: &ActiveEventLoop) -> Result<(Window, WindowGl, glow::Context)> {
        let attrs = Window::default_attributes()
            .with_title(self.window.title.clone())
            .with_inner_size(self.window.initial_size)
            .with_maximized(self.window.maximized);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| handle_error(Error::Window(format!("failed to create the window: {e}"))))?;
        let (surface, gl) = create_gl(&window, self.gpu)?;
        Ok((window, surface, gl))
    }
}

impl ApplicationHandler for Bootstrap<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.result.is_none() {
            self.result = Some(self.create(event_loop));
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Collects translated events between two frames.
#[derive(Default)]
struct EventPump {
    input: InputState,
    scale_factor: f64,
    pending: Vec<Event>,
    close_requested: bool,
}

impl ApplicationHandler for EventPump {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
            }
            _ => {}
        }
        translate_window_event(self.scale_factor, &mut self.input, &event, &mut self.pending);
    }
}

/// The window, its OpenGL context and the event/frame loop state.
///
/// Only one may exist at a time. Every GPU resource should be dropped before
/// the context; later releases are skipped.
///
/// ```rust,ignore
/// let mut ctx = Context::init("demo")?;
/// while ctx.window_is_open() {
///     unsafe { ctx.gpu().clear(glow::COLOR_BUFFER_BIT) };
///     // draw
/// }
/// ```
pub struct Context {
    // Field order is drop order: GL objects, then the context, then the
    // window it renders to, then the event loop.
    default_shader: Option<Shader>,
    dispatcher: EventDispatcher,
    gpu: Rc<Gpu>,
    surface: WindowGl,
    window: Window,
    events: EventPump,
    event_loop: EventLoop<()>,
    clock: FrameClock,
    _registration: Registration,
}

impl Context {
    /// Opens a 1280x720 window titled `title` with the default GL settings.
    pub fn init(title: &str) -> Result<Self> {
        Self::with_config(WindowConfig::with_title(title), GpuInit::default())
    }

    pub fn with_config(window_config: WindowConfig, gpu_init: GpuInit) -> Result<Self> {
        let registration = Registration::claim()?;

        let mut event_loop = EventLoop::new()
            .map_err(|e| handle_error(Error::Window(format!("failed to create the event loop: {e}"))))?;

        let mut bootstrap = Bootstrap {
            window: &window_config,
            gpu: &gpu_init,
            result: None,
        };
        let (window, surface, mut gl) = loop {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut bootstrap)
            {
                return Err(handle_error(Error::Window(format!(
                    "event loop exited with code {code} before the window was created"
                ))));
            }
            if let Some(result) = bootstrap.result.take() {
                break result?;
            }
        };

        if gpu_init.debug_context {
            device::install_debug_output(&mut gl);
        }
        let gpu = Rc::new(Gpu::new(gl));
        gpu.log_driver_info();

        let size = window.inner_size();
        unsafe { gpu.viewport(0, 0, size.width as i32, size.height as i32) };

        log::info!(
            "window \"{}\" created ({}x{} px, scale {})",
            window_config.title,
            size.width,
            size.height,
            window.scale_factor()
        );

        Ok(Self {
            default_shader: None,
            dispatcher: EventDispatcher::default(),
            gpu,
            surface,
            events: EventPump {
                scale_factor: window.scale_factor(),
                ..EventPump::default()
            },
            window,
            event_loop,
            clock: FrameClock::new(),
            _registration: registration,
        })
    }

    /// Advances frame timing, presents the previous frame and handles pending
    /// window events. Meant as the condition of the render loop.
    #[must_use = "use as the condition of the render loop: `while ctx.window_is_open() { ... }`"]
    pub fn window_is_open(&mut self) -> bool {
        self.clock.tick();
        self.surface.swap_buffers();

        if let PumpStatus::Exit(code) =
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.events)
        {
            log::debug!("event loop exited with code {code}");
            self.events.close_requested = true;
        }

        for event in std::mem::take(&mut self.events.pending) {
            if let Event::FramebufferResized(e) = &event {
                self.surface.resize(PhysicalSize::new(
                    e.width_in_pixels.max(0) as u32,
                    e.height_in_pixels.max(0) as u32,
                ));
                unsafe { self.gpu.viewport(0, 0, e.width_in_pixels, e.height_in_pixels) };
            }
            self.dispatcher.dispatch(&event);
        }

        !self.events.close_requested
    }

    /// Replaces every registered handler. Handlers run in the given order.
    pub fn set_events_callbacks<H>(&mut self, handlers: impl IntoIterator<Item = H>)
    where
        H: EventsHandler + 'static,
    {
        self.dispatcher.replace(
            handlers
                .into_iter()
                .map(|h| Box::new(h) as Box<dyn EventsHandler>)
                .collect(),
        );
        log::debug!("{} event handler(s) registered", self.dispatcher.len());
    }

    pub fn maximize_window(&self) {
        self.window.set_maximized(true);
    }

    pub fn framebuffer_width_in_pixels(&self) -> i32 {
        self.window.inner_size().width as i32
    }

    pub fn framebuffer_height_in_pixels(&self) -> i32 {
        self.window.inner_size().height as i32
    }

    pub fn framebuffer_aspect_ratio(&self) -> f32 {
        let size = self.window.inner_size();
        size.width as f32 / size.height as f32
    }

    pub fn window_width_in_screen_coordinates(&self) -> i32 {
        self.logical_size().width.round() as i32
    }

    pub fn window_height_in_screen_coordinates(&self) -> i32 {
        self.logical_size().height.round() as i32
    }

    pub fn window_aspect_ratio(&self) -> f32 {
        let size = self.logical_size();
        (size.width / size.height) as f32
    }

    /// Seconds since the context was created.
    pub fn time_in_seconds(&self) -> f32 {
        self.clock.elapsed_seconds()
    }

    /// Seconds between the two last `window_is_open` calls, 0 on the first frame.
    pub fn delta_time_in_seconds(&self) -> f32 {
        self.clock.delta_seconds()
    }

    /// Binds a shader drawing location-0 positions in plain white.
    pub fn bind_default_shader(&mut self) -> Result<()> {
        let shader = match &mut self.default_shader {
            Some(shader) => shader,
            slot => slot.insert(Shader::new(&self.gpu, &default_shader_descriptor())?),
        };
        shader.bind();
        Ok(())
    }

    /// Shared GL handle. Derefs to [`glow::Context`] for raw calls.
    pub fn gpu(&self) -> &Rc<Gpu> {
        &self.gpu
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn logical_size(&self) -> winit::dpi::LogicalSize<f64> {
        self.window.inner_size().to_logical(self.window.scale_factor())
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.default_shader = None;
        self.dispatcher.replace(Vec::new());

        let leaked = Rc::strong_count(&self.gpu) - 1;
        if leaked > 0 {
            log::warn!("{leaked} GPU resource(s) outlive the context; their release is skipped");
        }
        self.gpu.mark_lost();
        log::debug!("context destroyed");
    }
}
