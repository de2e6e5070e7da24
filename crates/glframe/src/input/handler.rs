use std::cell::RefCell;
use std::rc::Rc;

use super::types::{
    Event, FramebufferResizedEvent, MouseMoveEvent, MousePressedEvent, MouseReleasedEvent,
    ScrollEvent, WindowResizedEvent,
};

/// Receives window events. Every method defaults to doing nothing.
pub trait EventsHandler {
    fn on_mouse_moved(&mut self, _e: &MouseMoveEvent) {}
    fn on_mouse_pressed(&mut self, _e: &MousePressedEvent) {}
    fn on_mouse_released(&mut self, _e: &MouseReleasedEvent) {}
    fn on_scroll(&mut self, _e: &ScrollEvent) {}
    fn on_framebuffer_resized(&mut self, _e: &FramebufferResizedEvent) {}
    fn on_window_resized(&mut self, _e: &WindowResizedEvent) {}

    /// Routes `event` to the matching method.
    fn handle(&mut self, event: &Event) {
        match event {
            Event::MouseMoved(e) => self.on_mouse_moved(e),
            Event::MousePressed(e) => self.on_mouse_pressed(e),
            Event::MouseReleased(e) => self.on_mouse_released(e),
            Event::Scroll(e) => self.on_scroll(e),
            Event::FramebufferResized(e) => self.on_framebuffer_resized(e),
            Event::WindowResized(e) => self.on_window_resized(e),
        }
    }
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// A handler made of closures, one per event kind.
///
/// ```rust,ignore
/// let callbacks = EventsCallbacks {
///     on_scroll: Box::new(|e: &ScrollEvent| log::info!("scrolled {}", e.scroll)),
///     ..Default::default()
/// };
/// ```
pub struct EventsCallbacks {
    pub on_mouse_moved: Callback<MouseMoveEvent>,
    pub on_mouse_pressed: Callback<MousePressedEvent>,
    pub on_mouse_released: Callback<MouseReleasedEvent>,
    pub on_scroll: Callback<ScrollEvent>,
    pub on_framebuffer_resized: Callback<FramebufferResizedEvent>,
    pub on_window_resized: Callback<WindowResizedEvent>,
}

impl Default for EventsCallbacks {
    fn default() -> Self {
        Self {
            on_mouse_moved: Box::new(|_: &MouseMoveEvent| {}),
            on_mouse_pressed: Box::new(|_: &MousePressedEvent| {}),
            on_mouse_released: Box::new(|_: &MouseReleasedEvent| {}),
            on_scroll: Box::new(|_: &ScrollEvent| {}),
            on_framebuffer_resized: Box::new(|_: &FramebufferResizedEvent| {}),
            on_window_resized: Box::new(|_: &WindowResizedEvent| {}),
        }
    }
}

impl EventsHandler for EventsCallbacks {
    fn on_mouse_moved(&mut self, e: &MouseMoveEvent) {
        (self.on_mouse_moved)(e)
    }
    fn on_mouse_pressed(&mut self, e: &MousePressedEvent) {
        (self.on_mouse_pressed)(e)
    }
    fn on_mouse_released(&mut self, e: &MouseReleasedEvent) {
        (self.on_mouse_released)(e)
    }
    fn on_scroll(&mut self, e: &ScrollEvent) {
        (self.on_scroll)(e)
    }
    fn on_framebuffer_resized(&mut self, e: &FramebufferResizedEvent) {
        (self.on_framebuffer_resized)(e)
    }
    fn on_window_resized(&mut self, e: &WindowResizedEvent) {
        (self.on_window_resized)(e)
    }
}

/// Forwards every method, `handle` included, to the wrapped handler.
macro_rules! forward_handler {
    ($target:ident => $inner:expr) => {
        fn on_mouse_moved(&mut self, e: &MouseMoveEvent) {
            let $target = self;
            $inner.on_mouse_moved(e)
        }
        fn on_mouse_pressed(&mut self, e: &MousePressedEvent) {
            let $target = self;
            $inner.on_mouse_pressed(e)
        }
        fn on_mouse_released(&mut self, e: &MouseReleasedEvent) {
            let $target = self;
            $inner.on_mouse_released(e)
        }
        fn on_scroll(&mut self, e: &ScrollEvent) {
            let $target = self;
            $inner.on_scroll(e)
        }
        fn on_framebuffer_resized(&mut self, e: &FramebufferResizedEvent) {
            let $target = self;
            $inner.on_framebuffer_resized(e)
        }
        fn on_window_resized(&mut self, e: &WindowResizedEvent) {
            let $target = self;
            $inner.on_window_resized(e)
        }
        fn handle(&mut self, event: &Event) {
            let $target = self;
            $inner.handle(event)
        }
    };
}

/// Lets a shared handler (e.g. a camera the render loop also reads) be
/// registered directly.
impl<H: EventsHandler + ?Sized> EventsHandler for Rc<RefCell<H>> {
    forward_handler!(shared => shared.borrow_mut());
}

impl<H: EventsHandler + ?Sized> EventsHandler for Box<H> {
    forward_handler!(boxed => (**boxed));
}

/// Ordered list of registered handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Box<dyn EventsHandler>>,
}

impl EventDispatcher {
    /// Replaces every registered handler. Order is dispatch order.
    pub fn replace(&mut self, handlers: Vec<Box<dyn EventsHandler>>) {
        self.handlers = handlers;
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers `event` to every handler, in registration order.
    pub fn dispatch(&mut self, event: &Event) {
        for handler in &mut self.handlers {
            handler.handle(event);
        }
    }
}
