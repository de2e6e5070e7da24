//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The context translates platform events into [`Event`]s and fans them out
//! to every registered [`EventsHandler`].

mod handler;
mod state;
mod types;

pub(crate) mod platform {
    pub(crate) mod winit;
}

pub(crate) use handler::EventDispatcher;
pub use handler::{EventsCallbacks, EventsHandler};
pub use state::InputState;
pub use types::{
    Event,
    FramebufferResizedEvent,
    Modifiers,
    MouseButton,
    MouseMoveEvent,
    MousePressedEvent,
    MouseReleasedEvent,
    ScrollEvent,
    WindowResizedEvent,
};
