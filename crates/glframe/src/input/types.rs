use glam::Vec2;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Modifier keys state.
///
/// Stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer moved. Position in screen coordinates, top-left origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMoveEvent {
    pub position: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MousePressedEvent {
    pub position: Vec2,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseReleasedEvent {
    pub position: Vec2,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

/// Wheel motion in lines. Positive `scroll` is away from the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f32,
    pub horizontal_scroll: f32,
}

/// The drawable changed size, in physical pixels.
///
/// This is what the viewport and render targets care about. On high-DPI
/// displays it differs from [`WindowResizedEvent`] by the scale factor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FramebufferResizedEvent {
    pub width_in_pixels: i32,
    pub height_in_pixels: i32,
}

/// The window changed size, in screen coordinates (logical pixels).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowResizedEvent {
    pub width_in_screen_coordinates: i32,
    pub height_in_screen_coordinates: i32,
}

/// Every event the context fans out to handlers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    MouseMoved(MouseMoveEvent),
    MousePressed(MousePressedEvent),
    MouseReleased(MouseReleasedEvent),
    Scroll(ScrollEvent),
    FramebufferResized(FramebufferResizedEvent),
    WindowResized(WindowResizedEvent),
}
