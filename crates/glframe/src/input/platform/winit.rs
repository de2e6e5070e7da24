use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersState;

use crate::input::{
    Event, FramebufferResizedEvent, InputState, Modifiers, MouseButton, MouseMoveEvent,
    MousePressedEvent, MouseReleasedEvent, ScrollEvent, WindowResizedEvent,
};

/// Logical pixels counted as one wheel line for touchpads and precise wheels.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Translates a winit `WindowEvent` into framework events, appended to `out`.
///
/// `state` is updated with the pointer position and modifiers so that button
/// events can report them. Events with no counterpart are dropped.
pub fn translate_window_event(
    scale_factor: f64,
    state: &mut InputState,
    event: &WindowEvent,
    out: &mut Vec<Event>,
) {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            state.modifiers = map_modifiers(m.state());
        }

        WindowEvent::CursorLeft { .. } => {
            state.pointer_pos = None;
        }

        WindowEvent::CursorMoved { position, .. } => {
            let position = to_logical(scale_factor, *position);
            state.pointer_pos = Some(position);
            out.push(Event::MouseMoved(MouseMoveEvent { position }));
        }

        WindowEvent::MouseInput {
            state: st, button, ..
        } => {
            let position = state.pointer_position();
            let button = map_mouse_button(*button);
            let modifiers = state.modifiers;

            out.push(match st {
                ElementState::Pressed => Event::MousePressed(MousePressedEvent {
                    position,
                    button,
                    modifiers,
                }),
                ElementState::Released => Event::MouseReleased(MouseReleasedEvent {
                    position,
                    button,
                    modifiers,
                }),
            });
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    let p = to_logical(scale_factor, *p);
                    (p.x / PIXELS_PER_SCROLL_LINE, p.y / PIXELS_PER_SCROLL_LINE)
                }
            };
            out.push(Event::Scroll(ScrollEvent {
                scroll: y,
                horizontal_scroll: x,
            }));
        }

        WindowEvent::Resized(size) => {
            let logical = size.to_logical::<f64>(scale_factor);
            out.push(Event::FramebufferResized(FramebufferResizedEvent {
                width_in_pixels: size.width as i32,
                height_in_pixels: size.height as i32,
            }));
            out.push(Event::WindowResized(WindowResizedEvent {
                width_in_screen_coordinates: logical.width.round() as i32,
                height_in_screen_coordinates: logical.height.round() as i32,
            }));
        }

        _ => {}
    }
}

fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(scale_factor);
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
