//! Orbit / pan / zoom camera driven by mouse events.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};

use crate::input::{
    EventsCallbacks, EventsHandler, MouseButton, MouseMoveEvent, MousePressedEvent,
    MouseReleasedEvent, ScrollEvent,
};

/// Radians (or world units when panning) per pixel of pointer motion.
const DRAG_SPEED: f32 = 0.003;

/// Distance to the looked-at point is multiplied by this per scroll line.
const ZOOM_FACTOR: f32 = 0.93;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CameraState {
    Idle,
    Rotating,
    Translating,
}

/// A camera transform (camera space → world space) plus a point it orbits.
///
/// World up is +Z.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Mat4,
    looked_at: Vec3,

    state: CameraState,
    current_button: Option<MouseButton>,
    previous_mouse_pos: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(5.0, 1.0, 2.0) * 0.2, Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self {
            transform: Mat4::look_at_rh(position, look_at, Vec3::Z).inverse(),
            looked_at: look_at,
            state: CameraState::Idle,
            current_button: None,
            previous_mouse_pos: Vec2::ZERO,
        }
    }

    pub fn transform_matrix(&self) -> Mat4 {
        self.transform
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.transform.inverse()
    }

    pub fn set_transform_matrix(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.transform = view.inverse();
    }

    pub fn right_axis(&self) -> Vec3 {
        self.transform.x_axis.truncate().normalize()
    }

    pub fn up_axis(&self) -> Vec3 {
        self.transform.y_axis.truncate().normalize()
    }

    pub fn front_axis(&self) -> Vec3 {
        -self.transform.z_axis.truncate().normalize()
    }

    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn looked_at(&self) -> Vec3 {
        self.looked_at
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Translation expressed in world space.
    pub fn translate(&mut self, delta: Vec3, also_translate_looked_at_point: bool) {
        self.transform = Mat4::from_translation(delta) * self.transform;
        if also_translate_looked_at_point {
            self.looked_at += delta;
        }
    }

    /// Rotation about a world-space axis through the origin.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.transform = Mat4::from_axis_angle(axis.normalize(), angle) * self.transform;
    }

    /// Rotation about a world-space axis through `center`.
    pub fn rotate_around(&mut self, center: Vec3, angle: f32, axis: Vec3) {
        self.translate(-center, false);
        self.rotate(angle, axis);
        self.translate(center, false);
    }

    /// Closure bundle forwarding to a shared camera.
    pub fn events_callbacks(camera: &Rc<RefCell<Camera>>) -> EventsCallbacks {
        let (moved, pressed, released, scrolled) =
            (camera.clone(), camera.clone(), camera.clone(), camera.clone());
        EventsCallbacks {
            on_mouse_moved: Box::new(move |e: &MouseMoveEvent| {
                moved.borrow_mut().on_mouse_moved(e)
            }),
            on_mouse_pressed: Box::new(move |e: &MousePressedEvent| {
                pressed.borrow_mut().on_mouse_pressed(e)
            }),
            on_mouse_released: Box::new(move |e: &MouseReleasedEvent| {
                released.borrow_mut().on_mouse_released(e)
            }),
            on_scroll: Box::new(move |e: &ScrollEvent| scrolled.borrow_mut().on_scroll(e)),
            ..Default::default()
        }
    }
}

impl EventsHandler for Camera {
    fn on_mouse_moved(&mut self, e: &MouseMoveEvent) {
        let delta = self.previous_mouse_pos - e.position;
        self.previous_mouse_pos = e.position;

        match self.state {
            CameraState::Rotating => {
                let yaw = delta.x * DRAG_SPEED * sign(self.up_axis().z);
                self.rotate_around(self.looked_at, yaw, Vec3::Z);
                self.rotate_around(self.looked_at, delta.y * DRAG_SPEED, self.right_axis());
            }
            CameraState::Translating => {
                let pan = (delta.x * self.right_axis() - delta.y * self.up_axis()) * DRAG_SPEED;
                self.translate(pan, true);
            }
            CameraState::Idle => {}
        }
    }

    fn on_mouse_pressed(&mut self, e: &MousePressedEvent) {
        if self.state != CameraState::Idle {
            return;
        }
        self.current_button = Some(e.button);
        self.previous_mouse_pos = e.position;
        self.state = if e.button == MouseButton::Left && !e.modifiers.shift {
            CameraState::Rotating
        } else {
            CameraState::Translating
        };
    }

    fn on_mouse_released(&mut self, e: &MouseReleasedEvent) {
        if self.current_button == Some(e.button) {
            self.state = CameraState::Idle;
            self.current_button = None;
        }
    }

    fn on_scroll(&mut self, e: &ScrollEvent) {
        if self.state != CameraState::Idle {
            return;
        }
        let prev_dir = self.position() - self.looked_at;
        let new_dir = prev_dir * ZOOM_FACTOR.powf(e.scroll);
        self.translate(new_dir - prev_dir, false);
    }
}

/// -1, 0 or 1. Unlike `f32::signum`, zero maps to zero.
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Event, Modifiers};

    const EPS: f32 = 1e-4;

    fn press(camera: &mut Camera, button: MouseButton, modifiers: Modifiers, at: Vec2) {
        camera.on_mouse_pressed(&MousePressedEvent {
            position: at,
            button,
            modifiers,
        });
    }

    fn release(camera: &mut Camera, button: MouseButton) {
        camera.on_mouse_released(&MouseReleasedEvent {
            position: Vec2::ZERO,
            button,
            modifiers: Modifiers::default(),
        });
    }

    fn scroll(camera: &mut Camera, amount: f32) {
        camera.on_scroll(&ScrollEvent {
            scroll: amount,
            horizontal_scroll: 0.0,
        });
    }

    // ── construction ────────────────────────────────────────────────────────

    #[test]
    fn default_camera_looks_at_origin() {
        let camera = Camera::default();
        assert!(camera.position().abs_diff_eq(Vec3::new(1.0, 0.2, 0.4), EPS));
        assert_eq!(camera.looked_at(), Vec3::ZERO);
        assert_eq!(camera.state(), CameraState::Idle);

        let to_target = (camera.looked_at() - camera.position()).normalize();
        assert!(camera.front_axis().abs_diff_eq(to_target, EPS));
    }

    #[test]
    fn view_matrix_is_inverse_of_transform() {
        let camera = Camera::new(Vec3::new(0.0, -3.0, 1.0), Vec3::ZERO);
        let identity = camera.view_matrix() * camera.transform_matrix();
        assert!(identity.abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn set_view_matrix_round_trips() {
        let mut camera = Camera::default();
        let view = Mat4::look_at_rh(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO, Vec3::Z);
        camera.set_view_matrix(view);
        assert!(camera.view_matrix().abs_diff_eq(view, EPS));
        assert!(camera.position().abs_diff_eq(Vec3::new(2.0, 2.0, 2.0), EPS));
    }

    // ── state machine ───────────────────────────────────────────────────────

    #[test]
    fn left_press_rotates_shift_or_other_buttons_translate() {
        let mut camera = Camera::default();
        press(&mut camera, MouseButton::Left, Modifiers::default(), Vec2::ZERO);
        assert_eq!(camera.state(), CameraState::Rotating);
        release(&mut camera, MouseButton::Left);
        assert_eq!(camera.state(), CameraState::Idle);

        press(&mut camera, MouseButton::Left, Modifiers::SHIFT, Vec2::ZERO);
        assert_eq!(camera.state(), CameraState::Translating);
        release(&mut camera, MouseButton::Left);

        press(&mut camera, MouseButton::Middle, Modifiers::default(), Vec2::ZERO);
        assert_eq!(camera.state(), CameraState::Translating);
    }

    #[test]
    fn press_while_busy_is_ignored() {
        let mut camera = Camera::default();
        press(&mut camera, MouseButton::Left, Modifiers::default(), Vec2::ZERO);
        press(&mut camera, MouseButton::Right, Modifiers::default(), Vec2::ZERO);
        assert_eq!(camera.state(), CameraState::Rotating);

        // The second press was not recorded, so releasing it does nothing.
        release(&mut camera, MouseButton::Right);
        assert_eq!(camera.state(), CameraState::Rotating);
        release(&mut camera, MouseButton::Left);
        assert_eq!(camera.state(), CameraState::Idle);
    }

    #[test]
    fn moving_while_idle_only_tracks_the_pointer() {
        let mut camera = Camera::default();
        let before = camera.transform_matrix();
        camera.on_mouse_moved(&MouseMoveEvent {
            position: Vec2::new(50.0, 10.0),
        });
        assert_eq!(camera.transform_matrix(), before);
    }

    #[test]
    fn rotating_orbits_the_looked_at_point() {
        let mut camera = Camera::default();
        let distance = camera.position().distance(camera.looked_at());

        press(&mut camera, MouseButton::Left, Modifiers::default(), Vec2::new(100.0, 100.0));
        camera.on_mouse_moved(&MouseMoveEvent {
            position: Vec2::new(160.0, 80.0),
        });

        assert!(!camera.position().abs_diff_eq(Vec3::new(1.0, 0.2, 0.4), EPS));
        assert!((camera.position().distance(camera.looked_at()) - distance).abs() < EPS);
        assert_eq!(camera.looked_at(), Vec3::ZERO);
    }

    #[test]
    fn translating_moves_the_looked_at_point_too() {
        let mut camera = Camera::default();
        let offset = camera.position() - camera.looked_at();

        press(&mut camera, MouseButton::Right, Modifiers::default(), Vec2::ZERO);
        camera.on_mouse_moved(&MouseMoveEvent {
            position: Vec2::new(-100.0, 0.0),
        });

        let expected = camera.right_axis() * 100.0 * DRAG_SPEED;
        assert!(camera.looked_at().abs_diff_eq(expected, EPS));
        assert!((camera.position() - camera.looked_at()).abs_diff_eq(offset, EPS));
    }

    // ── zoom ────────────────────────────────────────────────────────────────

    #[test]
    fn scroll_scales_distance_by_zoom_factor() {
        let mut camera = Camera::default();
        let before = camera.position();

        scroll(&mut camera, 1.0);
        assert!(camera.position().abs_diff_eq(before * 0.93, EPS));
        assert_eq!(camera.looked_at(), Vec3::ZERO);

        scroll(&mut camera, -1.0);
        assert!(camera.position().abs_diff_eq(before, EPS));
    }

    #[test]
    fn scroll_while_dragging_is_ignored() {
        let mut camera = Camera::default();
        press(&mut camera, MouseButton::Left, Modifiers::default(), Vec2::ZERO);
        let before = camera.position();
        scroll(&mut camera, 3.0);
        assert_eq!(camera.position(), before);
    }

    // ── sharing ─────────────────────────────────────────────────────────────

    #[test]
    fn callbacks_drive_a_shared_camera() {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let mut callbacks = Camera::events_callbacks(&camera);
        let before = camera.borrow().position();

        callbacks.handle(&Event::Scroll(ScrollEvent {
            scroll: 2.0,
            horizontal_scroll: 0.0,
        }));

        let expected = before * 0.93_f32.powf(2.0);
        assert!(camera.borrow().position().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn shared_camera_zooms_on_direct_scroll() {
        let mut camera = Rc::new(RefCell::new(Camera::default()));
        let before = camera.borrow().position();

        EventsHandler::on_scroll(
            &mut camera,
            &ScrollEvent {
                scroll: 1.0,
                horizontal_scroll: 0.0,
            },
        );
        assert!(camera.borrow().position().abs_diff_eq(before * 0.93, EPS));
    }

    #[test]
    fn boxed_camera_starts_rotating_on_direct_press() {
        let mut camera = Box::new(Camera::default());
        EventsHandler::on_mouse_pressed(
            &mut camera,
            &MousePressedEvent {
                position: Vec2::ZERO,
                button: MouseButton::Left,
                modifiers: Modifiers::default(),
            },
        );
        assert_eq!(camera.state(), CameraState::Rotating);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }
}
