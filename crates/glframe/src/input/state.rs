use glam::Vec2;

use super::types::Modifiers;

/// Pointer and modifier tracking for the window.
///
/// winit reports neither the cursor position nor the modifiers along with a
/// button press, so both are remembered from the events that carry them.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Pointer position in screen coordinates. `None` while outside the window.
    pub pointer_pos: Option<Vec2>,
}

impl InputState {
    /// Last known pointer position, origin if none was seen yet.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_pos.unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_defaults_to_origin() {
        let mut state = InputState::default();
        assert_eq!(state.pointer_position(), Vec2::ZERO);

        state.pointer_pos = Some(Vec2::new(3.0, 4.0));
        assert_eq!(state.pointer_position(), Vec2::new(3.0, 4.0));
    }
}
