use egui::Pos2;

/// Where a pointer gesture currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pressed, no movement yet
    Pressing,
    Dragging,
}

/// Transient pointer state for one press-to-release cycle.
///
/// `last_position` outlives the gesture; the ruler draws from it on the
/// next press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    phase: GesturePhase,
    last_position: Pos2,
    moving_image: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
            last_position: Pos2::ZERO,
            moving_image: false,
        }
    }
}

impl PointerState {
    pub fn is_drawing(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn last_position(&self) -> Pos2 {
        self.last_position
    }

    pub fn is_moving_image(&self) -> bool {
        self.moving_image
    }

    /// Starts a gesture at `pos` and returns the previous anchor.
    pub fn press(&mut self, pos: Pos2) -> Pos2 {
        self.phase = GesturePhase::Pressing;
        std::mem::replace(&mut self.last_position, pos)
    }

    pub fn begin_image_move(&mut self) {
        self.moving_image = true;
    }

    /// Records a drag step and returns where the previous step ended.
    pub fn drag_to(&mut self, pos: Pos2) -> Pos2 {
        self.phase = GesturePhase::Dragging;
        std::mem::replace(&mut self.last_position, pos)
    }

    pub fn release(&mut self) {
        self.phase = GesturePhase::Idle;
        self.moving_image = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_gesture_lifecycle() {
        let mut state = PointerState::default();
        assert!(!state.is_drawing());

        assert_eq!(state.press(pos2(3.0, 4.0)), Pos2::ZERO);
        assert_eq!(state.phase(), GesturePhase::Pressing);
        assert!(state.is_drawing());

        assert_eq!(state.drag_to(pos2(5.0, 6.0)), pos2(3.0, 4.0));
        assert_eq!(state.phase(), GesturePhase::Dragging);

        state.begin_image_move();
        state.release();
        assert!(!state.is_drawing());
        assert!(!state.is_moving_image());
        // The anchor survives the release
        assert_eq!(state.last_position(), pos2(5.0, 6.0));
    }
}
