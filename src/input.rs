use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer input for the drawing surface, in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    /// The pointer left the surface
    Leave,
}

/// Raw pointer readings for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub hover_pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
}

/// Handles converting raw egui input into [`PointerEvent`]s for the canvas
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    inside: bool,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            inside: false,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Read the primary button and pointer position from egui
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let sample = ctx.input(|input| PointerSample {
            hover_pos: input.pointer.hover_pos(),
            pressed: input.pointer.button_pressed(PointerButton::Primary),
            released: input.pointer.button_released(PointerButton::Primary),
        });
        self.process_sample(sample)
    }

    pub fn process_sample(&mut self, sample: PointerSample) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let now_inside = sample
            .hover_pos
            .is_some_and(|pos| self.canvas_rect.contains(pos));

        if let Some(pos) = sample.hover_pos.filter(|_| now_inside) {
            if sample.pressed {
                events.push(PointerEvent::Down(self.to_local(pos)));
            } else if self.inside && Some(pos) != self.last_pointer_pos {
                events.push(PointerEvent::Move(self.to_local(pos)));
            }
            if sample.released {
                events.push(PointerEvent::Up);
            }
        } else if self.inside {
            events.push(PointerEvent::Leave);
        }

        self.inside = now_inside;
        self.last_pointer_pos = sample.hover_pos;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(400.0, 300.0)))
    }

    fn at(x: f32, y: f32) -> PointerSample {
        PointerSample { hover_pos: Some(pos2(x, y)), ..Default::default() }
    }

    #[test]
    fn test_press_drag_release() {
        let mut input = handler();
        assert!(input.process_sample(at(110.0, 60.0)).is_empty());

        let events = input.process_sample(PointerSample { pressed: true, ..at(110.0, 60.0) });
        assert_eq!(events, vec![PointerEvent::Down(pos2(10.0, 10.0))]);

        let events = input.process_sample(at(110.0, 90.0));
        assert_eq!(events, vec![PointerEvent::Move(pos2(10.0, 40.0))]);

        // No movement, no event
        assert!(input.process_sample(at(110.0, 90.0)).is_empty());

        let events = input.process_sample(PointerSample { released: true, ..at(110.0, 90.0) });
        assert_eq!(events, vec![PointerEvent::Up]);
    }

    #[test]
    fn test_leaving_canvas_emits_leave_once() {
        let mut input = handler();
        input.process_sample(at(200.0, 200.0));
        assert_eq!(input.process_sample(at(20.0, 20.0)), vec![PointerEvent::Leave]);
        assert!(input.process_sample(at(10.0, 10.0)).is_empty());
        assert_eq!(
            input.process_sample(PointerSample::default()),
            Vec::<PointerEvent>::new()
        );
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = handler();
        let events = input.process_sample(PointerSample { pressed: true, ..at(5.0, 5.0) });
        assert!(events.is_empty());
    }

    #[test]
    fn test_pointer_gone_from_window_leaves() {
        let mut input = handler();
        input.process_sample(at(150.0, 150.0));
        assert_eq!(input.process_sample(PointerSample::default()), vec![PointerEvent::Leave]);
    }
}
