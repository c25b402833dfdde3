use egui::{Context, Pos2, Rect};

/// Pointer phase delivered to the canvas, in canvas-relative pixels.
///
/// Mouse and touch arrive through the same egui pointer, so both map onto
/// these four phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    Press(Pos2),
    Move(Pos2),
    Release,
    /// Pointer left the canvas while pressed
    Leave,
}

/// One frame of raw pointer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Primary button (or touch) held down
    pub down: bool,
    /// Pointer position in screen coordinates, if known
    pub position: Option<Pos2>,
}

/// Converts per-frame pointer samples into `CanvasInput` events
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    was_down: bool,
    /// True while a press that started on the canvas is being tracked
    tracking: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            was_down: false,
            tracking: false,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Reads the primary pointer from egui and converts it
    pub fn process_input(&mut self, ctx: &Context) -> Vec<CanvasInput> {
        let sample = ctx.input(|input| PointerSample {
            down: input.pointer.primary_down(),
            position: input.pointer.interact_pos(),
        });
        self.process_sample(sample)
    }

    pub fn process_sample(&mut self, sample: PointerSample) -> Vec<CanvasInput> {
        let mut events = Vec::new();
        let inside = sample
            .position
            .is_some_and(|pos| self.canvas_rect.contains(pos));

        if sample.down && !self.was_down {
            if let (true, Some(pos)) = (inside, sample.position) {
                events.push(CanvasInput::Press(self.to_canvas(pos)));
                self.tracking = true;
            }
        } else if sample.down && self.tracking {
            match sample.position {
                Some(pos) if inside => {
                    if Some(pos) != self.last_pointer_pos {
                        events.push(CanvasInput::Move(self.to_canvas(pos)));
                    }
                }
                _ => {
                    events.push(CanvasInput::Leave);
                    self.tracking = false;
                }
            }
        } else if !sample.down && self.tracking {
            if let (true, Some(pos)) = (inside, sample.position) {
                if Some(pos) != self.last_pointer_pos {
                    events.push(CanvasInput::Move(self.to_canvas(pos)));
                }
            }
            events.push(CanvasInput::Release);
            self.tracking = false;
        }

        self.was_down = sample.down;
        self.last_pointer_pos = sample.position;
        events
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_max(pos2(100.0, 50.0), pos2(300.0, 250.0)))
    }

    fn sample(down: bool, x: f32, y: f32) -> PointerSample {
        PointerSample {
            down,
            position: Some(pos2(x, y)),
        }
    }

    #[test]
    fn test_press_move_release_are_canvas_relative() {
        let mut input = handler();
        assert!(input.process_sample(sample(false, 110.0, 60.0)).is_empty());
        assert_eq!(
            input.process_sample(sample(true, 110.0, 60.0)),
            vec![CanvasInput::Press(pos2(10.0, 10.0))]
        );
        assert_eq!(
            input.process_sample(sample(true, 120.0, 70.0)),
            vec![CanvasInput::Move(pos2(20.0, 20.0))]
        );
        assert!(input.process_sample(sample(true, 120.0, 70.0)).is_empty());
        assert_eq!(
            input.process_sample(sample(false, 120.0, 70.0)),
            vec![CanvasInput::Release]
        );
    }

    #[test]
    fn test_leaving_canvas_ends_tracking() {
        let mut input = handler();
        input.process_sample(sample(true, 150.0, 100.0));
        assert_eq!(
            input.process_sample(sample(true, 10.0, 10.0)),
            vec![CanvasInput::Leave]
        );
        assert!(!input.is_tracking());
        // Re-entering with the button still held does not resume the stroke
        assert!(input.process_sample(sample(true, 150.0, 100.0)).is_empty());
        assert!(input.process_sample(sample(false, 150.0, 100.0)).is_empty());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = handler();
        assert!(input.process_sample(sample(true, 10.0, 10.0)).is_empty());
        assert!(input.process_sample(sample(true, 150.0, 100.0)).is_empty());
    }
}
