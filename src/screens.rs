/// Horizontal distance a drag must cover to switch screens
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Which screen of a fixed strip is showing, with swipe navigation
#[derive(Debug, Clone)]
pub struct ScreenCarousel {
    count: usize,
    index: usize,
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f32,
    dx: f32,
}

impl ScreenCarousel {
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            index: 0,
            drag: None,
        }
    }

    pub fn press(&mut self, x: f32) {
        self.drag = Some(Drag { start_x: x, dx: 0.0 });
    }

    pub fn drag(&mut self, x: f32) {
        if let Some(drag) = &mut self.drag {
            drag.dx = x - drag.start_x;
        }
    }

    /// Ends a swipe. Left swipes advance, right swipes go back. Returns
    /// true if the screen changed.
    pub fn release(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let before = self.index;
        if drag.dx < -SWIPE_THRESHOLD && self.index + 1 < self.count {
            self.index += 1;
        } else if drag.dx > SWIPE_THRESHOLD && self.index > 0 {
            self.index -= 1;
        }
        before != self.index
    }

    /// Jumps to `index`; out-of-range values are ignored
    pub fn set_index(&mut self, index: usize) {
        if index < self.count {
            self.index = index;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Live horizontal drag offset in pixels, zero when not dragging
    pub fn offset(&self) -> f32 {
        self.drag.map_or(0.0, |drag| drag.dx)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
