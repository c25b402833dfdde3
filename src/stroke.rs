use egui::Pos2;

use crate::surface::RasterSurface;
use crate::tool::{StrokeStyle, ToolState};

/// Press-to-release drawing interaction.
///
/// `Idle -> Active -> Idle`. The style is frozen when the stroke begins so
/// toolbar changes never affect a stroke in progress.
#[derive(Debug, Default)]
pub struct StrokeSession {
    active: Option<ActiveStroke>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    anchor: Pos2,
    style: StrokeStyle,
    segments: usize,
}

/// Signal emitted once when an active stroke ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeEnded {
    pub style: StrokeStyle,
    /// Number of segments painted during the stroke
    pub segments: usize,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a stroke at `point`. Returns false if one is already active.
    pub fn begin(&mut self, point: Pos2, tools: &ToolState) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveStroke {
            anchor: point,
            style: tools.stroke_style(),
            segments: 0,
        });
        true
    }

    /// Paints a segment from the last point to `point`. Ignored while idle.
    pub fn extend<S: RasterSurface + ?Sized>(&mut self, point: Pos2, surface: &mut S) {
        let Some(stroke) = &mut self.active else {
            return;
        };
        surface.stroke_segment(stroke.anchor, point, &stroke.style);
        stroke.anchor = point;
        stroke.segments += 1;
    }

    /// Finishes the stroke. Only the first call after `begin` yields a signal.
    pub fn end(&mut self) -> Option<StrokeEnded> {
        self.active.take().map(|stroke| StrokeEnded {
            style: stroke.style,
            segments: stroke.segments,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Style of the stroke in progress
    pub fn style(&self) -> Option<StrokeStyle> {
        self.active.map(|stroke| stroke.style)
    }

    pub fn current_state_name(&self) -> &'static str {
        if self.is_active() { "Active" } else { "Idle" }
    }
}
