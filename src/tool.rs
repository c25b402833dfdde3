use egui::Color32;
use serde::{Deserialize, Serialize};

/// The eraser paints this many times wider than the selected stroke width
pub const ERASER_WIDTH_MULTIPLIER: u32 = 3;

/// Background colour of the board, also used by the eraser
pub const BACKGROUND: Color32 = Color32::WHITE;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
}

/// Colour, width and mode chosen in the toolbar.
///
/// The colour is remembered while the eraser is on so toggling it off
/// returns to the previous pen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    color: Color32,
    width: u32,
    mode: ToolMode,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 2,
            mode: ToolMode::Draw,
        }
    }
}

impl ToolState {
    pub fn new(color: Color32, width: u32) -> Self {
        Self {
            color,
            width: width.max(1),
            mode: ToolMode::Draw,
        }
    }

    /// Picks a pen colour. This always switches the eraser off.
    pub fn select_color(&mut self, color: Color32) {
        self.color = color;
        self.mode = ToolMode::Draw;
    }

    /// Widths below one pixel are clamped to one
    pub fn select_width(&mut self, width: u32) {
        self.width = width.max(1);
    }

    pub fn toggle_eraser(&mut self) {
        self.mode = match self.mode {
            ToolMode::Draw => ToolMode::Erase,
            ToolMode::Erase => ToolMode::Draw,
        };
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn eraser_active(&self) -> bool {
        self.mode == ToolMode::Erase
    }

    /// The style a stroke started now would be drawn with
    pub fn stroke_style(&self) -> StrokeStyle {
        match self.mode {
            ToolMode::Draw => StrokeStyle::Draw {
                color: self.color,
                width: self.width,
            },
            ToolMode::Erase => StrokeStyle::Erase { width: self.width },
        }
    }
}

/// Style frozen at the start of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Draw { color: Color32, width: u32 },
    /// Width is the selected pen width before the eraser multiplier
    Erase { width: u32 },
}

impl StrokeStyle {
    pub fn color(&self) -> Color32 {
        match self {
            Self::Draw { color, .. } => *color,
            Self::Erase { .. } => BACKGROUND,
        }
    }

    /// Line width in pixels as painted on the surface
    pub fn line_width(&self) -> f32 {
        match self {
            Self::Draw { width, .. } => *width as f32,
            Self::Erase { width } => width.saturating_mul(ERASER_WIDTH_MULTIPLIER) as f32,
        }
    }

    pub fn is_eraser(&self) -> bool {
        matches!(self, Self::Erase { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eraser_style_is_white_and_three_times_wider() {
        let mut tools = ToolState::new(Color32::RED, 4);
        tools.toggle_eraser();
        let style = tools.stroke_style();
        assert!(style.is_eraser());
        assert_eq!(style.color(), Color32::WHITE);
        assert_eq!(style.line_width(), 12.0);
    }

    #[test]
    fn test_select_color_turns_eraser_off() {
        let mut tools = ToolState::new(Color32::BLACK, 5);
        tools.toggle_eraser();
        assert!(tools.eraser_active());

        tools.select_color(Color32::BLUE);
        assert!(!tools.eraser_active());
        assert_eq!(
            tools.stroke_style(),
            StrokeStyle::Draw {
                color: Color32::BLUE,
                width: 5
            }
        );
    }

    #[test]
    fn test_toggle_eraser_off_restores_previous_color() {
        let mut tools = ToolState::new(Color32::GREEN, 2);
        tools.toggle_eraser();
        tools.toggle_eraser();
        assert_eq!(tools.stroke_style().color(), Color32::GREEN);
    }

    #[test]
    fn test_huge_eraser_width_saturates() {
        let style = StrokeStyle::Erase { width: u32::MAX };
        assert_eq!(style.line_width(), u32::MAX as f32);
    }

    #[test]
    fn test_width_is_at_least_one() {
        let mut tools = ToolState::default();
        tools.select_width(0);
        assert_eq!(tools.width(), 1);
    }
}
