//! 2D draw commands
//!
//! A frame is an ordered list of these, replayed onto the canvas.

use glam::Vec2;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` value
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One primitive drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport
    Clear { color: &'static str, size: Vec2 },
    /// Axis-aligned rectangle from its top-left corner
    Rect {
        pos: Vec2,
        size: Vec2,
        color: &'static str,
        alpha: f32,
    },
    /// Filled triangle; `glow` is the shadow blur radius (0 for none)
    Triangle {
        points: [Vec2; 3],
        color: &'static str,
        glow: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: &'static str,
    },
    /// Single line of text, `pos` is the baseline anchor
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        align: TextAlign,
        color: &'static str,
    },
}

impl DrawCommand {
    pub fn text(
        text: impl Into<String>,
        pos: Vec2,
        font: &'static str,
        align: TextAlign,
        color: &'static str,
    ) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            font,
            align,
            color,
        }
    }
}
