//! Headless canvas that records draw calls instead of painting them.

use super::canvas::{Canvas, Color};
use crate::error::{CanvasError, CanvasResult};
use glam::Vec2;

/// Average glyph advance as a fraction of font size.
pub const GLYPH_ADVANCE: f32 = 0.56;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        width: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Glow {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Bezier {
        from: Vec2,
        c1: Vec2,
        c2: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        font_size: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    size: Option<(f32, f32)>,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Some((width, height)),
            ..Default::default()
        }
    }

    /// A canvas whose drawing context cannot be obtained.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn set_size(&mut self, size: Option<(f32, f32)>) {
        self.size = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, position, font_size, .. } => {
                Some((text.as_str(), *position, *font_size))
            }
            _ => None,
        })
    }

    pub fn count<F: Fn(&DrawCommand) -> bool>(&self, pred: F) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> CanvasResult<(f32, f32)> {
        self.size.ok_or(CanvasError::Unavailable)
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        self.commands.push(DrawCommand::Glow {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn bezier(&mut self, from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Bezier {
            from,
            c1,
            c2,
            to,
            width,
            color,
        });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
            width,
            color,
        });
    }

    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * GLYPH_ADVANCE
    }

    fn fill_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
    }
}
