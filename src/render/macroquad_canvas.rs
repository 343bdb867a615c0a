//! Canvas backed by the macroquad window. Gradients and curves are
//! approximated with circles and line segments.

use super::canvas::{bezier_point, Canvas, Color};
use crate::constants::BACKGROUND_RGB;
use crate::error::CanvasResult;
use glam::Vec2;
use macroquad::prelude as mq;

const GLOW_RINGS: usize = 10;
const CURVE_SEGMENTS: usize = 24;

fn to_mq(color: Color) -> mq::Color {
    mq::Color::new(color.r, color.g, color.b, color.a)
}

/// Draws to the current macroquad frame. The window is cleared to the
/// background color at the start of every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacroquadCanvas;

impl MacroquadCanvas {
    pub fn new() -> Self {
        Self
    }
}

impl Canvas for MacroquadCanvas {
    fn size(&self) -> CanvasResult<(f32, f32)> {
        Ok((mq::screen_width(), mq::screen_height()))
    }

    fn begin_frame(&mut self) {
        let (r, g, b) = BACKGROUND_RGB;
        mq::clear_background(mq::Color::new(r, g, b, 1.0));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        mq::draw_rectangle(x, y, w, h, to_mq(color));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        mq::draw_rectangle_lines(x, y, w, h, width, to_mq(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        mq::draw_circle(center.x, center.y, radius, to_mq(color));
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        // Stacked translucent discs, largest first.
        for i in 0..GLOW_RINGS {
            let t = i as f32 / GLOW_RINGS as f32;
            let r = radius * (1.0 - t);
            let color = Color::new(
                outer.r + (inner.r - outer.r) * t,
                outer.g + (inner.g - outer.g) * t,
                outer.b + (inner.b - outer.b) * t,
                (outer.a + (inner.a - outer.a) * t) / GLOW_RINGS as f32 * 2.0,
            );
            mq::draw_circle(center.x, center.y, r, to_mq(color));
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        mq::draw_line(from.x, from.y, to.x, to.y, width, to_mq(color));
    }

    fn bezier(&mut self, from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, width: f32, color: Color) {
        let color = to_mq(color);
        let mut prev = from;
        for i in 1..=CURVE_SEGMENTS {
            let p = bezier_point(from, c1, c2, to, i as f32 / CURVE_SEGMENTS as f32);
            mq::draw_line(prev.x, prev.y, p.x, p.y, width, color);
            prev = p;
        }
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Color) {
        let color = to_mq(color);
        let point = |a: f32| center + Vec2::new(a.cos(), a.sin()) * radius;
        let mut prev = point(start);
        for i in 1..=CURVE_SEGMENTS {
            let p = point(start + (end - start) * i as f32 / CURVE_SEGMENTS as f32);
            mq::draw_line(prev.x, prev.y, p.x, p.y, width, color);
            prev = p;
        }
    }

    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        mq::measure_text(text, None, font_size.round().max(1.0) as u16, 1.0).width
    }

    fn fill_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        mq::draw_text(text, position.x, position.y, font_size, to_mq(color));
    }
}
