use crate::error::CanvasResult;
use glam::Vec2;

/// Straight-alpha RGBA color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `h` in degrees, `s` and `l` in [0, 1].
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0) / 60.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::new(r + m, g + m, b + m, a.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Drawing target the renderer paints onto. Coordinates are logical pixels
/// with the origin at the top-left.
pub trait Canvas {
    /// Logical size of the surface, or an error if no context is available.
    fn size(&self) -> CanvasResult<(f32, f32)>;

    /// Called once before any drawing in a frame.
    fn begin_frame(&mut self) {}
    /// Called once after the last draw call of a frame.
    fn end_frame(&mut self) {}

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Radial gradient disc fading from `inner` at the center to `outer` at `radius`.
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Cubic bezier stroke.
    fn bezier(&mut self, from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, width: f32, color: Color);
    /// Circular arc stroke, angles in radians.
    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Color);

    /// Rendered width of `text` at `font_size`.
    fn measure_text(&self, text: &str, font_size: f32) -> f32;
    /// `position` is the left end of the text baseline.
    fn fill_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color);
}

/// Point on a cubic bezier at `t`.
pub fn bezier_point(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsla_primaries() {
        let red = Color::hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red.r - 1.0).abs() < 1e-5 && red.g.abs() < 1e-5 && red.b.abs() < 1e-5);
        let green = Color::hsla(120.0, 1.0, 0.5, 0.5);
        assert!((green.g - 1.0).abs() < 1e-5 && green.r.abs() < 1e-5);
        assert_eq!(green.a, 0.5);
        let wrapped = Color::hsla(480.0, 1.0, 0.5, 1.0);
        assert!((wrapped.g - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bezier_endpoints() {
        let (a, b) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 4.0));
        let c = Vec2::new(3.0, -8.0);
        assert_eq!(bezier_point(a, c, c, b, 0.0), a);
        assert!(bezier_point(a, c, c, b, 1.0).distance(b) < 1e-5);
    }
}
