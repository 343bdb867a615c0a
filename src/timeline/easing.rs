/// Hermite smoothstep on [0, 1]; input is clamped.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

#[inline]
pub fn ease_in_cubic(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * x
}

/// Progress through a window starting at `start` lasting `duration` seconds.
#[inline]
pub fn window(elapsed: f32, start: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= start { 1.0 } else { 0.0 };
    }
    ((elapsed - start) / duration).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for f in [smoothstep, ease_in_cubic] {
            assert_eq!(f(0.0), 0.0);
            assert_eq!(f(1.0), 1.0);
            assert_eq!(f(-3.0), 0.0);
            assert_eq!(f(7.0), 1.0);
        }
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_window() {
        assert_eq!(window(0.5, 1.0, 2.0), 0.0);
        assert_eq!(window(2.0, 1.0, 2.0), 0.5);
        assert_eq!(window(9.0, 1.0, 2.0), 1.0);
        assert_eq!(window(1.0, 1.0, 0.0), 1.0);
    }
}
