use crate::constants::{FIELD_DRIFT_X, FIELD_DRIFT_Y, FIELD_FREQ_X, FIELD_FREQ_Y};
use glam::Vec2;
use std::f32::consts::PI;

/// Trig "noise" standing in for a flow field. Deterministic in (position,
/// time); range [-2, 2].
#[inline]
pub fn flow_value(position: Vec2, time: f32) -> f32 {
    ((position.x + time * FIELD_DRIFT_X) * FIELD_FREQ_X).sin()
        + ((position.y - time * FIELD_DRIFT_Y) * FIELD_FREQ_Y).cos()
}

/// Steering vector of length `strength` along the field direction.
#[inline]
pub fn flow_force(position: Vec2, time: f32, strength: f32) -> Vec2 {
    let angle = flow_value(position, time) * PI;
    Vec2::new(angle.cos(), angle.sin()) * strength
}
