use crate::constants::{HUB_DRIFT_X, HUB_DRIFT_Y};
use glam::Vec2;

/// Attractor that agents cluster around.
#[derive(Debug, Clone, PartialEq)]
pub struct Hub {
    pub id: u64,
    pub index: usize,
    pub anchor: Vec2,
    pub position: Vec2,
    pub radius: f32,
    pub phase: f32,
    /// Depth factor in [0.6, 1.0].
    pub z: f32,
}

impl Hub {
    /// Lissajous drift around the anchor; a pure function of `time`.
    pub fn drift(&mut self, time: f32) {
        let k = self.index as f32;
        let fx = 0.35 + k * 0.04;
        let fy = 0.47 + k * 0.03;
        self.position = self.anchor
            + Vec2::new(
                HUB_DRIFT_X * (time * fx + self.phase).sin(),
                HUB_DRIFT_Y * (time * fy + self.phase * 1.3).cos(),
            );
    }

    /// Glow breathing factor in [0.85, 1.15].
    pub fn pulse(&self, time: f32) -> f32 {
        1.0 + 0.15 * (time * 1.1 + self.phase).sin()
    }
}

/// One swarm member.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub hub: usize,
    /// Depth factor in [0.5, 1.2]; nearer agents are larger and faster.
    pub z: f32,
    /// Seconds after the swarm stage opens before this agent starts moving.
    pub delay: f32,
    /// Derived each step from the clock and `delay`; never integrated.
    pub activation: f32,
    /// Spawn ordering in [0, 1); lower ranks stay visible at low spawn rates.
    pub rank: f32,
    /// Visibility under the current spawn rate, in [0, 1].
    pub presence: f32,
}

impl Agent {
    #[inline]
    pub fn speed_cap(&self, base_cap: f32) -> f32 {
        base_cap * (0.55 + 0.45 * self.z)
    }

    #[inline]
    pub fn depth_gain(&self) -> f32 {
        0.6 + 0.4 * self.z
    }

    /// Combined weight used for drawing and link visibility.
    #[inline]
    pub fn visibility(&self) -> f32 {
        self.activation * self.presence
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_drift_stays_near_anchor() {
        let mut hub = Hub {
            id: 0,
            index: 2,
            anchor: Vec2::new(300.0, 200.0),
            position: Vec2::ZERO,
            radius: 90.0,
            phase: 1.0,
            z: 0.8,
        };
        for i in 0..200 {
            hub.drift(i as f32 * 0.37);
            let d = hub.position - hub.anchor;
            assert!(d.x.abs() <= HUB_DRIFT_X + 1e-3 && d.y.abs() <= HUB_DRIFT_Y + 1e-3);
            let p = hub.pulse(i as f32 * 0.37);
            assert!((0.85..=1.15).contains(&p));
        }
    }

    #[test]
    fn test_nearer_agents_move_faster() {
        let mut agent = Agent {
            id: 0,
            position: Vec2::ZERO,
            velocity: Vec2::new(3.0, 4.0),
            hub: 0,
            z: 0.5,
            delay: 0.0,
            activation: 0.5,
            rank: 0.0,
            presence: 0.5,
        };
        let far = agent.speed_cap(1.0);
        agent.z = 1.2;
        assert!(agent.speed_cap(1.0) > far);
        assert_eq!(agent.speed(), 5.0);
        assert_eq!(agent.visibility(), 0.25);
    }
}
