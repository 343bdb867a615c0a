//! Staged reveal: hubs, then the core, then scaffolding, then the swarm.
//!
//! Every value here is a pure function of elapsed time, so sampling the same
//! instant twice always yields the same progress.

use super::easing::{ease_in_cubic, smoothstep, window};
use crate::config::TierConfig;
use crate::constants::{AGENT_REVEAL, CORE_REVEAL, HUB_REVEAL, SCAFFOLD_REVEAL};

/// Progress of each reveal stage at one instant, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageProgress {
    pub hubs: f32,
    pub core: f32,
    pub scaffold: f32,
    /// Swarm-wide reveal (an agent with zero delay).
    pub agents: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageScheduler {
    scale: f32,
}

impl StageScheduler {
    pub fn new(config: &TierConfig) -> Self {
        Self::with_scale(config.stage_scale)
    }

    pub fn with_scale(scale: f32) -> Self {
        Self { scale: scale.max(0.01) }
    }

    fn ramp(&self, elapsed: f32, (start, duration): (f32, f32)) -> f32 {
        smoothstep(window(elapsed, start * self.scale, duration * self.scale))
    }

    pub fn progress(&self, elapsed: f32) -> StageProgress {
        StageProgress {
            hubs: self.ramp(elapsed, HUB_REVEAL),
            core: self.ramp(elapsed, CORE_REVEAL),
            scaffold: self.ramp(elapsed, SCAFFOLD_REVEAL),
            agents: self.agent_activation(elapsed, 0.0),
        }
    }

    /// Activation of one agent: an ease-in ramp that starts once the swarm
    /// stage opens plus the agent's own delay.
    pub fn agent_activation(&self, elapsed: f32, delay: f32) -> f32 {
        let (start, duration) = AGENT_REVEAL;
        ease_in_cubic(window(
            elapsed,
            start * self.scale + delay.max(0.0),
            duration * self.scale,
        ))
    }
}
