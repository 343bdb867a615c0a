use super::field::flow_force;
use super::objects::{Agent, Hub};
use crate::config::{Parallax, TierConfig};
use crate::constants::*;
use crate::timeline::beats::BeatModifiers;
use crate::timeline::stage::StageScheduler;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

const SPAWN_SOFTNESS: f32 = 0.08;

/// Result of an `initialize` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    /// Surface has no area yet; collections are empty until the next call.
    Deferred,
}

/// Hubs, agents and the simulation clock for one initialization.
#[derive(Debug, Clone)]
pub struct SimulationState {
    width: f32,
    height: f32,
    config: Option<TierConfig>,
    stages: StageScheduler,
    parallax: Vec2,
    hubs: Vec<Hub>,
    agents: Vec<Agent>,
    clock: f32,
    generation: u64,
    next_id: u64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            config: None,
            stages: StageScheduler::with_scale(1.0),
            parallax: Vec2::ZERO,
            hubs: Vec::new(),
            agents: Vec::new(),
            clock: 0.0,
            generation: 0,
            next_id: 0,
        }
    }

    /// Offset for hub targets and the core; read by every later `step`.
    pub fn set_parallax(&mut self, parallax: Parallax) {
        self.parallax = Vec2::new(parallax.x, parallax.y);
    }

    /// Replace every hub and agent with a fresh layout for this surface.
    pub fn initialize<R: Rng>(
        &mut self,
        width: f32,
        height: f32,
        config: &TierConfig,
        rng: &mut R,
    ) -> InitOutcome {
        self.width = width;
        self.height = height;
        self.clock = 0.0;
        self.hubs.clear();
        self.agents.clear();
        self.config = Some(config.clone());
        self.stages = StageScheduler::new(config);

        if !(width > 0.0 && height > 0.0) {
            log::debug!("surface {}x{} has no area, deferring swarm init", width, height);
            return InitOutcome::Deferred;
        }
        self.generation += 1;

        let n = config.hub_count.max(1);
        for i in 0..n {
            let anchor = Vec2::new(
                width / (n + 1) as f32 * (i + 1) as f32 + (rng.gen::<f32>() - 0.5) * HUB_JITTER,
                height * (0.45 + (i as f32 * 1.7).sin() * 0.12),
            );
            let mut hub = Hub {
                id: self.take_id(),
                index: i,
                anchor,
                position: anchor,
                radius: HUB_MIN_RADIUS + rng.gen::<f32>() * HUB_RADIUS_SPREAD,
                phase: rng.gen_range(0.0..TAU),
                z: rng.gen_range(0.6..=1.0),
            };
            hub.drift(0.0);
            self.hubs.push(hub);
        }

        let center = Vec2::new(width * 0.5, height * 0.5);
        let reach = center.length().max(1.0);
        let base_cap = config.base_speed_cap();
        let count = config.agent_count(width, height);
        self.agents.reserve(count);
        for _ in 0..count {
            let position = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
            let z = rng.gen_range(0.5..=1.2);
            // Agents near the middle wake first, the rim follows.
            let radial = (position - center).length() / reach;
            let delay = config.activation_spread * radial * (0.6 + 0.4 * rng.gen::<f32>());
            let velocity = Vec2::new(
                rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED),
                rng.gen_range(-INITIAL_SPEED..INITIAL_SPEED),
            );
            let mut agent = Agent {
                id: self.take_id(),
                position,
                velocity,
                hub: rng.gen_range(0..n),
                z,
                delay,
                activation: 0.0,
                rank: rng.gen::<f32>(),
                presence: 1.0,
            };
            agent.velocity = agent.velocity.clamp_length_max(agent.speed_cap(base_cap));
            self.agents.push(agent);
        }

        log::info!(
            "swarm generation {}: {} hubs, {} agents on {:.0}x{:.0} ({} tier)",
            self.generation,
            self.hubs.len(),
            self.agents.len(),
            width,
            height,
            config.tier
        );
        InitOutcome::Ready
    }

    /// Advance the clock by `dt` seconds and integrate every agent.
    pub fn step(&mut self, dt: f32, modifiers: &BeatModifiers) {
        let (s, base_cap) = match self.config.as_ref() {
            Some(config) => (config.speed, config.base_speed_cap()),
            None => return,
        };
        if !self.is_ready() {
            return;
        }
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.clock += dt;
        let frames = dt * REFERENCE_FPS;
        let field_time = self.clock * FIELD_TIME_RATE * s;
        let spawn_rate = modifiers.spawn_rate.max(0.0);
        let offset = self.parallax * PARALLAX_INFLUENCE;
        let (width, height) = (self.width, self.height);

        for hub in &mut self.hubs {
            hub.drift(self.clock * s);
        }

        for agent in &mut self.agents {
            agent.activation = self.stages.agent_activation(self.clock, agent.delay);
            agent.presence = presence(agent.rank, spawn_rate);

            let target = self.hubs[agent.hub].position + offset;
            let to_hub = target - agent.position;
            let pull = to_hub.normalize_or_zero() * ATTRACTION * s * agent.depth_gain();
            let steer = flow_force(agent.position, field_time, FLOW_STRENGTH * s);

            agent.velocity += (pull + steer) * agent.activation * frames;
            agent.velocity = agent.velocity.clamp_length_max(agent.speed_cap(base_cap));
            agent.position += agent.velocity * agent.activation * frames;
            wrap(&mut agent.position, width, height);
        }
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && !self.hubs.is_empty()
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> Option<&TierConfig> {
        self.config.as_ref()
    }

    pub fn stages(&self) -> &StageScheduler {
        &self.stages
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn parallax_offset(&self) -> Vec2 {
        self.parallax * PARALLAX_INFLUENCE
    }

    /// Cap for one agent under the current config.
    pub fn speed_cap(&self, agent: &Agent) -> f32 {
        self.config
            .as_ref()
            .map(|c| agent.speed_cap(c.base_speed_cap()))
            .unwrap_or(0.0)
    }

    /// Centroid of the hubs, where the core sits.
    pub fn core_position(&self) -> Vec2 {
        if self.hubs.is_empty() {
            return Vec2::new(self.width * 0.5, self.height * 0.5);
        }
        let sum: Vec2 = self.hubs.iter().map(|h| h.position).sum();
        sum / self.hubs.len() as f32 + self.parallax_offset()
    }

    pub fn mean_speed(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(Agent::speed).sum::<f32>() / self.agents.len() as f32
    }
}

/// Visibility of an agent of `rank` at `spawn_rate`. Ranks below the rate
/// are fully shown, so any rate of 1.0 or more shows the whole swarm.
pub fn presence(rank: f32, spawn_rate: f32) -> f32 {
    (1.0 - (rank - spawn_rate) / SPAWN_SOFTNESS).clamp(0.0, 1.0)
}

/// Toroidal wrap once a point is more than `WRAP_MARGIN` outside the bounds.
pub fn wrap(position: &mut Vec2, width: f32, height: f32) {
    if position.x < -WRAP_MARGIN {
        position.x = width + WRAP_MARGIN;
    } else if position.x > width + WRAP_MARGIN {
        position.x = -WRAP_MARGIN;
    }
    if position.y < -WRAP_MARGIN {
        position.y = height + WRAP_MARGIN;
    } else if position.y > height + WRAP_MARGIN {
        position.y = -WRAP_MARGIN;
    }
}
