//! Swarm simulation: hubs, agents and their integrator.
//!
//! Everything here is surface-agnostic. The renderer only reads the state
//! after `step` has finished for the frame.

pub mod field;
pub mod objects;
pub mod state;

pub use objects::{Agent, Hub};
pub use state::{InitOutcome, SimulationState};

use crate::constants::MAX_FRAME_DT;

/// Turns host frame timestamps (seconds) into clamped frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    /// Delta since the previous tick; zero on the first tick after a reset.
    pub fn tick(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(prev) => ((timestamp - prev) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        dt
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
