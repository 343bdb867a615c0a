//! Tunables shared by the simulation, the timeline and the renderer.
//!
//! Distances are in logical pixels. Velocities are in pixels per reference
//! frame (1/60 s); the integrator converts `dt` into reference frames.

// ---------------------------------------------------------------------------
// Integration
// ---------------------------------------------------------------------------
pub const REFERENCE_FPS: f32 = 60.0;
pub const MAX_FRAME_DT: f32 = 0.1; // Larger gaps (tab switch) are clamped
pub const WRAP_MARGIN: f32 = 10.0; // Agents wrap once this far outside
pub const BASE_MAX_SPEED: f32 = 0.9;
pub const ATTRACTION: f32 = 0.04;
pub const FLOW_STRENGTH: f32 = 0.05;
pub const INITIAL_SPEED: f32 = 0.25; // Per-axis spread of initial velocity
pub const PARALLAX_INFLUENCE: f32 = 0.6;
pub const MAX_AGENTS: usize = 900;

// ---------------------------------------------------------------------------
// Flow field
// ---------------------------------------------------------------------------
pub const FIELD_TIME_RATE: f32 = 0.3; // Field time units per second at 1x
pub const FIELD_DRIFT_X: f32 = 200.0;
pub const FIELD_DRIFT_Y: f32 = 160.0;
pub const FIELD_FREQ_X: f32 = 0.002;
pub const FIELD_FREQ_Y: f32 = 0.0023;

// ---------------------------------------------------------------------------
// Hubs
// ---------------------------------------------------------------------------
pub const HUB_DRIFT_X: f32 = 18.0;
pub const HUB_DRIFT_Y: f32 = 14.0;
pub const HUB_JITTER: f32 = 40.0;
pub const HUB_MIN_RADIUS: f32 = 80.0;
pub const HUB_RADIUS_SPREAD: f32 = 40.0;

// ---------------------------------------------------------------------------
// Stage windows (seconds, before tier scaling)
// ---------------------------------------------------------------------------
pub const HUB_REVEAL: (f32, f32) = (0.0, 1.2); // (start, duration)
pub const CORE_REVEAL: (f32, f32) = (0.6, 1.4);
pub const SCAFFOLD_REVEAL: (f32, f32) = (1.2, 1.8);
pub const AGENT_REVEAL: (f32, f32) = (1.8, 2.4);

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------
pub const BEAT_DURATION: f32 = 3.6;
pub const BEAT_FADE_FRACTION: f32 = 0.2;
pub const BASE_HUE: f32 = 160.0; // Emerald

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------
pub const TRAIL_ALPHA: f32 = 0.1;
pub const BACKGROUND_RGB: (f32, f32, f32) = (2.0 / 255.0, 6.0 / 255.0, 23.0 / 255.0); // slate-950
pub const LINK_WINDOW: usize = 12; // Neighbors checked per agent
pub const LINK_ALPHA: f32 = 0.25;
pub const MAX_SCAFFOLD_ARCS: usize = 8;
pub const AGENT_RADIUS: f32 = 1.3;
pub const CORE_RADIUS: f32 = 14.0;
pub const CORE_RINGS: usize = 3;

// ---------------------------------------------------------------------------
// Overlay cards
// ---------------------------------------------------------------------------
pub const CARD_WIDTH: f32 = 184.0;
pub const CARD_PADDING: f32 = 10.0;
pub const CARD_GAP: f32 = 8.0;
pub const LABEL_FONT: f32 = 12.0;
pub const VALUE_FONT: f32 = 20.0;
pub const MIN_FONT: f32 = 7.0;
pub const FONT_STEP: f32 = 0.5;
