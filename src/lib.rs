//! Ambient particle swarm for a hero banner.
//!
//! Hubs drift slowly, agents orbit them through a flow field and link up
//! with nearby neighbours, and an optional narrative loop tints the scene and
//! pins a small callout card to a rotating screen zone. The library draws
//! through the [`render::Canvas`] trait and is driven by a
//! [`host::FrameHost`], so it runs the same against a window or a test
//! recorder.
//!
//! ```no_run
//! use swarm_field::{Animator, ManualHost, RecordingCanvas, SwarmConfig};
//!
//! let mut animator = Animator::attach(
//!     RecordingCanvas::new(1280.0, 720.0),
//!     ManualHost::new(),
//!     SwarmConfig::default(),
//! );
//! animator.on_frame(0.0);
//! animator.detach();
//! ```

pub mod animator;
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod render;
pub mod simulation;
pub mod timeline;

pub use animator::{Animator, AnimatorState, FrameStats};
pub use config::{Parallax, Speed, SwarmConfig, Tier, TierConfig};
pub use error::{CanvasError, CanvasResult, ConfigError, ConfigResult};
pub use host::{FrameHandle, FrameHost, ListenerId, ManualHost};
pub use render::{Canvas, Color, RecordingCanvas};
pub use simulation::SimulationState;
