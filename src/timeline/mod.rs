//! Time-driven curves: the staged reveal and the narrative beat loop.

pub mod beats;
pub mod easing;
pub mod stage;

pub use beats::{ActiveBeat, Beat, BeatDriver, BeatModifiers, BeatSample, Callout, OverlayZone};
pub use stage::{StageProgress, StageScheduler};
