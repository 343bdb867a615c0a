//! Rendering: the drawing-surface abstraction, the scene painter and the
//! overlay cards.

pub mod canvas;
pub mod overlay;
pub mod recording;
pub mod scene;

#[cfg(feature = "window")]
pub mod macroquad_canvas;

pub use canvas::{Canvas, Color};
pub use overlay::{fit_text, ConnectorCoverage, FittedText, OverlayRenderer};
pub use recording::{DrawCommand, RecordingCanvas};
pub use scene::{FrameInputs, Renderer};

#[cfg(feature = "window")]
pub use macroquad_canvas::MacroquadCanvas;
