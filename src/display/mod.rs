// Display module - Scaled pixel canvas and frame pacing
//
// This module provides:
// - 24-bit packed RGB color helpers
// - Canvas (logical pixels magnified onto a physical buffer)
// - Frame pacer (target FPS cap and delta time)

pub mod canvas;
pub mod color;
pub mod pacer;

pub use canvas::{Canvas, MAX_DIMENSION};
pub use color::{components_to_rgb, rgb_to_components, rgb_to_rgba, BLACK, MAX_COLOR};
pub use pacer::{sleep, time, Clock, FramePacer, SystemClock};
