// fenster-rs Library
// A minimal software-rendered window: a scaled pixel canvas, frame pacing,
// and cached keyboard/mouse state on top of a pluggable windowing platform

// Public modules
pub mod config;
pub mod display;
pub mod error;
pub mod platform;
pub mod screenshot;
pub mod session;

// Re-export main types for convenience
pub use config::{FensterConfig, ScreenshotConfig, WindowConfig};
pub use display::{
    components_to_rgb, rgb_to_components, sleep, time, Canvas, Clock, FramePacer, SystemClock,
};
pub use error::{FensterError, Result};
pub use platform::{HeadlessPlatform, Modifiers, Platform, RawInput, WindowSpec, KEY_COUNT};
#[cfg(feature = "winit")]
pub use platform::WinitPlatform;
pub use screenshot::{save_screenshot, ScreenshotError};
pub use session::{Session, WindowOptions};
