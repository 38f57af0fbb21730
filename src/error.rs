// Error types shared by the canvas, pacer and session
//
// Argument errors are reported before anything is mutated. Resource errors
// (allocation, window creation) are kept apart so callers can decide to retry.

use thiserror::Error;

/// Boxed error reported by a windowing platform
pub type PlatformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by fenster-rs
#[derive(Debug, Error)]
pub enum FensterError {
    /// Width or height outside 1..=MAX_DIMENSION
    #[error("width/height must be in range 1-{max}, got {value}")]
    InvalidDimension { value: i64, max: i64 },

    /// Scale is not a positive power of two
    #[error("scale must be a power of 2, got {0}")]
    InvalidScale(i64),

    /// Target frame rate is negative or not a number
    #[error("target fps must be non-negative, got {0}")]
    InvalidFrameRate(f64),

    /// Packed color outside 0x000000-0xffffff
    #[error("color must be in range 0x000000-0xffffff, got {0:#x}")]
    InvalidColor(i64),

    /// Color component outside 0-255
    #[error("color component must be in range 0-255, got {0}")]
    InvalidColorComponent(i64),

    /// Logical coordinate outside the canvas
    #[error("coordinate ({x}, {y}) out of range for {width}x{height} canvas")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// The physical buffer could not be allocated
    #[error("failed to allocate {cells} cells for window buffer")]
    AllocationFailure { cells: u128 },

    /// The windowing platform refused to open the window
    #[error("failed to open window: {0}")]
    WindowOpenFailure(#[source] PlatformError),

    /// Operation on a session that has already been closed
    #[error("attempt to use a closed window")]
    ClosedSession,
}

impl FensterError {
    /// Whether this error comes from resource acquisition rather than a bad argument
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            FensterError::AllocationFailure { .. } | FensterError::WindowOpenFailure(_)
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FensterError>;
