// Frame pacer - Caps the frame rate and measures delta time
//
// The target frame time is applied as a floor on elapsed time: when a frame
// finishes early the pacer sleeps for the remainder, then reads the clock
// again so the reported delta includes the sleep.

use crate::error::{FensterError, Result};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Number of milliseconds per second
const MS_PER_SEC: f64 = 1000.0;

/// Longest accepted target frame time (one hour)
pub const MAX_FRAME_TIME_MS: u64 = 60 * 60 * 1000;

/// Source of time for the pacer
///
/// `now_ms` must be monotonic for as long as a pacer is driven by it.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u64;

    /// Block for the given number of milliseconds
    fn sleep_ms(&mut self, milliseconds: u64);
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn sleep_ms(&mut self, milliseconds: u64) {
        (**self).sleep_ms(milliseconds);
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, milliseconds: u64) {
        std::thread::sleep(Duration::from_millis(milliseconds));
    }
}

/// Pause the current thread for a number of milliseconds
pub fn sleep(milliseconds: u64) {
    std::thread::sleep(Duration::from_millis(milliseconds));
}

/// Current time in milliseconds since the first call in this process
pub fn time() -> u64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_millis() as u64
}

/// Fixed-target frame pacer
#[derive(Debug, Clone)]
pub struct FramePacer {
    target_fps: f64,
    /// `round(1000 / target_fps)`, `None` when pacing is disabled
    target_frame_time_ms: Option<u64>,
    /// Start of the current frame, `None` until the first `advance`
    start_frame_time_ms: Option<u64>,
    delta: f64,
}

impl FramePacer {
    /// Create a pacer for the given target frame rate
    ///
    /// A target of 0 disables sleeping; delta time is still measured.
    ///
    /// # Errors
    /// `InvalidFrameRate` if `target_fps` is negative, not finite, or so
    /// small that the frame time exceeds `MAX_FRAME_TIME_MS`
    pub fn new(target_fps: f64) -> Result<Self> {
        if !target_fps.is_finite() || target_fps < 0.0 {
            return Err(FensterError::InvalidFrameRate(target_fps));
        }

        let target_frame_time_ms = if target_fps > 0.0 {
            let frame_time = (MS_PER_SEC / target_fps).round();
            if frame_time > MAX_FRAME_TIME_MS as f64 {
                return Err(FensterError::InvalidFrameRate(target_fps));
            }
            // Bounded above, so the conversion is exact
            Some(frame_time as u64)
        } else {
            None
        };

        Ok(Self {
            target_fps,
            target_frame_time_ms,
            start_frame_time_ms: None,
            delta: 0.0,
        })
    }

    /// Target frame rate this pacer was created with
    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    /// Target frame time in milliseconds, `None` if pacing is disabled
    pub fn target_frame_time_ms(&self) -> Option<u64> {
        self.target_frame_time_ms
    }

    /// Seconds between the last two frame starts
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Start the next frame
    ///
    /// Sleeps on `clock` if the previous frame finished before the target
    /// frame time, then records the new frame start.
    ///
    /// # Returns
    /// Delta time in seconds (0.0 on the first call)
    pub fn advance<C: Clock + ?Sized>(&mut self, clock: &mut C) -> f64 {
        let now = clock.now_ms();
        let Some(start) = self.start_frame_time_ms else {
            self.start_frame_time_ms = Some(now);
            return self.delta;
        };

        let elapsed = now.saturating_sub(start);
        if let Some(target) = self.target_frame_time_ms {
            if target > elapsed {
                let remaining = target - elapsed;
                tracing::trace!(remaining, "pacing sleep");
                clock.sleep_ms(remaining);
            }
        }

        let now = clock.now_ms();
        self.delta = now.saturating_sub(start) as f64 / MS_PER_SEC;
        self.start_frame_time_ms = Some(now);
        self.delta
    }
}
