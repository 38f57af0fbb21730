// Headless platform - An off-screen window with scripted input and time
//
// Nothing is shown on screen. Each poll copies the presented frame and
// publishes the scripted input, so it can drive sessions in tests and render
// frames without a display server.

use super::{Platform, RawInput, WindowSpec};
use crate::display::Clock;
use thiserror::Error;

/// Errors reported by the headless platform
#[derive(Debug, Error)]
pub enum HeadlessError {
    /// Opening was scripted to fail
    #[error("window open refused: {0}")]
    Refused(String),

    /// A window is already open on this platform
    #[error("a window is already open")]
    AlreadyOpen,
}

/// Clock that only advances when told to
///
/// Sleeps move time forward by exactly the requested amount and are recorded.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
    sleeps: Vec<u64>,
}

impl ManualClock {
    /// Create a clock reading `now` milliseconds
    pub fn at(now: u64) -> Self {
        Self {
            now,
            sleeps: Vec::new(),
        }
    }

    /// Set the current time
    pub fn set(&mut self, now: u64) {
        self.now = now;
    }

    /// Move time forward
    pub fn advance(&mut self, milliseconds: u64) {
        self.now += milliseconds;
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> &[u64] {
        &self.sleeps
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, milliseconds: u64) {
        self.sleeps.push(milliseconds);
        self.now += milliseconds;
    }
}

/// Off-screen platform with scripted input
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    clock: ManualClock,
    /// Input published on the next poll
    pending: RawInput,
    /// Input as of the last poll
    input: RawInput,
    title: String,
    width: usize,
    height: usize,
    frame: Vec<u32>,
    is_open: bool,
    close_requested: bool,
    refuse_open: Option<String>,
    polls: usize,
    closes: usize,
}

impl HeadlessPlatform {
    /// Create a headless platform with its clock at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a headless platform with its clock at `now` milliseconds
    pub fn with_time(now: u64) -> Self {
        Self {
            clock: ManualClock::at(now),
            ..Self::default()
        }
    }

    /// Make the next `open` fail with the given reason
    pub fn refuse_next_open(&mut self, reason: impl Into<String>) {
        self.refuse_open = Some(reason.into());
    }

    /// The platform clock
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Mutable access to the platform clock
    pub fn clock_mut(&mut self) -> &mut ManualClock {
        &mut self.clock
    }

    /// Move the mouse to physical coordinates
    pub fn move_mouse(&mut self, x: i32, y: i32) {
        self.pending.mouse_x = x;
        self.pending.mouse_y = y;
    }

    /// Press or release the primary mouse button
    pub fn set_mouse_down(&mut self, down: bool) {
        self.pending.mouse_down = down;
    }

    /// Set the modifier bitmask
    pub fn set_modifiers(&mut self, bits: u8) {
        self.pending.modifiers = bits;
    }

    /// Press a key; codes outside the snapshot are ignored
    pub fn press_key(&mut self, code: usize) {
        if let Some(key) = self.pending.keys.get_mut(code) {
            *key = true;
        }
    }

    /// Release a key; codes outside the snapshot are ignored
    pub fn release_key(&mut self, code: usize) {
        if let Some(key) = self.pending.keys.get_mut(code) {
            *key = false;
        }
    }

    /// Simulate the user closing the window
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Whether a window is currently open
    pub fn is_window_open(&self) -> bool {
        self.is_open
    }

    /// Title given at open
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Physical size given at open
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The last frame presented by `poll`
    pub fn presented_frame(&self) -> &[u32] {
        &self.frame
    }

    /// Number of successful polls
    pub fn poll_count(&self) -> usize {
        self.polls
    }

    /// Number of times an open window was closed
    pub fn close_count(&self) -> usize {
        self.closes
    }
}

impl Clock for HeadlessPlatform {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn sleep_ms(&mut self, milliseconds: u64) {
        self.clock.sleep_ms(milliseconds);
    }
}

impl Platform for HeadlessPlatform {
    type Error = HeadlessError;

    fn open(&mut self, spec: &WindowSpec<'_>) -> Result<(), Self::Error> {
        if let Some(reason) = self.refuse_open.take() {
            return Err(HeadlessError::Refused(reason));
        }
        if self.is_open {
            return Err(HeadlessError::AlreadyOpen);
        }

        self.title = spec.title.to_string();
        self.width = spec.width;
        self.height = spec.height;
        self.frame = vec![0; spec.width * spec.height];
        self.input = RawInput::new();
        self.close_requested = false;
        self.is_open = true;
        Ok(())
    }

    fn poll(&mut self, frame: &[u32]) -> bool {
        if !self.is_open || self.close_requested {
            return false;
        }

        self.frame.clear();
        self.frame.extend_from_slice(frame);
        self.input = self.pending.clone();
        self.polls += 1;
        true
    }

    fn input(&self) -> &RawInput {
        &self.input
    }

    fn close(&mut self) {
        if self.is_open {
            self.is_open = false;
            self.closes += 1;
        }
    }
}
