// Platform module - The windowing primitive a session runs on
//
// A platform opens one window of a fixed physical size, presents the pixel
// buffer and refreshes raw input on every poll, and provides the clock the
// frame pacer sleeps on.

pub mod headless;
pub mod keys;
#[cfg(feature = "winit")]
pub mod window;

use crate::display::Clock;

pub use headless::{HeadlessPlatform, ManualClock};
pub use keys::KEY_COUNT;
#[cfg(feature = "winit")]
pub use window::WinitPlatform;

/// Modifier bit for Control
pub const MOD_CONTROL: u8 = 1 << 0;
/// Modifier bit for Shift
pub const MOD_SHIFT: u8 = 1 << 1;
/// Modifier bit for Alt
pub const MOD_ALT: u8 = 1 << 2;
/// Modifier bit for the GUI/Meta/Super key
pub const MOD_GUI: u8 = 1 << 3;

/// Parameters for opening a platform window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec<'a> {
    /// Window title
    pub title: &'a str,
    /// Width of the pixel buffer in physical pixels
    pub width: usize,
    /// Height of the pixel buffer in physical pixels
    pub height: usize,
}

/// Raw input state as reported by a platform
///
/// Mouse coordinates are physical (buffer) pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    /// Pressed state per key code
    pub keys: [bool; KEY_COUNT],
    /// Mouse x in physical pixels
    pub mouse_x: i32,
    /// Mouse y in physical pixels
    pub mouse_y: i32,
    /// Whether the primary mouse button is held
    pub mouse_down: bool,
    /// Modifier bitmask (see `MOD_*`)
    pub modifiers: u8,
}

impl RawInput {
    /// Create an input state with nothing pressed
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
            mouse_x: 0,
            mouse_y: 0,
            mouse_down: false,
            modifiers: 0,
        }
    }
}

impl Default for RawInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded modifier key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
    pub gui: bool,
}

impl Modifiers {
    /// Decode a modifier bitmask
    pub fn from_bits(bits: u8) -> Self {
        Self {
            control: bits & MOD_CONTROL != 0,
            shift: bits & MOD_SHIFT != 0,
            alt: bits & MOD_ALT != 0,
            gui: bits & MOD_GUI != 0,
        }
    }
}

/// Windowing primitive driven by a session
pub trait Platform: Clock {
    /// Error reported when a window cannot be opened
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open the window
    fn open(&mut self, spec: &WindowSpec<'_>) -> Result<(), Self::Error>;

    /// Present `frame` and process pending events
    ///
    /// `frame` is row-major and sized to the physical dimensions given at open.
    ///
    /// # Returns
    /// `true` while the window remains open
    fn poll(&mut self, frame: &[u32]) -> bool;

    /// Input state as of the last poll
    fn input(&self) -> &RawInput;

    /// Close the window and release its resources
    fn close(&mut self);
}

/// A borrowed platform outlives the sessions opened on it
impl<P: Platform + ?Sized> Platform for &mut P {
    type Error = P::Error;

    fn open(&mut self, spec: &WindowSpec<'_>) -> Result<(), Self::Error> {
        (**self).open(spec)
    }

    fn poll(&mut self, frame: &[u32]) -> bool {
        (**self).poll(frame)
    }

    fn input(&self) -> &RawInput {
        (**self).input()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_from_bits() {
        assert_eq!(Modifiers::from_bits(0), Modifiers::default());

        let all = Modifiers::from_bits(0b1111);
        assert!(all.control && all.shift && all.alt && all.gui);

        let shift_gui = Modifiers::from_bits(MOD_SHIFT | MOD_GUI);
        assert!(!shift_gui.control);
        assert!(shift_gui.shift);
        assert!(!shift_gui.alt);
        assert!(shift_gui.gui);

        // Bits above bit 3 are ignored
        assert_eq!(Modifiers::from_bits(0xF0), Modifiers::default());
    }

    #[test]
    fn test_raw_input_default() {
        let input = RawInput::default();
        assert!(input.keys.iter().all(|&k| !k));
        assert!(!input.mouse_down);
        assert_eq!(input.modifiers, 0);
    }
}
