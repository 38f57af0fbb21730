// Window session - One open window with its canvas and frame pacer
//
// A session owns the canvas, the pacer and the platform window for the time
// the window is open. Every frame it paces, presents the canvas, and caches
// the mouse position (in logical pixels), modifier keys and key states.

use crate::display::{Canvas, FramePacer};
use crate::error::{FensterError, Result};
use crate::platform::{Modifiers, Platform, WindowSpec, KEY_COUNT};
use std::fmt;

/// Default window title
pub const DEFAULT_TITLE: &str = "fenster";

/// Default window scale
pub const DEFAULT_SCALE: i64 = 1;

/// Default target frames per second
pub const DEFAULT_TARGET_FPS: f64 = 60.0;

/// Parameters for opening a session
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    /// Logical width in pixels
    pub width: i64,
    /// Logical height in pixels
    pub height: i64,
    /// Window title
    pub title: String,
    /// Scale factor (power of two)
    pub scale: i64,
    /// Target frame rate (0 disables pacing)
    pub target_fps: f64,
}

impl WindowOptions {
    /// Create options for a window of the given logical size
    ///
    /// Defaults: title "fenster", 1x scale, 60 FPS
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            title: DEFAULT_TITLE.to_string(),
            scale: DEFAULT_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: i64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the target frame rate
    pub fn with_target_fps(mut self, target_fps: f64) -> Self {
        self.target_fps = target_fps;
        self
    }
}

/// State that only exists while the window is open
struct OpenWindow {
    canvas: Canvas,
    pacer: FramePacer,
    mouse_x: i64,
    mouse_y: i64,
    modifiers: Modifiers,
    keys: Box<[bool; KEY_COUNT]>,
}

/// An open window on a platform
///
/// Dropping a session closes it.
pub struct Session<P: Platform> {
    platform: P,
    window: Option<OpenWindow>,
    title: String,
    target_fps: f64,
}

impl<P: Platform> Session<P> {
    /// Open a window on `platform`
    ///
    /// The platform window is requested at the physical size
    /// `width * scale` × `height * scale`. Pass `&mut platform` to keep the
    /// platform after a failed open or once the session is closed, so the
    /// window can be opened again on it.
    ///
    /// # Errors
    /// `InvalidDimension`, `InvalidScale`, `InvalidFrameRate` for bad options,
    /// `AllocationFailure` if the buffer cannot be allocated and
    /// `WindowOpenFailure` if the platform refuses to open the window
    pub fn open(mut platform: P, options: &WindowOptions) -> Result<Self> {
        let canvas = Canvas::new(options.width, options.height, options.scale)?;
        let pacer = FramePacer::new(options.target_fps)?;

        let spec = WindowSpec {
            title: &options.title,
            width: canvas.physical_width(),
            height: canvas.physical_height(),
        };
        platform
            .open(&spec)
            .map_err(|e| FensterError::WindowOpenFailure(Box::new(e)))?;

        tracing::debug!(
            title = %options.title,
            width = canvas.width(),
            height = canvas.height(),
            scale = canvas.scale(),
            target_fps = options.target_fps,
            "window opened"
        );

        Ok(Self {
            platform,
            window: Some(OpenWindow {
                canvas,
                pacer,
                mouse_x: 0,
                mouse_y: 0,
                modifiers: Modifiers::default(),
                keys: Box::new([false; KEY_COUNT]),
            }),
            title: options.title.clone(),
            target_fps: options.target_fps,
        })
    }

    fn open_window(&self) -> Result<&OpenWindow> {
        self.window.as_ref().ok_or(FensterError::ClosedSession)
    }

    fn open_window_mut(&mut self) -> Result<&mut OpenWindow> {
        self.window.as_mut().ok_or(FensterError::ClosedSession)
    }

    /// Run one frame cycle
    ///
    /// Waits out the rest of the target frame time, presents the canvas and
    /// refreshes the cached input state.
    ///
    /// # Returns
    /// `true` if the window is still open, `false` once the platform reports
    /// it closed (cached input is then left as of the last open frame)
    pub fn frame(&mut self) -> Result<bool> {
        let window = self.window.as_mut().ok_or(FensterError::ClosedSession)?;

        window.pacer.advance(&mut self.platform);

        if !self.platform.poll(window.canvas.as_slice()) {
            tracing::warn!(title = %self.title, "platform reported window closed");
            return Ok(false);
        }

        let input = self.platform.input();
        let scale = window.canvas.scale() as i64;
        // Truncating division, so the position floors for on-window coordinates
        window.mouse_x = i64::from(input.mouse_x) / scale;
        window.mouse_y = i64::from(input.mouse_y) / scale;
        window.modifiers = Modifiers::from_bits(input.modifiers);
        *window.keys = input.keys;
        Ok(true)
    }

    /// Close the window and release the canvas
    ///
    /// Does nothing if the session is already closed.
    pub fn close(&mut self) {
        if self.window.take().is_some() {
            self.platform.close();
            tracing::debug!(title = %self.title, "window closed");
        }
    }

    /// Whether the session has not been closed yet
    pub fn is_open(&self) -> bool {
        self.window.is_some()
    }

    /// Set a logical pixel
    pub fn set(&mut self, x: i64, y: i64, color: i64) -> Result<()> {
        self.open_window_mut()?.canvas.set(x, y, color)
    }

    /// Get a logical pixel
    pub fn get(&self, x: i64, y: i64) -> Result<u32> {
        self.open_window()?.canvas.get(x, y)
    }

    /// Fill the canvas with a color
    pub fn clear(&mut self, color: i64) -> Result<()> {
        self.open_window_mut()?.canvas.clear(color)
    }

    /// Read access to the canvas
    pub fn canvas(&self) -> Result<&Canvas> {
        Ok(&self.open_window()?.canvas)
    }

    /// Seconds between the starts of the last two frames
    pub fn delta(&self) -> Result<f64> {
        Ok(self.open_window()?.pacer.delta())
    }

    /// Mouse x in logical pixels, as of the last frame
    pub fn mouse_x(&self) -> Result<i64> {
        Ok(self.open_window()?.mouse_x)
    }

    /// Mouse y in logical pixels, as of the last frame
    pub fn mouse_y(&self) -> Result<i64> {
        Ok(self.open_window()?.mouse_y)
    }

    /// Whether the primary mouse button is held, read from the platform
    pub fn mouse_down(&self) -> Result<bool> {
        self.open_window()?;
        Ok(self.platform.input().mouse_down)
    }

    /// Modifier keys as of the last frame
    pub fn modifiers(&self) -> Result<Modifiers> {
        Ok(self.open_window()?.modifiers)
    }

    /// Whether Control was held as of the last frame
    pub fn mod_control(&self) -> Result<bool> {
        Ok(self.modifiers()?.control)
    }

    /// Whether Shift was held as of the last frame
    pub fn mod_shift(&self) -> Result<bool> {
        Ok(self.modifiers()?.shift)
    }

    /// Whether Alt was held as of the last frame
    pub fn mod_alt(&self) -> Result<bool> {
        Ok(self.modifiers()?.alt)
    }

    /// Whether GUI (Meta/Super) was held as of the last frame
    pub fn mod_gui(&self) -> Result<bool> {
        Ok(self.modifiers()?.gui)
    }

    /// Key states as of the last frame, indexed by key code
    pub fn keys(&self) -> Result<&[bool; KEY_COUNT]> {
        Ok(&*self.open_window()?.keys)
    }

    /// Logical width
    pub fn width(&self) -> Result<usize> {
        Ok(self.open_window()?.canvas.width())
    }

    /// Logical height
    pub fn height(&self) -> Result<usize> {
        Ok(self.open_window()?.canvas.height())
    }

    /// Scale factor
    pub fn scale(&self) -> Result<usize> {
        Ok(self.open_window()?.canvas.scale())
    }

    /// Window title
    pub fn title(&self) -> Result<&str> {
        self.open_window()?;
        Ok(&self.title)
    }

    /// Target frame rate
    pub fn target_fps(&self) -> Result<f64> {
        self.open_window()?;
        Ok(self.target_fps)
    }

    /// The platform this session runs on
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

impl<P: Platform> Drop for Session<P> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<P: Platform> fmt::Display for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.window {
            Some(window) => write!(
                f,
                "window ({} {}x{} @{}x)",
                self.title,
                window.canvas.width(),
                window.canvas.height(),
                window.canvas.scale()
            ),
            None => write!(f, "window (closed)"),
        }
    }
}

impl<P: Platform> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("title", &self.title)
            .field("target_fps", &self.target_fps)
            .field("canvas", &self.window.as_ref().map(|w| &w.canvas))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{keys, HeadlessPlatform, MOD_ALT, MOD_CONTROL};

    fn open(width: i64, height: i64, scale: i64) -> Session<HeadlessPlatform> {
        let options = WindowOptions::new(width, height).with_scale(scale);
        Session::open(HeadlessPlatform::new(), &options).unwrap()
    }

    #[test]
    fn test_window_options_defaults() {
        let options = WindowOptions::new(320, 240);
        assert_eq!(options.title, "fenster");
        assert_eq!(options.scale, 1);
        assert_eq!(options.target_fps, 60.0);

        let options = options
            .with_title("demo")
            .with_scale(4)
            .with_target_fps(30.0);
        assert_eq!(options.title, "demo");
        assert_eq!(options.scale, 4);
        assert_eq!(options.target_fps, 30.0);
    }

    #[test]
    fn test_open_requests_physical_size() {
        let session = open(16, 9, 4);
        assert_eq!(session.platform().size(), (64, 36));
        assert_eq!(session.platform().title(), "fenster");
        assert_eq!(session.width().unwrap(), 16);
        assert_eq!(session.height().unwrap(), 9);
        assert_eq!(session.scale().unwrap(), 4);
        assert_eq!(session.target_fps().unwrap(), 60.0);
    }

    #[test]
    fn test_open_validation() {
        let platform = HeadlessPlatform::new();
        let err = Session::open(platform, &WindowOptions::new(0, 10)).unwrap_err();
        assert!(matches!(err, FensterError::InvalidDimension { .. }));

        let err = Session::open(
            HeadlessPlatform::new(),
            &WindowOptions::new(10, 10).with_scale(3),
        )
        .unwrap_err();
        assert!(matches!(err, FensterError::InvalidScale(3)));

        let err = Session::open(
            HeadlessPlatform::new(),
            &WindowOptions::new(10, 10).with_target_fps(-5.0),
        )
        .unwrap_err();
        assert!(matches!(err, FensterError::InvalidFrameRate(_)));
    }

    #[test]
    fn test_open_failure() {
        let mut platform = HeadlessPlatform::new();
        platform.refuse_next_open("no display");
        let err = Session::open(platform, &WindowOptions::new(10, 10)).unwrap_err();
        assert!(matches!(err, FensterError::WindowOpenFailure(_)));
        assert!(err.is_resource_error());
    }

    #[test]
    fn test_frame_caches_descaled_input() {
        let mut session = open(10, 10, 4);
        session.platform_mut().move_mouse(23, 39);
        session.platform_mut().set_modifiers(MOD_CONTROL | MOD_ALT);
        session.platform_mut().press_key(keys::SPACE);
        session.platform_mut().set_mouse_down(true);

        assert!(session.frame().unwrap());
        assert_eq!(session.mouse_x().unwrap(), 5);
        assert_eq!(session.mouse_y().unwrap(), 9);
        assert!(session.mod_control().unwrap());
        assert!(!session.mod_shift().unwrap());
        assert!(session.mod_alt().unwrap());
        assert!(!session.mod_gui().unwrap());
        assert!(session.keys().unwrap()[keys::SPACE]);
        assert!(session.mouse_down().unwrap());
    }

    #[test]
    fn test_frame_presents_canvas() {
        let mut session = open(2, 2, 2);
        session.set(1, 0, 0xFF0000).unwrap();
        assert!(session.frame().unwrap());

        let frame = session.platform().presented_frame();
        assert_eq!(frame.len(), 16);
        assert_eq!(&frame[0..4], &[0, 0, 0xFF0000, 0xFF0000]);
        assert_eq!(&frame[4..8], &[0, 0, 0xFF0000, 0xFF0000]);
    }

    #[test]
    fn test_closed_platform_keeps_cached_state() {
        let mut session = open(10, 10, 2);
        session.platform_mut().move_mouse(8, 6);
        assert!(session.frame().unwrap());

        session.platform_mut().move_mouse(18, 18);
        session.platform_mut().request_close();
        assert!(!session.frame().unwrap());
        assert_eq!(session.mouse_x().unwrap(), 4);
        assert_eq!(session.mouse_y().unwrap(), 3);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut session = open(4, 4, 1);
        session.close();
        session.close();
        assert!(!session.is_open());
        assert_eq!(session.platform().close_count(), 1);
        assert!(!session.platform().is_window_open());
    }

    #[test]
    fn test_access_after_close() {
        let mut session = open(4, 4, 1);
        session.close();

        assert!(matches!(session.frame(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.set(0, 0, 1), Err(FensterError::ClosedSession)));
        assert!(matches!(session.get(0, 0), Err(FensterError::ClosedSession)));
        assert!(matches!(session.clear(0), Err(FensterError::ClosedSession)));
        assert!(matches!(session.delta(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.mouse_x(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.mouse_down(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.keys(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.width(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.title(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.target_fps(), Err(FensterError::ClosedSession)));
        assert!(matches!(session.canvas(), Err(FensterError::ClosedSession)));
    }

    #[test]
    fn test_display() {
        let mut session = Session::open(
            HeadlessPlatform::new(),
            &WindowOptions::new(8, 6).with_title("demo").with_scale(2),
        )
        .unwrap();
        assert_eq!(session.to_string(), "window (demo 8x6 @2x)");
        session.close();
        assert_eq!(session.to_string(), "window (closed)");
    }
}
