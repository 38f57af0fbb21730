// Desktop platform - A real window using winit and pixels
//
// The session drives the event loop itself: every poll presents the buffer
// through a pixels surface and pumps pending winit events without blocking.
// The window is requested at the physical buffer size and cannot be resized.
// The OS may still hand back a different surface size (HiDPI, Wayland), so
// cursor positions are mapped through the pixels surface onto buffer cells.

use super::{keys, Platform, RawInput, WindowSpec, MOD_ALT, MOD_CONTROL, MOD_GUI, MOD_SHIFT};
use crate::display::{rgb_to_rgba, Clock, SystemClock};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{ModifiersState, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Errors reported by the desktop platform
#[derive(Debug, Error)]
pub enum WinitError {
    /// The event loop could not be created
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// The OS refused to create the window
    #[error("window creation failed: {0}")]
    Window(String),

    /// The pixel surface could not be created
    #[error("pixel surface error: {0}")]
    Pixels(String),

    /// A window is already open on this platform
    #[error("a window is already open")]
    AlreadyOpen,
}

/// Window state touched by the winit event handler
#[derive(Default)]
struct WindowState {
    /// Pending window attributes (title, physical width, physical height)
    request: Option<(String, u32, u32)>,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    input: RawInput,
    close_requested: bool,
    error: Option<WinitError>,
}

impl WindowState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WinitError> {
        let Some((title, width, height)) = self.request.take() else {
            return Ok(());
        };

        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| WinitError::Window(e.to_string()))?;

        // Wrap window in Arc for shared ownership with the surface
        let window = Arc::new(window);
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = Pixels::new(width, height, surface_texture)
            .map_err(|e| WinitError::Pixels(e.to_string()))?;

        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.request.is_none() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.error = Some(e);
        }
    }

    fn set_key(&mut self, physical_key: PhysicalKey, pressed: bool) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if let Some(code) = keys::from_winit(key_code) {
                self.input.keys[code] = pressed;
            }
        }
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.ensure_window(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Covers windows requested after the loop has already resumed
        self.ensure_window(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::debug!("close requested");
                self.close_requested = true;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                self.set_key(physical_key, state == ElementState::Pressed);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.input.modifiers = modifier_bits(modifiers.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let window_pos = (position.x as f32, position.y as f32);
                let (x, y) = match &self.pixels {
                    Some(pixels) => buffer_position(pixels.window_pos_to_pixel(window_pos)),
                    None => (position.x.max(0.0) as i32, position.y.max(0.0) as i32),
                };
                self.input.mouse_x = x;
                self.input.mouse_y = y;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.input.mouse_down = state == ElementState::Pressed;
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows
                self.input.keys = [false; keys::KEY_COUNT];
                self.input.mouse_down = false;
            }
            _ => {}
        }
    }
}

/// Buffer coordinates of a cursor mapped through the pixels surface
///
/// Positions outside the buffer keep their (possibly negative) cell offset.
fn buffer_position(mapped: Result<(usize, usize), (isize, isize)>) -> (i32, i32) {
    let saturate = |v: isize| i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX });
    match mapped {
        Ok((x, y)) => (
            i32::try_from(x).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MAX),
        ),
        Err((x, y)) => (saturate(x), saturate(y)),
    }
}

/// Convert winit modifier state to a modifier bitmask
fn modifier_bits(state: ModifiersState) -> u8 {
    let mut bits = 0;
    if state.control_key() {
        bits |= MOD_CONTROL;
    }
    if state.shift_key() {
        bits |= MOD_SHIFT;
    }
    if state.alt_key() {
        bits |= MOD_ALT;
    }
    if state.super_key() {
        bits |= MOD_GUI;
    }
    bits
}

/// Desktop platform backed by winit and pixels
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    state: WindowState,
    clock: SystemClock,
}

impl WinitPlatform {
    /// Create the platform and its event loop
    ///
    /// Only one event loop may exist per process.
    pub fn new() -> Result<Self, WinitError> {
        Ok(Self {
            event_loop: EventLoop::new().map_err(|e| WinitError::EventLoop(e.to_string()))?,
            state: WindowState::default(),
            clock: SystemClock::new(),
        })
    }

    /// Process pending events without blocking
    fn pump(&mut self) -> PumpStatus {
        self.event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state)
    }

    /// Copy the frame into the pixel surface and render it
    fn present(&mut self, frame: &[u32]) -> Result<(), pixels::Error> {
        if let Some(pixels) = &mut self.state.pixels {
            let target = pixels.frame_mut();
            for (rgba, &color) in target.chunks_exact_mut(4).zip(frame) {
                rgba.copy_from_slice(&rgb_to_rgba(color));
            }
            pixels.render()?;
        }
        Ok(())
    }
}

impl Clock for WinitPlatform {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn sleep_ms(&mut self, milliseconds: u64) {
        self.clock.sleep_ms(milliseconds);
    }
}

impl Platform for WinitPlatform {
    type Error = WinitError;

    fn open(&mut self, spec: &WindowSpec<'_>) -> Result<(), Self::Error> {
        if self.state.window.is_some() {
            return Err(WinitError::AlreadyOpen);
        }

        let size = |v: usize| {
            u32::try_from(v).map_err(|_| WinitError::Window(format!("size {} too large", v)))
        };
        self.state.request = Some((
            spec.title.to_string(),
            size(spec.width)?,
            size(spec.height)?,
        ));
        self.state.input = RawInput::new();
        self.state.close_requested = false;

        // The window is created from inside the event loop once it resumes
        if let PumpStatus::Exit(code) = self.pump() {
            return Err(WinitError::Window(format!("event loop exited ({})", code)));
        }
        if let Some(e) = self.state.error.take() {
            return Err(e);
        }
        if self.state.window.is_none() {
            self.state.request = None;
            return Err(WinitError::Window("window was not created".to_string()));
        }
        Ok(())
    }

    fn poll(&mut self, frame: &[u32]) -> bool {
        if self.state.window.is_none() || self.state.close_requested {
            return false;
        }

        if let Err(e) = self.present(frame) {
            tracing::warn!(error = %e, "render failed");
            return false;
        }

        if let PumpStatus::Exit(_) = self.pump() {
            return false;
        }
        !self.state.close_requested
    }

    fn input(&self) -> &RawInput {
        &self.state.input
    }

    fn close(&mut self) {
        // The surface borrows the window, so drop it first
        self.state.pixels = None;
        self.state.window = None;
        self.state.request = None;
    }
}
