// Common test utilities for session integration tests
//
// Sessions here run on the headless platform so time and input are scripted.

#![allow(dead_code)]

use fenster_rs::{HeadlessPlatform, Session, WindowOptions};

/// Clock reading at which test sessions start
pub const START_TIME_MS: u64 = 1_000;

/// Open a headless session with the given logical size and scale at 60 FPS
pub fn open_session(width: i64, height: i64, scale: i64) -> Session<HeadlessPlatform> {
    let options = WindowOptions::new(width, height).with_scale(scale);
    open_with(&options)
}

/// Open a headless session with explicit options
pub fn open_with(options: &WindowOptions) -> Session<HeadlessPlatform> {
    Session::open(HeadlessPlatform::with_time(START_TIME_MS), options)
        .expect("Failed to open headless session")
}

/// Read the physical cell at (px, py) from the last presented frame
pub fn presented_cell(session: &Session<HeadlessPlatform>, px: usize, py: usize) -> u32 {
    let (width, _) = session.platform().size();
    session.platform().presented_frame()[py * width + px]
}
