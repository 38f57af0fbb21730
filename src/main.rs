// fenster-rs - Demo Entry Point
//
// Opens a desktop window configured from fenster.toml and runs a small paint
// demo: hold the left mouse button to draw, C clears, S saves a screenshot,
// Escape quits.

use fenster_rs::config::{FensterConfig, CONFIG_FILE};
use fenster_rs::platform::keys;
use fenster_rs::{components_to_rgb, save_screenshot, Platform, Session, WinitPlatform};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FensterConfig::load_or_default(CONFIG_FILE);
    tracing::info!(
        width = config.window.width,
        height = config.window.height,
        scale = config.window.scale,
        target_fps = config.window.target_fps,
        "configuration loaded from '{}'",
        CONFIG_FILE
    );

    let mut platform = WinitPlatform::new()?;
    let mut session = Session::open(&mut platform, &config.window.to_options())?;
    tracing::info!("{} - hold the mouse to paint, C clears, S saves, Esc quits", session);

    let width = session.width()? as i64;
    let height = session.height()? as i64;
    let mut hue: f64 = 0.0;
    let mut screenshot_held = false;

    draw_background(&mut session, width, height)?;

    while session.frame()? {
        let pressed = session.keys()?;
        if pressed[keys::ESCAPE] {
            break;
        }
        let clear_pressed = pressed[b'C' as usize];
        let screenshot_pressed = pressed[b'S' as usize];

        if clear_pressed {
            draw_background(&mut session, width, height)?;
        }

        // Save once per key press rather than every frame it is held
        if screenshot_pressed && !screenshot_held {
            match save_screenshot(session.canvas()?, &config.screenshot) {
                Ok(path) => println!("Screenshot saved to: {}", path.display()),
                Err(e) => tracing::warn!(error = %e, "screenshot failed"),
            }
        }
        screenshot_held = screenshot_pressed;

        hue = (hue + session.delta()? * 120.0) % 360.0;
        if session.mouse_down()? {
            let color = hue_to_rgb(hue)?;
            let (mx, my) = (session.mouse_x()?, session.mouse_y()?);
            let radius = if session.mod_shift()? { 4 } else { 1 };
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    // Brush pixels outside the canvas are skipped
                    let _ = session.set(mx + dx, my + dy, color);
                }
            }
        }
    }

    session.close();
    println!("Window closed.");
    Ok(())
}

/// Fill the canvas with a dark vertical gradient
fn draw_background<P: Platform>(
    session: &mut Session<P>,
    width: i64,
    height: i64,
) -> fenster_rs::Result<()> {
    for y in 0..height {
        let shade = 0x10 + (y * 0x30 / height);
        let color = components_to_rgb(shade / 2, shade / 2, shade)? as i64;
        for x in 0..width {
            session.set(x, y, color)?;
        }
    }
    Ok(())
}

/// Fully saturated color for a hue in degrees
fn hue_to_rgb(hue: f64) -> fenster_rs::Result<i64> {
    let sector = (hue / 60.0).floor() as i64 % 6;
    let fraction = hue / 60.0 - (hue / 60.0).floor();
    let rising = (fraction * 255.0) as i64;
    let falling = 255 - rising;
    let (r, g, b) = match sector {
        0 => (255, rising, 0),
        1 => (falling, 255, 0),
        2 => (0, 255, rising),
        3 => (0, falling, 255),
        4 => (rising, 0, 255),
        _ => (255, 0, falling),
    };
    Ok(components_to_rgb(r, g, b)? as i64)
}
