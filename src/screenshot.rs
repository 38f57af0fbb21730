// Screenshot functionality
//
// Captures the canvas at logical resolution and saves it as a PNG file.

use crate::config::ScreenshotConfig;
use crate::display::Canvas;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during screenshot operations
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

/// Save a screenshot of the canvas
///
/// One pixel is written per logical pixel, regardless of scale.
///
/// # Returns
///
/// The path of the saved file
///
/// # Example
///
/// ```no_run
/// use fenster_rs::config::ScreenshotConfig;
/// use fenster_rs::display::Canvas;
/// use fenster_rs::screenshot::save_screenshot;
///
/// let canvas = Canvas::new(64, 64, 2).unwrap();
/// let path = save_screenshot(&canvas, &ScreenshotConfig::default()).unwrap();
/// println!("Screenshot saved to: {}", path.display());
/// ```
pub fn save_screenshot(
    canvas: &Canvas,
    config: &ScreenshotConfig,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(&config.directory)?;

    let file_path = config.directory.join(screenshot_filename(config.include_timestamp));
    save_png(
        &file_path,
        &canvas.to_rgb_bytes(),
        canvas.width() as u32,
        canvas.height() as u32,
    )?;

    tracing::info!(path = %file_path.display(), "screenshot saved");
    Ok(file_path)
}

fn screenshot_filename(include_timestamp: bool) -> String {
    if include_timestamp {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("screenshot_{}.png", timestamp)
    } else {
        "screenshot.png".to_string()
    }
}

/// Save RGB data as a PNG file
///
/// # Arguments
///
/// * `path` - Path to save the PNG file
/// * `data` - RGB data (width × height × 3 bytes)
/// * `width` - Image width
/// * `height` - Image height
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
