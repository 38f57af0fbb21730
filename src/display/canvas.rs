// Canvas - Scaled pixel storage for the window
//
// The caller addresses a logical width×height grid. Each logical pixel is
// backed by a scale×scale block of physical cells in a row-major buffer of
// (width * scale) × (height * scale) packed RGB values.

use super::color::{check_color, BLACK};
use crate::error::{FensterError, Result};

/// Maximum logical width/height of a canvas
pub const MAX_DIMENSION: i64 = 15360;

/// Scaled frame buffer
///
/// Reading any cell of a block yields the last color written to the logical
/// pixel that owns it.
pub struct Canvas {
    width: usize,
    height: usize,
    scale: usize,
    /// Physical cells, row-major, `physical_width * physical_height` long
    pixels: Vec<u32>,
}

impl Canvas {
    /// Create a canvas filled with black
    ///
    /// # Arguments
    /// * `width` - Logical width (1-15360)
    /// * `height` - Logical height (1-15360)
    /// * `scale` - Magnification factor, a power of two
    ///
    /// # Errors
    /// `InvalidDimension`, `InvalidScale`, or `AllocationFailure` when the
    /// physical buffer cannot be reserved
    pub fn new(width: i64, height: i64, scale: i64) -> Result<Self> {
        let width = check_dimension(width)?;
        let height = check_dimension(height)?;
        let scale = check_scale(scale)?;

        let cells = (width as u128 * height as u128)
            .checked_mul(scale as u128 * scale as u128)
            .unwrap_or(u128::MAX);
        let len = usize::try_from(cells).map_err(|_| FensterError::AllocationFailure { cells })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| FensterError::AllocationFailure { cells })?;
        pixels.resize(len, BLACK);

        tracing::debug!(width, height, scale, cells = len, "allocated canvas");

        Ok(Self {
            width,
            height,
            scale,
            pixels,
        })
    }

    /// Logical width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Logical height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Scale factor
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Width of the physical buffer
    pub fn physical_width(&self) -> usize {
        self.width * self.scale
    }

    /// Height of the physical buffer
    pub fn physical_height(&self) -> usize {
        self.height * self.scale
    }

    /// Set a logical pixel
    ///
    /// Writes `color` into every cell of the scale×scale block at
    /// `(x * scale, y * scale)`. Nothing is written if any argument is invalid.
    ///
    /// # Errors
    /// `OutOfRange` for coordinates outside the canvas, `InvalidColor` for
    /// colors outside 0x000000-0xFFFFFF
    pub fn set(&mut self, x: i64, y: i64, color: i64) -> Result<()> {
        let (x, y) = self.check_coordinates(x, y)?;
        let color = check_color(color)?;

        let stride = self.physical_width();
        let x_begin = x * self.scale;
        let y_begin = y * self.scale;
        for row in y_begin..y_begin + self.scale {
            let start = row * stride + x_begin;
            self.pixels[start..start + self.scale].fill(color);
        }
        Ok(())
    }

    /// Get a logical pixel
    ///
    /// Reads the top-left cell of the pixel's block.
    ///
    /// # Errors
    /// `OutOfRange` for coordinates outside the canvas
    pub fn get(&self, x: i64, y: i64) -> Result<u32> {
        let (x, y) = self.check_coordinates(x, y)?;
        Ok(self.pixels[self.cell_index(x, y)])
    }

    /// Fill the whole physical buffer with a color
    ///
    /// # Errors
    /// `InvalidColor` for colors outside 0x000000-0xFFFFFF
    pub fn clear(&mut self, color: i64) -> Result<()> {
        let color = check_color(color)?;
        self.pixels.fill(color);
        Ok(())
    }

    /// Fill the whole physical buffer with black
    pub fn clear_black(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// Physical buffer, row-major
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Convert the canvas to RGB888 bytes at logical resolution
    ///
    /// One sample is taken per logical pixel, so the output is
    /// `width * height * 3` bytes long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.pixels[self.cell_index(x, y)];
                rgb.push((color >> 16) as u8); // R
                rgb.push((color >> 8) as u8); // G
                rgb.push(color as u8); // B
            }
        }
        rgb
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        (y * self.scale) * self.physical_width() + x * self.scale
    }

    fn check_coordinates(&self, x: i64, y: i64) -> Result<(usize, usize)> {
        let in_range = |v: i64, limit: usize| v >= 0 && (v as u64) < limit as u64;
        if in_range(x, self.width) && in_range(y, self.height) {
            Ok((x as usize, y as usize))
        } else {
            Err(FensterError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale", &self.scale)
            .field("cells", &self.pixels.len())
            .finish()
    }
}

/// Validate a logical width or height
pub fn check_dimension(value: i64) -> Result<usize> {
    if value > 0 && value <= MAX_DIMENSION {
        Ok(value as usize)
    } else {
        Err(FensterError::InvalidDimension {
            value,
            max: MAX_DIMENSION,
        })
    }
}

/// Validate a scale factor (positive power of two)
pub fn check_scale(scale: i64) -> Result<usize> {
    if scale > 0 && (scale & (scale - 1)) == 0 {
        Ok(scale as usize)
    } else {
        Err(FensterError::InvalidScale(scale))
    }
}
