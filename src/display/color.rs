// Color helpers - 24-bit packed RGB conversions
//
// Colors are stored as 0xRRGGBB in the low 24 bits of a u32. The red
// component sits at bit offset 16, green at 8 and blue at 0.

use crate::error::{FensterError, Result};

/// Largest valid packed color value
pub const MAX_COLOR: i64 = 0xFF_FFFF;

/// Largest valid value of a single color component
pub const MAX_COLOR_COMPONENT: i64 = 0xFF;

/// Bit offset of the red component in a packed color
pub const COLOR_RED_OFFSET: u32 = 16;

/// Bit offset of the green component in a packed color
pub const COLOR_GREEN_OFFSET: u32 = 8;

/// Black (0x000000), the default clear color
pub const BLACK: u32 = 0x000000;

/// Check that a packed color is within 0x000000-0xFFFFFF
///
/// # Returns
/// The color narrowed to `u32`
pub fn check_color(color: i64) -> Result<u32> {
    if (0..=MAX_COLOR).contains(&color) {
        Ok(color as u32)
    } else {
        Err(FensterError::InvalidColor(color))
    }
}

fn check_component(component: i64) -> Result<u32> {
    if (0..=MAX_COLOR_COMPONENT).contains(&component) {
        Ok(component as u32)
    } else {
        Err(FensterError::InvalidColorComponent(component))
    }
}

/// Split a packed color into its (r, g, b) components
///
/// # Arguments
/// * `color` - Packed color (0x000000-0xFFFFFF)
///
/// # Returns
/// Tuple of red, green and blue components (0-255 each)
pub fn rgb_to_components(color: i64) -> Result<(u8, u8, u8)> {
    let color = check_color(color)?;
    Ok((
        (color >> COLOR_RED_OFFSET) as u8,
        (color >> COLOR_GREEN_OFFSET) as u8,
        color as u8,
    ))
}

/// Pack (r, g, b) components into a single color value
///
/// # Arguments
/// * `r`, `g`, `b` - Components (0-255 each)
///
/// # Returns
/// Packed color (0x000000-0xFFFFFF)
pub fn components_to_rgb(r: i64, g: i64, b: i64) -> Result<u32> {
    let r = check_component(r)?;
    let g = check_component(g)?;
    let b = check_component(b)?;
    Ok((r << COLOR_RED_OFFSET) | (g << COLOR_GREEN_OFFSET) | b)
}

/// Convert a packed RGB color to RGBA bytes with full opacity
#[inline]
pub fn rgb_to_rgba(color: u32) -> [u8; 4] {
    [
        (color >> COLOR_RED_OFFSET) as u8,
        (color >> COLOR_GREEN_OFFSET) as u8,
        color as u8,
        0xFF,
    ]
}
