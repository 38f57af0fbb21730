// Canvas property tests
// Scaled writes, full-buffer clears and color conversions over random inputs

use fenster_rs::display::MAX_DIMENSION;
use fenster_rs::{components_to_rgb, rgb_to_components, Canvas, FensterError};
use proptest::prelude::*;

/// Every physical cell of the block backing logical pixel (x, y)
fn block_cells(canvas: &Canvas, x: usize, y: usize) -> impl Iterator<Item = u32> + '_ {
    let scale = canvas.scale();
    let stride = canvas.physical_width();
    (y * scale..(y + 1) * scale).flat_map(move |row| {
        (x * scale..(x + 1) * scale).map(move |col| canvas.as_slice()[row * stride + col])
    })
}

#[test]
fn test_scale_acceptance() {
    for scale in [1, 2, 4, 8, 16] {
        let canvas = Canvas::new(3, 2, scale).unwrap();
        assert_eq!(canvas.as_slice().len(), (3 * scale * 2 * scale) as usize);
    }
    for scale in [0, 3, 5, 6, -1, -4] {
        assert!(matches!(
            Canvas::new(3, 2, scale),
            Err(FensterError::InvalidScale(_))
        ));
    }
}

#[test]
fn test_dimension_limits() {
    assert!(Canvas::new(MAX_DIMENSION, 1, 1).is_ok());
    assert!(matches!(
        Canvas::new(MAX_DIMENSION + 1, 1, 1),
        Err(FensterError::InvalidDimension { .. })
    ));
}

#[test]
fn test_boundary_coordinates() {
    for scale in [1, 2, 4, 8] {
        let mut canvas = Canvas::new(13, 7, scale).unwrap();
        assert!(canvas.set(12, 6, 0xABCDEF).is_ok());
        assert_eq!(canvas.get(12, 6).unwrap(), 0xABCDEF);
        assert!(block_cells(&canvas, 12, 6).all(|c| c == 0xABCDEF));

        assert!(matches!(canvas.set(13, 0, 1), Err(FensterError::OutOfRange { .. })));
        assert!(matches!(canvas.set(0, 7, 1), Err(FensterError::OutOfRange { .. })));
        assert!(matches!(canvas.get(13, 6), Err(FensterError::OutOfRange { .. })));
        assert!(matches!(canvas.get(12, 7), Err(FensterError::OutOfRange { .. })));
    }
}

#[test]
fn test_clear_reaches_untouched_cells() {
    let mut canvas = Canvas::new(31, 17, 8).unwrap();
    canvas.set(5, 5, 0x010101).unwrap();
    canvas.clear(0xFEDCBA).unwrap();
    assert_eq!(canvas.as_slice().len(), 31 * 8 * 17 * 8);
    assert!(canvas.as_slice().iter().all(|&c| c == 0xFEDCBA));
}

proptest! {
    #[test]
    fn prop_set_replicates_block(
        w in 1i64..24, h in 1i64..24,
        scale in prop::sample::select(vec![1i64, 2, 4, 8]),
        seed_x in any::<u16>(), seed_y in any::<u16>(),
        color in 0i64..=0xFFFFFF
    ) {
        let mut canvas = Canvas::new(w, h, scale).unwrap();
        let x = seed_x as i64 % w;
        let y = seed_y as i64 % h;
        canvas.set(x, y, color).unwrap();

        prop_assert_eq!(canvas.get(x, y).unwrap() as i64, color);
        prop_assert!(block_cells(&canvas, x as usize, y as usize).all(|c| c as i64 == color));
    }

    #[test]
    fn prop_set_leaves_other_pixels(
        w in 2i64..16, h in 2i64..16,
        scale in prop::sample::select(vec![1i64, 2, 4]),
        color in 1i64..=0xFFFFFF
    ) {
        let mut canvas = Canvas::new(w, h, scale).unwrap();
        canvas.set(0, 0, color).unwrap();
        let touched = canvas.as_slice().iter().filter(|&&c| c as i64 == color).count();
        prop_assert_eq!(touched as i64, scale * scale);
    }

    #[test]
    fn prop_out_of_range_never_mutates(
        w in 1i64..16, h in 1i64..16,
        dx in 0i64..8, dy in 0i64..8
    ) {
        let mut canvas = Canvas::new(w, h, 2).unwrap();
        let before = canvas.as_slice().to_vec();
        prop_assert!(canvas.set(w + dx, dy, 0xFFFFFF).is_err());
        prop_assert!(canvas.set(dx, h + dy, 0xFFFFFF).is_err());
        prop_assert!(canvas.set(-1 - dx, 0, 0xFFFFFF).is_err());
        prop_assert_eq!(canvas.as_slice(), &before[..]);
    }

    #[test]
    fn prop_clear_fills_buffer(
        w in 1i64..24, h in 1i64..24,
        scale in prop::sample::select(vec![1i64, 2, 4, 8]),
        color in 0i64..=0xFFFFFF
    ) {
        let mut canvas = Canvas::new(w, h, scale).unwrap();
        canvas.clear(color).unwrap();
        prop_assert!(canvas.as_slice().iter().all(|&c| c as i64 == color));
    }

    #[test]
    fn prop_color_round_trips(r in 0i64..=255, g in 0i64..=255, b in 0i64..=255) {
        let color = components_to_rgb(r, g, b).unwrap();
        let (r2, g2, b2) = rgb_to_components(color as i64).unwrap();
        prop_assert_eq!((r2 as i64, g2 as i64, b2 as i64), (r, g, b));
        prop_assert_eq!(components_to_rgb(r2 as i64, g2 as i64, b2 as i64).unwrap(), color);
    }
}
