#![allow(missing_docs)]
//! Host-level tests for coordinate mapping and the pixel buffer.

use std::collections::HashSet;

use glow_matrix::color::Hsv;
use glow_matrix::matrix::{MatrixGeometry, PixelBuffer, SAFETY_INDEX};

const GEOMETRIES: [MatrixGeometry; 6] = [
    MatrixGeometry::serpentine(9, 9, 1),
    MatrixGeometry::serpentine(3, 2, 0),
    MatrixGeometry::serpentine(5, 4, 3),
    MatrixGeometry::serpentine(1, 7, 2),
    MatrixGeometry::progressive(12, 8),
    MatrixGeometry::new(4, 3, 2, false),
];

#[test]
fn mapping_is_injective_and_within_span() {
    for geometry in GEOMETRIES {
        let mut seen = HashSet::new();
        for (x_index, y_index) in geometry.cells() {
            let led_index = geometry.xy(x_index, y_index);
            assert!(led_index < geometry.span(), "{geometry:?} ({x_index}, {y_index})");
            assert!(seen.insert(led_index), "{geometry:?} maps two cells to {led_index}");
        }
        assert_eq!(seen.len(), geometry.cell_count());
    }
}

#[test]
fn progressive_is_row_major() {
    let geometry = MatrixGeometry::progressive(12, 8);
    for (x_index, y_index) in geometry.cells() {
        let expected = usize::from(y_index) * 12 + usize::from(x_index);
        assert_eq!(geometry.xy(x_index, y_index), expected);
    }
}

#[test]
fn serpentine_matches_row_formulas() {
    for geometry in GEOMETRIES.iter().filter(|geometry| geometry.is_serpentine()) {
        let width = usize::from(geometry.width());
        let filler = usize::from(geometry.filler_per_row());
        for (x_index, y_index) in geometry.cells() {
            let x = usize::from(x_index);
            let y = usize::from(y_index);
            let expected = if y % 2 == 0 {
                y * width + x + y * filler
            } else {
                y * width + (width - 1 - x) + y * filler
            };
            assert_eq!(geometry.xy(x_index, y_index), expected, "{geometry:?} ({x}, {y})");
        }
    }
}

#[test]
fn safe_mapping_returns_sentinel_off_panel() {
    for geometry in GEOMETRIES {
        let width = geometry.width();
        let height = geometry.height();
        for (x_index, y_index) in [
            (width, 0),
            (0, height),
            (width, height),
            (width + 5, height - 1),
            (u16::MAX, 0),
        ] {
            assert_eq!(geometry.xy_safe(x_index, y_index), SAFETY_INDEX);
        }
        for (x_index, y_index) in geometry.cells() {
            let mapped = geometry.xy_safe(x_index, y_index);
            assert_eq!(usize::try_from(mapped).ok(), Some(geometry.xy(x_index, y_index)));
        }
    }
}

#[test]
fn nine_by_nine_with_one_filler() {
    const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
    assert_eq!(GEOMETRY.span(), 90);
    assert_eq!(GEOMETRY.xy(0, 0), 0);
    assert_eq!(GEOMETRY.xy(8, 0), 8);
    assert_eq!(GEOMETRY.xy(0, 1), 18);
    assert_eq!(GEOMETRY.xy(8, 1), 10);

    // Filler LEDs sit at 9, 19, 29, ... and are never mapped.
    let mapped: HashSet<usize> = GEOMETRY
        .cells()
        .map(|(x_index, y_index)| GEOMETRY.xy(x_index, y_index))
        .collect();
    let unmapped: Vec<usize> = (0..GEOMETRY.span())
        .filter(|led_index| !mapped.contains(led_index))
        .collect();
    assert_eq!(unmapped, [9, 19, 29, 39, 49, 59, 69, 79, 89]);
}

#[test]
fn buffer_writes_follow_the_wiring() {
    const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
    let mut pixel_buffer = PixelBuffer::<{ GEOMETRY.span() }>::new(GEOMETRY);

    pixel_buffer[(8, 1)] = Hsv::RED;
    assert_eq!(pixel_buffer.leds()[10], Hsv::RED);
    assert_eq!(pixel_buffer.get(8, 1), Hsv::RED);

    *pixel_buffer.pixel_mut(0, 1) = Hsv::WHITE;
    assert_eq!(pixel_buffer.leds()[18], Hsv::WHITE);
}

#[test]
fn off_panel_reads_return_last_off_panel_write() {
    const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
    let mut pixel_buffer = PixelBuffer::<{ GEOMETRY.span() }>::new(GEOMETRY);
    let visible_before = *pixel_buffer.leds();

    pixel_buffer.set(9, 0, Hsv::new(1, 2, 3));
    pixel_buffer.set(0, 9, Hsv::new(4, 5, 6));

    // All off-panel coordinates share one slot, so every read sees the latest write.
    assert_eq!(pixel_buffer.get(100, 100), Hsv::new(4, 5, 6));
    assert_eq!(pixel_buffer[(9, 0)], Hsv::new(4, 5, 6));
    assert_eq!(*pixel_buffer.leds(), visible_before);
}
