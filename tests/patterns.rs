#![allow(missing_docs)]
//! Host-level tests for the frame generators.

use glow_matrix::color::Hsv;
use glow_matrix::matrix::{MatrixGeometry, PixelBuffer};
use glow_matrix::patterns::{self, HsvDelta};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
const SPAN: usize = GEOMETRY.span();
const FILLER_LEDS: [usize; 9] = [9, 19, 29, 39, 49, 59, 69, 79, 89];

fn pixel_buffer() -> PixelBuffer<SPAN> {
    PixelBuffer::new(GEOMETRY)
}

fn assert_filler_dark(pixel_buffer: &PixelBuffer<SPAN>) {
    for led_index in FILLER_LEDS {
        assert_eq!(pixel_buffer.leds()[led_index], Hsv::BLACK, "filler LED {led_index}");
    }
}

#[test]
fn fill_solid_lights_every_visible_led_only() {
    let mut pixel_buffer = pixel_buffer();
    patterns::fill_solid(&mut pixel_buffer, Hsv::WHITE);
    let lit = pixel_buffer.leds().iter().filter(|led| **led == Hsv::WHITE).count();
    assert_eq!(lit, 81);
    assert_filler_dark(&pixel_buffer);
}

#[test]
fn fill_row_changes_exactly_one_physical_row() {
    let mut pixel_buffer = pixel_buffer();
    patterns::hue_gradient(&mut pixel_buffer);
    let before = *pixel_buffer.leds();

    let color = Hsv::new(74, 255, 150);
    patterns::fill_row(&mut pixel_buffer, 2, color);

    let changed: Vec<usize> = (0..SPAN)
        .filter(|led_index| pixel_buffer.leds()[*led_index] != before[*led_index])
        .collect();
    // Row 2 is even: it runs forward from 2*9 + 2*1 = 20.
    assert_eq!(changed, (20..29).collect::<Vec<_>>());
    for led_index in changed {
        assert_eq!(pixel_buffer.leds()[led_index], color);
    }
}

#[test]
fn fill_row_past_the_bottom_touches_nothing_visible() {
    let mut pixel_buffer = pixel_buffer();
    patterns::fill_row(&mut pixel_buffer, 9, Hsv::WHITE);
    assert!(pixel_buffer.leds().iter().all(|led| *led == Hsv::BLACK));
    assert_eq!(pixel_buffer.safety_slot(), Hsv::WHITE);
}

#[test]
fn row_saturation_ramp_steps_down_by_fifteen() {
    let mut pixel_buffer = pixel_buffer();
    patterns::row_saturation_ramp(&mut pixel_buffer, 1, 160, 200);
    for x_index in 0..9 {
        let expected_sat = 255 - u8::try_from(x_index * 15).expect("fits");
        assert_eq!(pixel_buffer.get(x_index, 1), Hsv::new(160, expected_sat, 200));
    }
    assert_eq!(pixel_buffer.get(0, 0), Hsv::BLACK);
}

#[test]
fn hue_gradient_truncates() {
    let mut pixel_buffer = pixel_buffer();
    patterns::hue_gradient(&mut pixel_buffer);
    assert_eq!(pixel_buffer.get(0, 0), Hsv::from_hue(0));
    assert_eq!(pixel_buffer.get(1, 0), Hsv::from_hue(3));
    assert_eq!(pixel_buffer.get(0, 1), Hsv::from_hue(28));
    // 8*255/9 + 8*255/81 = 226 + 25
    assert_eq!(pixel_buffer.get(8, 8), Hsv::from_hue(251));
    assert_filler_dark(&pixel_buffer);
}

#[test]
fn rainbows_vary_along_one_axis() {
    let mut vertical = pixel_buffer();
    patterns::vertical_rainbow(&mut vertical);
    let mut horizontal = pixel_buffer();
    patterns::horizontal_rainbow(&mut horizontal);

    for (x_index, y_index) in GEOMETRY.cells() {
        assert_eq!(vertical.get(x_index, y_index), vertical.get(0, y_index));
        assert_eq!(horizontal.get(x_index, y_index), horizontal.get(x_index, 0));
        assert_eq!(vertical.get(x_index, y_index), horizontal.get(y_index, x_index));
    }
    assert_eq!(vertical.get(4, 3), Hsv::from_hue(76));
    assert_eq!(horizontal.get(8, 5), Hsv::from_hue(204));
}

#[test]
fn random_fill_is_saturated_and_varied() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut pixel_buffer = pixel_buffer();
    patterns::random_fill(&mut pixel_buffer, &mut rng);

    let mut hues = std::collections::HashSet::new();
    for (x_index, y_index) in GEOMETRY.cells() {
        let pixel = pixel_buffer.get(x_index, y_index);
        assert_eq!((pixel.sat, pixel.val), (255, 255));
        hues.insert(pixel.hue);
    }
    // 81 draws from 256 hues: a handful of collisions at most.
    assert!(hues.len() > 40, "only {} distinct hues", hues.len());
    assert_filler_dark(&pixel_buffer);
}

#[test]
fn sparkle_with_zero_chance_changes_nothing() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut pixel_buffer = pixel_buffer();
    patterns::vertical_rainbow(&mut pixel_buffer);
    let before = pixel_buffer.clone();

    for _ in 0..500 {
        patterns::sparkle(&mut pixel_buffer, &mut rng, 0, Hsv::WHITE);
    }
    assert_eq!(pixel_buffer, before);
}

#[test]
fn sparkle_with_full_chance_strikes_nearly_always() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut struck = 0usize;
    let trials = 200;
    for _ in 0..trials {
        let mut pixel_buffer = pixel_buffer();
        patterns::sparkle(&mut pixel_buffer, &mut rng, 255, Hsv::WHITE);
        struck += pixel_buffer.leds().iter().filter(|led| **led == Hsv::WHITE).count();
    }
    let draws = trials * 81;
    // At least 254/255 of the draws, with room for sampling noise.
    assert!(struck * 255 >= draws * 253, "{struck} of {draws}");
}

#[test]
fn sparkle_rate_tracks_chance() {
    let mut rng = SmallRng::seed_from_u64(3);
    let trials = 200;
    let mut struck = 0usize;
    for _ in 0..trials {
        let mut pixel_buffer = pixel_buffer();
        patterns::sparkle(&mut pixel_buffer, &mut rng, 63, Hsv::WHITE);
        assert_filler_dark(&pixel_buffer);
        struck += pixel_buffer.leds().iter().filter(|led| **led == Hsv::WHITE).count();
    }
    // Expect about a quarter of 16 200 draws (4 050); allow about 7 standard deviations.
    let draws = trials * 81;
    let expected = draws / 4;
    assert!(struck.abs_diff(expected) < 400, "{struck} struck, expected ~{expected}");
}

#[test]
fn sparkle_composes_over_existing_frame() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut pixel_buffer = pixel_buffer();
    patterns::horizontal_rainbow(&mut pixel_buffer);
    let before = pixel_buffer.clone();

    patterns::sparkle(&mut pixel_buffer, &mut rng, 40, Hsv::WHITE);
    for (x_index, y_index) in GEOMETRY.cells() {
        let pixel = pixel_buffer.get(x_index, y_index);
        assert!(pixel == Hsv::WHITE || pixel == before.get(x_index, y_index));
    }
}

#[test]
fn swept_hue_accumulates_per_row_and_column() {
    let mut pixel_buffer = pixel_buffer();
    patterns::swept_hue(&mut pixel_buffer, 0, 8, 16);
    assert_eq!(pixel_buffer.get(0, 0).hue, 24);
    assert_eq!(pixel_buffer.get(1, 0).hue, 40);
    assert_eq!(pixel_buffer.get(0, 1).hue, 32);
    // Row 8 starts at 9*8 = 72; pixel 8 adds 9*16 = 144.
    assert_eq!(pixel_buffer.get(8, 8).hue, 216);
}

#[test]
fn swept_hue_wraps_modulo_256() {
    let mut pixel_buffer = pixel_buffer();
    patterns::swept_hue(&mut pixel_buffer, 250, 4, 3);
    // 250 + 4 + 3 = 257 -> 1
    assert_eq!(pixel_buffer.get(0, 0).hue, 1);

    patterns::swept_hue(&mut pixel_buffer, 0, -1, -1);
    assert_eq!(pixel_buffer.get(0, 0).hue, 254);
}

#[test]
fn swept_hsv_moves_every_channel() {
    let mut pixel_buffer = pixel_buffer();
    patterns::swept_hsv(
        &mut pixel_buffer,
        Hsv::new(0, 255, 255),
        HsvDelta::new(8, -6, 0),
        HsvDelta::new(4, -3, -10),
    );
    assert_eq!(pixel_buffer.get(0, 0), Hsv::new(12, 246, 245));
    assert_eq!(pixel_buffer.get(1, 0), Hsv::new(16, 243, 235));
    assert_eq!(pixel_buffer.get(0, 1), Hsv::new(20, 240, 245));
    assert_filler_dark(&pixel_buffer);
}
