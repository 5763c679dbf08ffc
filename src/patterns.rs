//! Stateless frame generators.
//!
//! Each generator paints into a [`PixelBuffer`] in place and keeps nothing between calls.
//! Cells are addressed through the geometry's safe mapping, so a row index past the bottom
//! of the panel touches only the safety slot. Filler LEDs are never written.
//!
//! Channel arithmetic is 8-bit and wraps modulo 256.
//!
//! # Example
//!
//! ```rust
//! use glow_matrix::color::Hsv;
//! use glow_matrix::matrix::{MatrixGeometry, PixelBuffer};
//! use glow_matrix::patterns;
//!
//! const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
//! let mut pixel_buffer = PixelBuffer::<{ GEOMETRY.span() }>::new(GEOMETRY);
//!
//! patterns::hue_gradient(&mut pixel_buffer);
//! assert_eq!(pixel_buffer[(0, 0)].hue, 0);
//! assert_eq!(pixel_buffer[(8, 8)].hue, 251);
//!
//! patterns::fill_row(&mut pixel_buffer, 2, Hsv::new(74, 255, 150));
//! assert_eq!(pixel_buffer[(4, 2)], Hsv::new(74, 255, 150));
//! ```

use rand::RngCore;

use crate::color::Hsv;
use crate::matrix::PixelBuffer;

/// Per-step signed change applied to each HSV channel by [`swept_hsv`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HsvDelta {
    /// Change in hue per step.
    pub hue: i8,
    /// Change in saturation per step.
    pub sat: i8,
    /// Change in value per step.
    pub val: i8,
}

impl HsvDelta {
    /// Create a delta from its three channels.
    #[must_use]
    pub const fn new(hue: i8, sat: i8, val: i8) -> Self {
        Self { hue, sat, val }
    }
}

/// Set every visible pixel to `color`.
pub fn fill_solid<const SPAN: usize>(pixel_buffer: &mut PixelBuffer<SPAN>, color: Hsv) {
    let geometry = pixel_buffer.geometry();
    for (x_index, y_index) in geometry.cells() {
        pixel_buffer.set(x_index, y_index, color);
    }
}

/// Blank the panel: every visible pixel black.
pub fn clear<const SPAN: usize>(pixel_buffer: &mut PixelBuffer<SPAN>) {
    fill_solid(pixel_buffer, Hsv::BLACK);
}

/// Set every pixel in `row` to `color`; other rows are left untouched.
pub fn fill_row<const SPAN: usize>(pixel_buffer: &mut PixelBuffer<SPAN>, row: u16, color: Hsv) {
    for x_index in 0..pixel_buffer.geometry().width() {
        pixel_buffer.set(x_index, row, color);
    }
}

/// Paint `row` with saturation falling by 15 per column: `S(col) = 255 - col*15`.
///
/// The subtraction wraps past column 17 (`255 - 18*15` becomes `241`), so wide panels
/// restart the ramp instead of clamping at white.
pub fn row_saturation_ramp<const SPAN: usize>(
    pixel_buffer: &mut PixelBuffer<SPAN>,
    row: u16,
    hue: u8,
    val: u8,
) {
    for x_index in 0..pixel_buffer.geometry().width() {
        pixel_buffer.set(x_index, row, Hsv::new(hue, saturation_ramp(x_index), val));
    }
}

/// Diagonal hue gradient: `H(x,y) = y*255/height + x*255/(height*width)`, full saturation and value.
///
/// Both divisions truncate.
pub fn hue_gradient<const SPAN: usize>(pixel_buffer: &mut PixelBuffer<SPAN>) {
    let geometry = pixel_buffer.geometry();
    let width = u32::from(geometry.width());
    let height = u32::from(geometry.height());
    for (x_index, y_index) in geometry.cells() {
        let hue = u32::from(y_index) * 255 / height + u32::from(x_index) * 255 / (height * width);
        pixel_buffer.set(x_index, y_index, Hsv::from_hue(narrow(hue)));
    }
}

/// Rainbow whose hue steps by 25.5 per row; every pixel in a row shares one hue.
pub fn vertical_rainbow<const SPAN: usize>(pixel_buffer: &mut PixelBuffer<SPAN>) {
    let geometry = pixel_buffer.geometry();
    for (x_index, y_index) in geometry.cells() {
        pixel_buffer.set(x_index, y_index, Hsv::from_hue(rainbow_hue(y_index)));
    }
}

/// Rainbow whose hue steps by 25.5 per column; every pixel in a column shares one hue.
pub fn horizontal_rainbow<const SPAN: usize>(pixel_buffer: &mut PixelBuffer<SPAN>) {
    let geometry = pixel_buffer.geometry();
    for (x_index, y_index) in geometry.cells() {
        pixel_buffer.set(x_index, y_index, Hsv::from_hue(rainbow_hue(x_index)));
    }
}

/// Give every pixel an independent random hue at full saturation and value.
pub fn random_fill<const SPAN: usize, R: RngCore + ?Sized>(
    pixel_buffer: &mut PixelBuffer<SPAN>,
    rng: &mut R,
) {
    let geometry = pixel_buffer.geometry();
    for (x_index, y_index) in geometry.cells() {
        pixel_buffer.set(x_index, y_index, Hsv::from_hue(random8(rng)));
    }
}

/// Overlay sparkles: each pixel is struck by `color` when `chance >= random byte`.
///
/// A `chance` of 0 never strikes. Pixels that are not struck keep whatever was drawn before,
/// so this composes on top of any other generator.
pub fn sparkle<const SPAN: usize, R: RngCore + ?Sized>(
    pixel_buffer: &mut PixelBuffer<SPAN>,
    rng: &mut R,
    chance: u8,
    color: Hsv,
) {
    let geometry = pixel_buffer.geometry();
    for (x_index, y_index) in geometry.cells() {
        // Draw for every pixel, struck or not, so the random stream advances uniformly.
        let draw = random8(rng);
        if chance > 0 && chance >= draw {
            pixel_buffer.set(x_index, y_index, color);
        }
    }
}

/// Hue sweep across both axes.
///
/// The row accumulator starts at `start_hue` and gains `row_delta` at the top of every row;
/// within a row the pixel accumulator starts from the row's value and gains `col_delta`
/// before each pixel. Everything wraps modulo 256.
pub fn swept_hue<const SPAN: usize>(
    pixel_buffer: &mut PixelBuffer<SPAN>,
    start_hue: u8,
    row_delta: i8,
    col_delta: i8,
) {
    let geometry = pixel_buffer.geometry();
    let mut line_start_hue = start_hue;
    for y_index in 0..geometry.height() {
        line_start_hue = line_start_hue.wrapping_add_signed(row_delta);
        let mut pixel_hue = line_start_hue;
        for x_index in 0..geometry.width() {
            pixel_hue = pixel_hue.wrapping_add_signed(col_delta);
            pixel_buffer.set(x_index, y_index, Hsv::from_hue(pixel_hue));
        }
    }
}

/// Like [`swept_hue`], with saturation and value swept independently alongside the hue.
pub fn swept_hsv<const SPAN: usize>(
    pixel_buffer: &mut PixelBuffer<SPAN>,
    start: Hsv,
    row_delta: HsvDelta,
    col_delta: HsvDelta,
) {
    let geometry = pixel_buffer.geometry();
    let mut line_start = start;
    for y_index in 0..geometry.height() {
        line_start = step(line_start, row_delta);
        let mut pixel = line_start;
        for x_index in 0..geometry.width() {
            pixel = step(pixel, col_delta);
            pixel_buffer.set(x_index, y_index, pixel);
        }
    }
}

const fn step(color: Hsv, delta: HsvDelta) -> Hsv {
    Hsv::new(
        color.hue.wrapping_add_signed(delta.hue),
        color.sat.wrapping_add_signed(delta.sat),
        color.val.wrapping_add_signed(delta.val),
    )
}

const fn saturation_ramp(column: u16) -> u8 {
    narrow(255u32.wrapping_sub((column as u32).wrapping_mul(15)))
}

/// `index * 25.5`, truncated, then narrowed to a byte.
fn rainbow_hue(index: u16) -> u8 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is non-negative and below 2^21; truncation is the intended rounding"
    )]
    let truncated = (f32::from(index) * 25.5) as u32;
    narrow(truncated)
}

/// Keep the low byte: modulo-256 wraparound.
#[allow(
    clippy::cast_possible_truncation,
    reason = "8-bit wraparound is the intended arithmetic"
)]
const fn narrow(value: u32) -> u8 {
    value as u8
}

fn random8<R: RngCore + ?Sized>(rng: &mut R) -> u8 {
    let [byte, ..] = rng.next_u32().to_le_bytes();
    byte
}
