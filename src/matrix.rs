//! The LED matrix: its wiring geometry and the pixel buffer generators paint into.
//!
//! [`MatrixGeometry`] turns `(x, y)` into positions on the LED string. [`PixelBuffer`] holds
//! one [`Hsv`] per LED on the string plus a safety slot, and addresses pixels through the
//! geometry's safe mapping so drawing code never has to bounds-check.
//!
//! # Example
//!
//! ```rust
//! use glow_matrix::color::Hsv;
//! use glow_matrix::matrix::{MatrixGeometry, PixelBuffer};
//!
//! const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
//! const SPAN: usize = GEOMETRY.span();
//!
//! let mut pixel_buffer = PixelBuffer::<SPAN>::new(GEOMETRY);
//!
//! // Row 1 runs right-to-left, with one filler LED at the end of row 0.
//! pixel_buffer[(0, 1)] = Hsv::RED;
//! assert_eq!(pixel_buffer.leds()[18], Hsv::RED);
//!
//! // Off-panel writes land in the safety slot and never reach an LED.
//! pixel_buffer[(40, 2)] = Hsv::WHITE;
//! assert_eq!(pixel_buffer.safety_slot(), Hsv::WHITE);
//! assert_eq!(pixel_buffer[(0, 200)], Hsv::WHITE);
//! ```

pub mod geometry;

pub use geometry::{MatrixGeometry, SAFETY_INDEX};

use core::convert::Infallible;
use core::ops::{Index, IndexMut};

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};

use crate::color::Hsv;

/// One color per LED on the string, plus a safety slot for off-panel writes.
///
/// `SPAN` is the full string length, filler LEDs included; it must equal the geometry's
/// [`span`](MatrixGeometry::span). The buffer is a plain value: allocate it once, then hand
/// `&mut` to generators and `&` to the display sink.
///
/// Conceptually the storage is `SPAN + 1` slots long. Slot 0 is the safety slot and LED `i`
/// lives in slot `i + 1`, so a mapped index of [`SAFETY_INDEX`] (`-1`) lands on the safety
/// slot. The visible view ([`leds`](Self::leds)) starts after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer<const SPAN: usize> {
    geometry: MatrixGeometry,
    safety: Hsv,
    leds: [Hsv; SPAN],
}

impl<const SPAN: usize> PixelBuffer<SPAN> {
    /// Create an all-black buffer for `geometry`.
    ///
    /// Panics (a compile error in `const` context) when the geometry's span is not `SPAN`.
    #[must_use]
    pub const fn new(geometry: MatrixGeometry) -> Self {
        assert!(
            geometry.span() == SPAN,
            "geometry span (W*H + H*F) must equal the buffer SPAN"
        );
        assert!(SPAN < isize::MAX as usize, "SPAN must fit in isize");
        Self {
            geometry,
            safety: Hsv::BLACK,
            leds: [Hsv::BLACK; SPAN],
        }
    }

    /// Geometry this buffer was built for.
    #[must_use]
    pub const fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    /// The visible view: one color per LED in string order, filler LEDs included.
    #[must_use]
    pub const fn leds(&self) -> &[Hsv; SPAN] {
        &self.leds
    }

    /// Mutable visible view, in string order.
    pub const fn leds_mut(&mut self) -> &mut [Hsv; SPAN] {
        &mut self.leds
    }

    /// Whatever was last written off the panel.
    #[must_use]
    pub const fn safety_slot(&self) -> Hsv {
        self.safety
    }

    /// Color at `(x, y)`; off-panel coordinates read the safety slot.
    #[must_use]
    pub fn get(&self, x_index: u16, y_index: u16) -> Hsv {
        *self.slot(self.geometry.xy_safe(x_index, y_index))
    }

    /// Set `(x, y)`; off-panel coordinates write the safety slot.
    pub fn set(&mut self, x_index: u16, y_index: u16, color: Hsv) {
        *self.pixel_mut(x_index, y_index) = color;
    }

    /// Mutable access to `(x, y)`; off-panel coordinates yield the safety slot.
    pub fn pixel_mut(&mut self, x_index: u16, y_index: u16) -> &mut Hsv {
        let mapped = self.geometry.xy_safe(x_index, y_index);
        self.slot_mut(mapped)
    }

    /// Turn every LED off, filler and safety slot included.
    pub fn clear(&mut self) {
        self.leds = [Hsv::BLACK; SPAN];
        self.safety = Hsv::BLACK;
    }

    // Storage slot = mapped + 1. Slot 0 (mapped == SAFETY_INDEX) is the safety slot.
    fn slot(&self, mapped: isize) -> &Hsv {
        match usize::try_from(mapped).ok().and_then(|led_index| self.leds.get(led_index)) {
            Some(led) => led,
            None => &self.safety,
        }
    }

    fn slot_mut(&mut self, mapped: isize) -> &mut Hsv {
        match usize::try_from(mapped)
            .ok()
            .and_then(|led_index| self.leds.get_mut(led_index))
        {
            Some(led) => led,
            None => &mut self.safety,
        }
    }
}

impl<const SPAN: usize> Index<(u16, u16)> for PixelBuffer<SPAN> {
    type Output = Hsv;

    fn index(&self, (x_index, y_index): (u16, u16)) -> &Self::Output {
        self.slot(self.geometry.xy_safe(x_index, y_index))
    }
}

impl<const SPAN: usize> IndexMut<(u16, u16)> for PixelBuffer<SPAN> {
    fn index_mut(&mut self, (x_index, y_index): (u16, u16)) -> &mut Self::Output {
        self.pixel_mut(x_index, y_index)
    }
}

impl<const SPAN: usize> OriginDimensions for PixelBuffer<SPAN> {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.geometry.width()),
            u32::from(self.geometry.height()),
        )
    }
}

/// Draw with [`embedded-graphics`](https://docs.rs/embedded-graphics) primitives in HSV.
///
/// Points off the panel (negative, or past the edge) are written to the safety slot like
/// any other off-panel write.
impl<const SPAN: usize> DrawTarget for PixelBuffer<SPAN> {
    type Color = Hsv;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let x_index = u16::try_from(coord.x).unwrap_or(u16::MAX);
            let y_index = u16::try_from(coord.y).unwrap_or(u16::MAX);
            self.set(x_index, y_index, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MatrixGeometry, PixelBuffer};
    use crate::color::Hsv;

    const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(3, 2, 1);
    const SPAN: usize = GEOMETRY.span();

    #[test]
    fn filler_leds_are_never_addressed() {
        let mut pixel_buffer = PixelBuffer::<SPAN>::new(GEOMETRY);
        for (x_index, y_index) in GEOMETRY.cells() {
            pixel_buffer.set(x_index, y_index, Hsv::WHITE);
        }
        // 3×2 with one filler per row: LEDs 3 and 7 are filler.
        assert_eq!(pixel_buffer.leds()[3], Hsv::BLACK);
        assert_eq!(pixel_buffer.leds()[7], Hsv::BLACK);
        assert_eq!(
            pixel_buffer.leds().iter().filter(|led| **led == Hsv::WHITE).count(),
            6
        );
    }

    #[test]
    fn off_panel_writes_share_one_slot() {
        let mut pixel_buffer = PixelBuffer::<SPAN>::new(GEOMETRY);
        let before = *pixel_buffer.leds();
        pixel_buffer.set(3, 0, Hsv::RED);
        pixel_buffer.set(0, 2, Hsv::WHITE);
        assert_eq!(*pixel_buffer.leds(), before);
        assert_eq!(pixel_buffer.get(500, 500), Hsv::WHITE);
        assert_eq!(pixel_buffer.safety_slot(), Hsv::WHITE);
    }

    #[test]
    fn clear_resets_safety_slot() {
        let mut pixel_buffer = PixelBuffer::<SPAN>::new(GEOMETRY);
        pixel_buffer[(9, 9)] = Hsv::RED;
        pixel_buffer[(1, 1)] = Hsv::RED;
        pixel_buffer.clear();
        assert_eq!(pixel_buffer, PixelBuffer::<SPAN>::new(GEOMETRY));
    }

    #[test]
    #[should_panic(expected = "geometry span (W*H + H*F) must equal the buffer SPAN")]
    fn new_panics_on_span_mismatch() {
        let _ = PixelBuffer::<6>::new(GEOMETRY);
    }
}
