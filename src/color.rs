//! The 8-bit HSV color stored in a [`PixelBuffer`](crate::matrix::PixelBuffer).
//!
//! Generators work in hue/saturation/value because every pattern in the show is a walk
//! around the color wheel. Sinks convert to `RGB8` just before correction and transmission.
//!
//! ```rust
//! use glow_matrix::color::{Hsv, ToRgb8, RGB8};
//!
//! assert_eq!(Hsv::BLACK.to_rgb8(), RGB8::new(0, 0, 0));
//! assert_eq!(Hsv::new(0, 0, 255).to_rgb8(), RGB8::new(255, 255, 255));
//! ```

use embedded_graphics::pixelcolor::PixelColor;
use smart_leds::hsv::hsv2rgb;

/// RGB color type sent to LED strips.
pub use smart_leds::RGB8;

/// Hue, saturation, value; each channel is a full byte.
///
/// Hue wraps: `0` and `255` sit next to each other on the wheel (red).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    /// Position on the color wheel.
    pub hue: u8,
    /// 0 is white/gray, 255 is fully saturated.
    pub sat: u8,
    /// 0 is off, 255 is full brightness.
    pub val: u8,
}

impl Hsv {
    /// All channels zero; the LED is off.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Fully saturated, full brightness red.
    pub const RED: Self = Self::new(0, 255, 255);
    /// Unsaturated, full brightness.
    pub const WHITE: Self = Self::new(0, 0, 255);

    /// Create a color from its three channels.
    #[must_use]
    pub const fn new(hue: u8, sat: u8, val: u8) -> Self {
        Self { hue, sat, val }
    }

    /// Fully saturated, full brightness color at `hue`.
    #[must_use]
    pub const fn from_hue(hue: u8) -> Self {
        Self::new(hue, 255, 255)
    }
}

impl From<(u8, u8, u8)> for Hsv {
    fn from((hue, sat, val): (u8, u8, u8)) -> Self {
        Self::new(hue, sat, val)
    }
}

impl From<Hsv> for smart_leds::hsv::Hsv {
    fn from(color: Hsv) -> Self {
        Self {
            hue: color.hue,
            sat: color.sat,
            val: color.val,
        }
    }
}

// No packed raw form; the buffer stores `Hsv` values directly.
impl PixelColor for Hsv {
    type Raw = ();
}

/// Convert colors to [`RGB8`] for LED strip rendering.
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for RGB8 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for Hsv {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        hsv2rgb(self.into())
    }
}
