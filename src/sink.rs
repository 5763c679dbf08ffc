//! Where finished frames go: the [`DisplaySink`] trait and the color correction sinks apply.
//!
//! A sink receives the buffer's visible view (one [`Hsv`] per LED on the string, filler
//! included) together with a brightness. Before transmitting it converts each color to
//! `RGB8` and passes every channel through one combined gamma + brightness lookup table
//! (see [`generate_combo_table`]).
//!
//! Brightness usually comes from a power budget rather than a guess: [`Current::max_brightness`]
//! scales so that a full-white frame stays within the budget.
//!
//! ```rust
//! use glow_matrix::sink::{Current, Gamma, generate_combo_table, worst_case_milliamps};
//!
//! // 90 LEDs at 60 mA each would draw 5.4 A at full white.
//! let brightness = Current::Milliamps(1000).max_brightness(worst_case_milliamps(90));
//! assert_eq!(brightness, 47);
//!
//! let combo_table = generate_combo_table(Gamma::Linear, 255);
//! assert_eq!(combo_table[200], 200);
//! ```

use crate::Result;
use crate::color::{Hsv, RGB8, ToRgb8};

/// Renders a frame of LEDs. Implemented by the WS2812 driver on the board and by recorders
/// in tests.
pub trait DisplaySink<const SPAN: usize> {
    /// Push `leds` (in string order) to the hardware at `brightness` (0 = off, 255 = full).
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be transmitted.
    async fn show(&mut self, leds: &[Hsv; SPAN], brightness: u8) -> Result<()>;
}

impl<const SPAN: usize, S: DisplaySink<SPAN>> DisplaySink<SPAN> for &mut S {
    async fn show(&mut self, leds: &[Hsv; SPAN], brightness: u8) -> Result<()> {
        (**self).show(leds, brightness).await
    }
}

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for LED strips.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `combo_table[input]` is `gamma(input) * brightness / 255`, so a sink does one lookup
/// per RGB channel at runtime.
#[must_use]
pub const fn generate_combo_table(gamma: Gamma, brightness: u8) -> [u8; 256] {
    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let gamma_corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        // Apply brightness scaling: (value * brightness) / 255
        let scaled = ((gamma_corrected as u16 * brightness as u16) / 255) as u8;
        result[index] = scaled;
        index += 1;
    }
    result
}

/// A combo table that is rebuilt only when the requested brightness changes.
#[derive(Clone, Debug)]
pub struct Correction {
    gamma: Gamma,
    brightness: u8,
    combo_table: [u8; 256],
}

impl Correction {
    /// Start at full brightness for `gamma`.
    #[must_use]
    pub const fn new(gamma: Gamma) -> Self {
        Self {
            gamma,
            brightness: u8::MAX,
            combo_table: generate_combo_table(gamma, u8::MAX),
        }
    }

    /// Gamma curve in use.
    #[must_use]
    pub const fn gamma(&self) -> Gamma {
        self.gamma
    }

    /// Convert and correct `leds` into `out` at `brightness`.
    pub fn apply<const N: usize>(&mut self, leds: &[Hsv; N], brightness: u8, out: &mut [RGB8; N]) {
        if brightness != self.brightness {
            trace!("Correction: rebuilding table for brightness {}", brightness);
            self.combo_table = generate_combo_table(self.gamma, brightness);
            self.brightness = brightness;
        }
        for (led, rgb) in leds.iter().zip(out.iter_mut()) {
            *rgb = apply_combo_table(led.to_rgb8(), &self.combo_table);
        }
    }
}

/// Pass each channel of `color` through `combo_table`.
#[must_use]
pub fn apply_combo_table(color: RGB8, combo_table: &[u8; 256]) -> RGB8 {
    let lookup = |channel: u8| combo_table.get(usize::from(channel)).copied().unwrap_or(channel);
    RGB8::new(lookup(color.r), lookup(color.g), lookup(color.b))
}

// ============================================================================
// Current budget
// ============================================================================

/// Milliamps one WS2812 LED draws at full white.
pub const MILLIAMPS_PER_LED: u32 = 60;

/// Worst-case draw of `led_count` LEDs all at full white.
#[must_use]
pub const fn worst_case_milliamps(led_count: usize) -> u32 {
    let led_count = if led_count > u32::MAX as usize / MILLIAMPS_PER_LED as usize {
        u32::MAX / MILLIAMPS_PER_LED
    } else {
        led_count as u32
    };
    led_count * MILLIAMPS_PER_LED
}

/// Power budget used to pick a brightness.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Current {
    /// Limit brightness to stay within a specific milliamp budget.
    ///
    /// The brightness is chosen so that the worst-case current (all LEDs at full white) does
    /// not exceed this limit. For example, the 90-LED panel draws 5.4 A at full brightness;
    /// a 1000 mA budget caps brightness at ~18%.
    Milliamps(u16),
    /// No limit; brightness stays at 100%.
    Unlimited,
}

impl Default for Current {
    fn default() -> Self {
        Self::Milliamps(250)
    }
}

impl Current {
    /// Calculate maximum brightness based on current budget and worst-case current draw.
    ///
    /// Returns 255 (full brightness) for Unlimited, or a scaled value for Milliamps.
    #[must_use]
    pub const fn max_brightness(self, worst_case_ma: u32) -> u8 {
        assert!(worst_case_ma > 0, "worst_case_ma must be positive");
        match self {
            Self::Milliamps(ma) => {
                let scale = (ma as u32 * 255) / worst_case_ma;
                if scale > 255 { 255 } else { scale as u8 }
            }
            Self::Unlimited => 255,
        }
    }
}
