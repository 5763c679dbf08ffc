//! The WS2812 display sink: drives the matrix's LED string from one PIO state machine.
//!
//! Construct the embassy [`PioWs2812`] driver for your pin, PIO, and DMA channel, then wrap it
//! in a [`Ws2812Sink`]. The sink converts each [`Hsv`] to `RGB8`, folds gamma and brightness
//! into one table lookup per channel, and lets the driver handle color order and timing.
//!
//! See `demos/show_9x9.rs` for a complete firmware.

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::{PioWs2812, RgbColorOrder};

use crate::Result;
use crate::color::{Hsv, RGB8};
use crate::sink::{Correction, DisplaySink, Gamma};

/// [`DisplaySink`] for a NeoPixel-style (WS2812) string on a PIO state machine.
pub struct Ws2812Sink<'d, PIO, const SM: usize, const N: usize, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    driver: PioWs2812<'d, PIO, SM, N, ORDER>,
    correction: Correction,
}

impl<'d, PIO, const SM: usize, const N: usize, ORDER> Ws2812Sink<'d, PIO, SM, N, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    /// Wrap a ready driver; every frame is corrected with `gamma`.
    #[must_use]
    pub fn new(driver: PioWs2812<'d, PIO, SM, N, ORDER>, gamma: Gamma) -> Self {
        info!("Ws2812Sink::new: {} LEDs, gamma {}", N, gamma);
        Self {
            driver,
            correction: Correction::new(gamma),
        }
    }
}

impl<PIO, const SM: usize, const N: usize, ORDER> DisplaySink<N>
    for Ws2812Sink<'_, PIO, SM, N, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    async fn show(&mut self, leds: &[Hsv; N], brightness: u8) -> Result<()> {
        let mut frame = [RGB8::default(); N];
        self.correction.apply(leds, brightness, &mut frame);
        self.driver.write(&frame).await;
        Ok(())
    }
}
