//! The animation sequencer: a fixed script of generators, frame pushes, and pauses.
//!
//! One pass of [`Show::run_once`] plays, in order:
//!
//! 1. random colors
//! 2. pollution: gray smog settling over a rainbow
//! 3. alert: red flashes alternating with a red border
//! 4. pink sparkles
//! 5. blue sparkles with a sweeping highlight row
//! 6. closing gradients: hue gradient, rainbow, row sweep, then a moving hue sweep
//! 7. fade-out: an HSV sweep whose value steps down toward black each frame
//!
//! [`Show::run`] first plays a short light check ([`Show::startup_check`]), then repeats the
//! script forever. The only suspension points are frame pushes and pauses.
//!
//! # Example
//!
//! ```rust
//! use glow_matrix::Result;
//! use glow_matrix::color::Hsv;
//! use glow_matrix::matrix::MatrixGeometry;
//! use glow_matrix::show::Show;
//! use glow_matrix::sink::DisplaySink;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
//! const SPAN: usize = GEOMETRY.span();
//!
//! struct CountingSink(usize);
//!
//! impl DisplaySink<SPAN> for CountingSink {
//!     async fn show(&mut self, _leds: &[Hsv; SPAN], _brightness: u8) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! struct NoDelay;
//!
//! impl embedded_hal_async::delay::DelayNs for NoDelay {
//!     async fn delay_ns(&mut self, _ns: u32) {}
//! }
//!
//! let mut sink = CountingSink(0);
//! let mut show =
//!     Show::<SPAN, _, _, _>::new(GEOMETRY, &mut sink, NoDelay, SmallRng::seed_from_u64(7), 64);
//! embassy_futures::block_on(show.run_once())?;
//! let frames_per_show = show.frames_per_show();
//! drop(show);
//! assert_eq!(sink.0, frames_per_show);
//! # Ok::<(), glow_matrix::Error>(())
//! ```

use core::convert::Infallible;

use embedded_graphics::Drawable;
use embedded_graphics::geometry::{OriginDimensions, Point};
use embedded_graphics::primitives::{Primitive, PrimitiveStyle, Rectangle};
use embedded_hal_async::delay::DelayNs;
use rand::RngCore;

use crate::Result;
use crate::color::Hsv;
use crate::matrix::{MatrixGeometry, PixelBuffer};
use crate::patterns::{self, HsvDelta};
use crate::sink::DisplaySink;

/// The parts of one show pass, in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Independent random hue per pixel.
    RandomColors,
    /// Gray sparkles accumulating over a rainbow.
    Pollution,
    /// Red flashes.
    Alert,
    /// Pink twinkles on black.
    PinkSparkle,
    /// Light-blue twinkles over dark blue with a moving ramp row.
    BlueSparkle,
    /// Gradient, rainbow, row sweep, and hue sweep.
    GradientSweep,
    /// Sweep fading to black.
    FadeOut,
}

impl Step {
    /// Every step, in play order.
    pub const ALL: [Self; 7] = [
        Self::RandomColors,
        Self::Pollution,
        Self::Alert,
        Self::PinkSparkle,
        Self::BlueSparkle,
        Self::GradientSweep,
        Self::FadeOut,
    ];
}

// Script timings (milliseconds) and lengths.
const RANDOM_FRAMES: usize = 5;
const RANDOM_PAUSE_MS: u32 = 400;

const POLLUTION_FRAMES: usize = 40;
const POLLUTION_CHANCE: u8 = 12;
const POLLUTION_COLOR: Hsv = Hsv::new(32, 40, 90);
const POLLUTION_PAUSE_MS: u32 = 60;

const ALERT_FLASHES: usize = 6;
const ALERT_PAUSE_MS: u32 = 200;

const PINK_FRAMES: usize = 30;
const PINK_CHANCE: u8 = 30;
const PINK: Hsv = Hsv::new(224, 180, 255);
const PINK_PAUSE_MS: u32 = 80;

const BLUE_FRAMES: usize = 27;
const BLUE_CHANCE: u8 = 50;
const BLUE_BACKGROUND: Hsv = Hsv::new(160, 255, 40);
const BLUE_SPARK: Hsv = Hsv::new(160, 120, 255);
const BLUE_HUE: u8 = 160;
const BLUE_PAUSE_MS: u32 = 80;

const GRADIENT_HOLD_MS: u32 = 1000;
const ROW_SWEEP_COLOR: Hsv = Hsv::new(74, 255, 150);
const ROW_SWEEP_PAUSE_MS: u32 = 100;
const SWEEP_FRAMES: usize = 64;
const SWEEP_HUE_STEP: u8 = 4;
const SWEEP_ROW_DELTA: i8 = 8;
const SWEEP_COL_DELTA: i8 = 16;
const SWEEP_PAUSE_MS: u32 = 30;

const FADE_FRAMES: usize = 32;
const FADE_VAL_STEP: u8 = 8;
const FADE_ROW_DELTA: HsvDelta = HsvDelta::new(8, -6, 0);
const FADE_COL_DELTA: HsvDelta = HsvDelta::new(4, -3, 0);
const FADE_PAUSE_MS: u32 = 40;
const FADE_END_PAUSE_MS: u32 = 500;

// Light check at power-on.
const STATUS_COLORS: [Hsv; 3] = [
    Hsv::new(160, 255, 255), // blue
    Hsv::new(96, 255, 255),  // green
    Hsv::new(42, 255, 255),  // yellow
];
const STATUS_PAUSE_MS: u32 = 1000;
const BLINKS: usize = 3;
const BLINK_PAUSE_MS: u32 = 300;

/// Frames pushed by [`Show::startup_check`].
pub const STARTUP_FRAMES: usize = 1 + STATUS_COLORS.len() + 2 * BLINKS + 1;

/// Plays the fixed script into a display sink.
///
/// Owns the pixel buffer; the sink, delay, and random source are borrowed or owned as the
/// caller prefers (`&mut` works for each).
pub struct Show<const SPAN: usize, S, D, R> {
    pixel_buffer: PixelBuffer<SPAN>,
    sink: S,
    delay: D,
    rng: R,
    brightness: u8,
    frame_count: u64,
}

impl<const SPAN: usize, S, D, R> Show<SPAN, S, D, R>
where
    S: DisplaySink<SPAN>,
    D: DelayNs,
    R: RngCore,
{
    /// Create a show over a black buffer for `geometry`.
    ///
    /// Panics when `geometry.span()` differs from `SPAN`.
    #[must_use]
    pub fn new(geometry: MatrixGeometry, sink: S, delay: D, rng: R, brightness: u8) -> Self {
        Self {
            pixel_buffer: PixelBuffer::new(geometry),
            sink,
            delay,
            rng,
            brightness,
            frame_count: 0,
        }
    }

    /// The buffer as last pushed (or being built).
    #[must_use]
    pub const fn pixel_buffer(&self) -> &PixelBuffer<SPAN> {
        &self.pixel_buffer
    }

    /// Frames pushed to the sink so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames one [`run_once`](Self::run_once) pushes for this geometry.
    #[must_use]
    pub fn frames_per_show(&self) -> usize {
        Step::ALL
            .iter()
            .map(|step| self.frames_in(*step))
            .sum()
    }

    /// Frames a single step pushes for this geometry.
    #[must_use]
    pub fn frames_in(&self, step: Step) -> usize {
        match step {
            Step::RandomColors => RANDOM_FRAMES,
            Step::Pollution => 1 + POLLUTION_FRAMES,
            Step::Alert => 2 * ALERT_FLASHES,
            Step::PinkSparkle => PINK_FRAMES,
            Step::BlueSparkle => BLUE_FRAMES,
            Step::GradientSweep => {
                2 + usize::from(self.pixel_buffer.geometry().height()) + SWEEP_FRAMES
            }
            Step::FadeOut => FADE_FRAMES + 1,
        }
    }

    /// Play the light check once, then the script forever.
    ///
    /// # Errors
    ///
    /// Returns the first sink error; the show stops there.
    pub async fn run(&mut self) -> Result<Infallible> {
        self.startup_check().await?;
        loop {
            self.run_once().await?;
        }
    }

    /// Blank, show each status color, blink white three times, blank again.
    ///
    /// # Errors
    ///
    /// Returns the first sink error.
    pub async fn startup_check(&mut self) -> Result<()> {
        info!("Show::startup_check: starting");
        self.clear_and_present(0).await?;
        for status_color in STATUS_COLORS {
            self.fill_and_present(status_color, STATUS_PAUSE_MS).await?;
        }
        for _ in 0..BLINKS {
            self.clear_and_present(BLINK_PAUSE_MS).await?;
            self.fill_and_present(Hsv::WHITE, BLINK_PAUSE_MS).await?;
        }
        self.clear_and_present(0).await?;
        info!("Show::startup_check: done");
        Ok(())
    }

    /// Play every [`Step`] once, in order.
    ///
    /// # Errors
    ///
    /// Returns the first sink error.
    pub async fn run_once(&mut self) -> Result<()> {
        for step in Step::ALL {
            info!("Show::run_once: step {}", step);
            self.play(step).await?;
        }
        debug!("Show::run_once: done, {} frames so far", self.frame_count);
        Ok(())
    }

    /// Play one step.
    ///
    /// # Errors
    ///
    /// Returns the first sink error.
    pub async fn play(&mut self, step: Step) -> Result<()> {
        match step {
            Step::RandomColors => self.random_colors().await,
            Step::Pollution => self.pollution().await,
            Step::Alert => self.alert().await,
            Step::PinkSparkle => self.pink_sparkle().await,
            Step::BlueSparkle => self.blue_sparkle().await,
            Step::GradientSweep => self.gradient_sweep().await,
            Step::FadeOut => self.fade_out().await,
        }
    }

    async fn random_colors(&mut self) -> Result<()> {
        for _ in 0..RANDOM_FRAMES {
            patterns::random_fill(&mut self.pixel_buffer, &mut self.rng);
            self.present(RANDOM_PAUSE_MS).await?;
        }
        Ok(())
    }

    async fn pollution(&mut self) -> Result<()> {
        patterns::vertical_rainbow(&mut self.pixel_buffer);
        self.present(POLLUTION_PAUSE_MS).await?;
        for _ in 0..POLLUTION_FRAMES {
            patterns::sparkle(
                &mut self.pixel_buffer,
                &mut self.rng,
                POLLUTION_CHANCE,
                POLLUTION_COLOR,
            );
            self.present(POLLUTION_PAUSE_MS).await?;
        }
        Ok(())
    }

    async fn alert(&mut self) -> Result<()> {
        for _ in 0..ALERT_FLASHES {
            self.fill_and_present(Hsv::RED, ALERT_PAUSE_MS).await?;

            patterns::clear(&mut self.pixel_buffer);
            let border = Rectangle::new(Point::zero(), self.pixel_buffer.size());
            border
                .into_styled(PrimitiveStyle::with_stroke(Hsv::RED, 1))
                .draw(&mut self.pixel_buffer)
                .unwrap_or_else(|never| match never {});
            self.present(ALERT_PAUSE_MS).await?;
        }
        Ok(())
    }

    async fn pink_sparkle(&mut self) -> Result<()> {
        for _ in 0..PINK_FRAMES {
            patterns::clear(&mut self.pixel_buffer);
            patterns::sparkle(&mut self.pixel_buffer, &mut self.rng, PINK_CHANCE, PINK);
            self.present(PINK_PAUSE_MS).await?;
        }
        Ok(())
    }

    async fn blue_sparkle(&mut self) -> Result<()> {
        let height = self.pixel_buffer.geometry().height();
        let mut highlight_row = 0;
        for _ in 0..BLUE_FRAMES {
            patterns::fill_solid(&mut self.pixel_buffer, BLUE_BACKGROUND);
            patterns::row_saturation_ramp(&mut self.pixel_buffer, highlight_row, BLUE_HUE, 255);
            patterns::sparkle(
                &mut self.pixel_buffer,
                &mut self.rng,
                BLUE_CHANCE,
                BLUE_SPARK,
            );
            self.present(BLUE_PAUSE_MS).await?;
            highlight_row = (highlight_row + 1) % height;
        }
        Ok(())
    }

    async fn gradient_sweep(&mut self) -> Result<()> {
        patterns::hue_gradient(&mut self.pixel_buffer);
        self.present(GRADIENT_HOLD_MS).await?;
        patterns::horizontal_rainbow(&mut self.pixel_buffer);
        self.present(GRADIENT_HOLD_MS).await?;

        for row in 0..self.pixel_buffer.geometry().height() {
            patterns::fill_row(&mut self.pixel_buffer, row, ROW_SWEEP_COLOR);
            self.present(ROW_SWEEP_PAUSE_MS).await?;
        }

        let mut start_hue: u8 = 0;
        for _ in 0..SWEEP_FRAMES {
            patterns::swept_hue(
                &mut self.pixel_buffer,
                start_hue,
                SWEEP_ROW_DELTA,
                SWEEP_COL_DELTA,
            );
            self.present(SWEEP_PAUSE_MS).await?;
            start_hue = start_hue.wrapping_add(SWEEP_HUE_STEP);
        }
        Ok(())
    }

    async fn fade_out(&mut self) -> Result<()> {
        let mut start = Hsv::new(0, 255, 255);
        for _ in 0..FADE_FRAMES {
            patterns::swept_hsv(&mut self.pixel_buffer, start, FADE_ROW_DELTA, FADE_COL_DELTA);
            self.present(FADE_PAUSE_MS).await?;
            start = Hsv::new(
                start.hue.wrapping_add(FADE_VAL_STEP),
                start.sat,
                start.val.saturating_sub(FADE_VAL_STEP),
            );
        }
        self.clear_and_present(FADE_END_PAUSE_MS).await
    }

    async fn clear_and_present(&mut self, pause_ms: u32) -> Result<()> {
        patterns::clear(&mut self.pixel_buffer);
        self.present(pause_ms).await
    }

    async fn fill_and_present(&mut self, color: Hsv, pause_ms: u32) -> Result<()> {
        patterns::fill_solid(&mut self.pixel_buffer, color);
        self.present(pause_ms).await
    }

    async fn present(&mut self, pause_ms: u32) -> Result<()> {
        trace!("Show::present: frame {}", self.frame_count);
        self.sink
            .show(self.pixel_buffer.leds(), self.brightness)
            .await?;
        self.frame_count = self.frame_count.wrapping_add(1);
        if pause_ms > 0 {
            self.delay.delay_ms(pause_ms).await;
        }
        Ok(())
    }
}
