//! Host-side previews: render the panel to PNG (one frame) or APNG (a recorded show).
//!
//! Each visible cell becomes a soft round LED on a black background; filler LEDs are not
//! drawn. Colors are converted with [`ToRgb8`] and then darkened with an inverse gamma so the
//! image looks roughly like the panel does to the eye.
//!
//! [`PreviewSink`] is a [`DisplaySink`] that records every frame it is shown, so a whole
//! [`Show`](crate::show::Show) can be played on the host and written out with
//! [`write_frames_apng`].
#![cfg(feature = "host")]

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::error::PreviewFailure;
use crate::{Error, Result};
use crate::color::{Hsv, RGB8, ToRgb8};
use crate::matrix::{MatrixGeometry, PixelBuffer};
use crate::sink::DisplaySink;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// One frame as received by a [`PreviewSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedFrame<const SPAN: usize> {
    /// LEDs in string order, filler included.
    pub leds: [Hsv; SPAN],
    /// Brightness the frame was shown at.
    pub brightness: u8,
}

/// A [`DisplaySink`] that keeps every frame in memory instead of lighting LEDs.
#[derive(Clone, Debug)]
pub struct PreviewSink<const SPAN: usize> {
    geometry: MatrixGeometry,
    frames: Vec<RecordedFrame<SPAN>>,
}

impl<const SPAN: usize> PreviewSink<SPAN> {
    /// Create an empty recorder for a panel wired as `geometry`.
    #[must_use]
    pub const fn new(geometry: MatrixGeometry) -> Self {
        assert!(
            geometry.span() == SPAN,
            "geometry span (W*H + H*F) must equal the buffer SPAN"
        );
        Self {
            geometry,
            frames: Vec::new(),
        }
    }

    /// Geometry used to lay the recorded frames back out as a grid.
    #[must_use]
    pub const fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    /// Everything shown so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[RecordedFrame<SPAN>] {
        &self.frames
    }

    /// Write the recorded frames as a looping APNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Preview`](crate::Error::Preview) if the file cannot be written.
    pub fn write_apng(
        &self,
        output_path: impl AsRef<Path>,
        target_max_dimension: u32,
        frame_delay_ms: u16,
    ) -> Result<()> {
        let frames: Vec<[Hsv; SPAN]> = self.frames.iter().map(|frame| frame.leds).collect();
        write_frames_apng(
            self.geometry,
            &frames,
            output_path,
            target_max_dimension,
            frame_delay_ms,
        )
    }
}

impl<const SPAN: usize> DisplaySink<SPAN> for PreviewSink<SPAN> {
    async fn show(&mut self, leds: &[Hsv; SPAN], brightness: u8) -> Result<()> {
        self.frames.push(RecordedFrame {
            leds: *leds,
            brightness,
        });
        Ok(())
    }
}

/// Render a [`PixelBuffer`] into a PNG file no larger than `target_max_dimension` on a side.
///
/// # Errors
///
/// Returns [`Error::Preview`](crate::Error::Preview) if the file cannot be created or encoded.
pub fn write_frame_png<const SPAN: usize>(
    pixel_buffer: &PixelBuffer<SPAN>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<()> {
    write_frame_png_with_gamma(
        pixel_buffer,
        output_path,
        target_max_dimension,
        PREVIEW_INVERSE_GAMMA,
    )
}

/// Like [`write_frame_png`], with a custom preview inverse gamma (`1.0` keeps colors as-is).
///
/// # Errors
///
/// Returns [`Error::Preview`](crate::Error::Preview) if the file cannot be created or encoded.
pub fn write_frame_png_with_gamma<const SPAN: usize>(
    pixel_buffer: &PixelBuffer<SPAN>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    preview_inverse_gamma: f32,
) -> Result<()> {
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let geometry = pixel_buffer.geometry();
    let cell_size = select_cell_size(
        u32::from(geometry.width()),
        u32::from(geometry.height()),
        target_max_dimension,
    );
    let grid = grid_colors(geometry, pixel_buffer.leds());
    let (width, height, pixels) = panel_pixels(
        geometry,
        &grid,
        cell_size,
        led_margin(cell_size),
        preview_inverse_gamma,
    );

    create_parent_dir(output_path)?;
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render frames (LEDs in string order) into a looping APNG file.
///
/// # Errors
///
/// Returns [`Error::Preview`](crate::Error::Preview) if the file cannot be created or encoded.
pub fn write_frames_apng<const SPAN: usize>(
    geometry: MatrixGeometry,
    frames: &[[Hsv; SPAN]],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u16,
) -> Result<()> {
    assert!(!frames.is_empty(), "frames must not be empty");
    assert!(frame_delay_ms > 0, "frame_delay_ms must be positive");
    assert!(geometry.span() == SPAN, "geometry span must equal the frame SPAN");
    let frame_count =
        u32::try_from(frames.len()).map_err(|_| Error::Preview(PreviewFailure::Encoding))?;
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(
        u32::from(geometry.width()),
        u32::from(geometry.height()),
        target_max_dimension,
    );
    let led_margin = led_margin(cell_size);

    let mut width = 0;
    let mut height = 0;
    let mut pixels = Vec::with_capacity(frames.len());
    for leds in frames {
        let grid = grid_colors(geometry, leds);
        let (frame_width, frame_height, frame_pixels) =
            panel_pixels(geometry, &grid, cell_size, led_margin, PREVIEW_INVERSE_GAMMA);
        width = frame_width;
        height = frame_height;
        pixels.push(frame_pixels);
    }

    create_parent_dir(output_path)?;
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for frame_pixels in pixels {
        writer.set_frame_delay(frame_delay_ms, 1000)?;
        writer.write_image_data(&frame_pixels)?;
    }
    writer.finish()?;
    println!("wrote APNG to {}", output_path.display());
    Ok(())
}

fn create_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Visible cells in row-major order, looked up through the wiring.
fn grid_colors<const SPAN: usize>(geometry: MatrixGeometry, leds: &[Hsv; SPAN]) -> Vec<RGB8> {
    geometry
        .cells()
        .map(|(x_index, y_index)| {
            leds.get(geometry.xy(x_index, y_index))
                .copied()
                .unwrap_or(Hsv::BLACK)
                .to_rgb8()
        })
        .collect()
}

fn led_margin(cell_size: u32) -> u32 {
    (cell_size / 8).max(1)
}

fn select_cell_size(panel_width: u32, panel_height: u32, target_max_dimension: u32) -> u32 {
    assert!(target_max_dimension > 0, "target_max_dimension must be positive");
    let mut cell_size = target_max_dimension;
    while cell_size > 1 {
        let led_margin = led_margin(cell_size);
        let led_radius = cell_size.saturating_sub(led_margin * 2) / 2;
        let output_width = panel_width * cell_size + led_radius * 2;
        let output_height = panel_height * cell_size + led_radius * 2;
        if output_width.max(output_height) <= target_max_dimension {
            break;
        }
        cell_size -= 1;
    }
    cell_size
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "preview sizes are small; pixel math stays well inside each type's range"
)]
fn panel_pixels(
    geometry: MatrixGeometry,
    grid: &[RGB8],
    cell_size: u32,
    led_margin: u32,
    preview_inverse_gamma: f32,
) -> (u32, u32, Vec<u8>) {
    assert!(cell_size > 0, "cell_size must be positive");
    assert!(led_margin < cell_size / 2, "led_margin must fit inside cell");
    let led_radius = (cell_size - (led_margin * 2)) / 2;
    assert!(led_radius > 0, "led_radius must be positive");
    let fade_width = (led_radius / 3).max(1);

    let panel_width = u32::from(geometry.width());
    let panel_height = u32::from(geometry.height());
    let border = led_radius;
    let width = panel_width * cell_size + border * 2;
    let height = panel_height * cell_size + border * 2;
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];
    let center = (cell_size - 1) as i32 / 2;
    let led_radius_f = led_radius as f32;
    let inner_radius_f = led_radius.saturating_sub(fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);

    for ((x_index, y_index), pixel) in geometry.cells().zip(grid) {
        let cell_origin_x = u32::from(x_index) * cell_size;
        let cell_origin_y = u32::from(y_index) * cell_size;
        let channels = [pixel.r, pixel.g, pixel.b]
            .map(|channel| inverse_gamma_to_linear(channel, preview_inverse_gamma));

        for local_y in 0..cell_size {
            let delta_y = local_y as i32 - center;
            for local_x in 0..cell_size {
                let delta_x = local_x as i32 - center;
                let distance_sq = delta_x * delta_x + delta_y * delta_y;
                if distance_sq > radius_sq {
                    continue;
                }
                let distance = (distance_sq as f32).sqrt();
                let intensity = if distance <= inner_radius_f {
                    1.0
                } else {
                    let fade_span = led_radius_f - inner_radius_f;
                    (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                };
                let x = border + cell_origin_x + local_x;
                let y = border + cell_origin_y + local_y;
                let pixel_index = ((y * width + x) * 3 * 2) as usize;
                for (channel_index, linear) in channels.iter().enumerate() {
                    let [high, low] = linear_to_u16(linear * intensity).to_be_bytes();
                    bytes[pixel_index + channel_index * 2] = high;
                    bytes[pixel_index + channel_index * 2 + 1] = low;
                }
            }
        }
    }

    (width, height, bytes)
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0.0..=65535.0 before the cast"
)]
fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}
