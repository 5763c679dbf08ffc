//! Pattern show for a serpentine-wired NeoPixel-style (WS2812) LED matrix on the Pico 1 and 2.
//!
//! The crate is split the way the data flows:
//!
//! - [`matrix`]: the panel geometry (`(x, y)` → LED index) and the [`PixelBuffer`](matrix::PixelBuffer)
//!   that generators paint into, including its single safety slot for off-panel writes.
//! - [`color`]: the 8-bit HSV color the buffer stores and its conversion to `RGB8`.
//! - [`patterns`]: stateless frame generators (fills, gradients, rainbows, sparkles).
//! - [`show`]: the fixed animation script that ties generators, a display sink, and a delay together.
//! - [`sink`]: the display-sink trait and the gamma/brightness correction every sink applies.
//! - `led_strip`: the WS2812 sink for real hardware (board builds only).
//!
//! # Glossary
//!
//! - **Span:** number of LEDs on the physical string, `W·H + H·F`, including unlit filler LEDs.
//! - **Filler LED:** an LED wired at the end of each row that is never part of the visible grid.
//! - **Safety slot:** one extra buffer entry that absorbs every off-panel write.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   Pico 1 has 2. Pico 2 has 3. The WS2812 sink uses one state machine.
#![cfg_attr(not(any(test, feature = "host")), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: at most one board may be selected
#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time checks: a board needs exactly one architecture
#[cfg(all(feature = "board", not(any(feature = "arm", feature = "riscv"))))]
compile_error!("Must enable exactly one architecture feature: 'arm' or 'riscv'");

#[cfg(all(feature = "arm", feature = "riscv"))]
compile_error!("Cannot enable both 'arm' and 'riscv' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

#[cfg(all(feature = "board", feature = "host"))]
compile_error!("The 'host' feature is for testing without hardware; do not combine it with a board");

// Must come first so the logging macros are visible in every module below.
#[macro_use]
mod fmt;

pub mod color;
mod error;
#[cfg(feature = "board")]
pub mod led_strip;
pub mod matrix;
pub mod patterns;
pub mod show;
pub mod sink;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
#[cfg(feature = "host")]
pub use crate::error::PreviewFailure;
