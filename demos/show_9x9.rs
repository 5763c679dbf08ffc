#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    clocks::RoscRng,
    peripherals::PIO0,
    pio::{InterruptHandler, Pio},
    pio_programs::ws2812::{PioWs2812, PioWs2812Program},
};
use embassy_time::Delay;
use glow_matrix::{
    Result,
    led_strip::Ws2812Sink,
    matrix::MatrixGeometry,
    show::Show,
    sink::{Current, Gamma, worst_case_milliamps},
};
use {defmt_rtt as _, panic_probe as _};

// 9x9 panel wired as a snake, with one unlit LED of slack at the end of every row.
const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
const SPAN: usize = GEOMETRY.span();

// Full white would draw 5.4 A; the supply gets 1 A.
const MAX_CURRENT: Current = Current::Milliamps(1000);
const BRIGHTNESS: u8 = MAX_CURRENT.max_brightness(worst_case_milliamps(SPAN));

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

#[cfg(feature = "pico2")]
#[allow(unsafe_code, reason = "the boot ROM looks for the image definition in .start_block")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Nice trick: Two "mains" let's us use Results.
#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Data in on GPIO4.
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let driver =
        PioWs2812::<PIO0, 0, SPAN, _>::new(&mut common, sm0, p.DMA_CH0, p.PIN_4, &program);
    let sink = Ws2812Sink::new(driver, Gamma::Gamma2_2);

    defmt::info!("show_9x9: {} LEDs at brightness {}", SPAN, BRIGHTNESS);
    let mut show = Show::<SPAN, _, _, _>::new(GEOMETRY, sink, Delay, RoscRng, BRIGHTNESS);
    show.run().await
}
