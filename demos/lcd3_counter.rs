//! Boot countdown, then a 000-999 counter, on a 3-digit 4-COM segment LCD.
//!
//! Wiring (Pico GPIO): COM1..COM4 on GP2..GP5, SEG1..SEG6 on GP6..GP11.
//! The content ticker runs on an interrupt executor so it preempts the refresh loop,
//! which busy-waits in thread mode.
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use lcd_kit::board::PANEL_3D4C;
use lcd_kit::content::{ContentGenerator, CounterRadix, READY_COUNTDOWN};
use lcd_kit::lcd3::{ComArray, Lcd3, Lcd3Static, OutputArray};
use panic_probe as _;

static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[allow(unsafe_code, reason = "Interrupt handler for the tick executor")]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: only this handler drives the executor.
    unsafe { TICK_EXECUTOR.on_interrupt() }
}

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().unwrap_err();
    panic!("{err}");
}

fn inner_main() -> lcd_kit::Result<core::convert::Infallible> {
    let p = embassy_rp::init(Default::default());

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let tick_spawner = TICK_EXECUTOR.start(interrupt::SWI_IRQ_1);

    let com_pins = ComArray::new([
        Flex::new(p.PIN_2),
        Flex::new(p.PIN_3),
        Flex::new(p.PIN_4),
        Flex::new(p.PIN_5),
    ]);
    let segment_pins = OutputArray::new([
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
    ]);

    static LCD3_STATIC: Lcd3Static = Lcd3::new_static();
    let generator = ContentGenerator::new(&PANEL_3D4C, &READY_COUNTDOWN, CounterRadix::Decimal);
    let lcd3 = Lcd3::new(&LCD3_STATIC, generator, com_pins, segment_pins, tick_spawner)?;

    info!("Refreshing {}", PANEL_3D4C.name());
    lcd3.run()
}
