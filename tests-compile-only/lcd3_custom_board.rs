//! Compile-only check: a board with its own bit order, wiring and timing, on Pico 1.
#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use lcd_kit::board::{Board, IdleCom, RefreshTiming};
use lcd_kit::content::{BootScript, ContentGenerator, CounterRadix};
use lcd_kit::glyph::BitOrder;
use lcd_kit::lcd3::{ComArray, Lcd3, Lcd3Static, OutputArray};
use lcd_kit::wiring::{ComLine, Extraction, WiringTable};
use lcd_kit::{Text, ascii_text};
use panic_probe as _;

const fn digit(odd: u8) -> [Extraction; 7] {
    let even = odd - 1;
    [
        Extraction::new(ComLine::Com1, odd, 3, 1),
        Extraction::new(ComLine::Com2, odd, 4, 1),
        Extraction::new(ComLine::Com2, even, 2, 1),
        Extraction::new(ComLine::Com3, odd, 6, 1),
        Extraction::new(ComLine::Com3, even, 1, 1),
        Extraction::new(ComLine::Com4, odd, 5, 1),
        Extraction::new(ComLine::Com4, even, 0, 1),
    ]
}

const DIGIT_1: [Extraction; 7] = digit(5);
const DIGIT_2: [Extraction; 7] = digit(3);
const DIGIT_3: [Extraction; 7] = digit(1);

static BOARD: Board = Board::new(
    "custom",
    BitOrder::LOGICAL,
    WiringTable::new([&DIGIT_1, &DIGIT_2, &DIGIT_3]),
    RefreshTiming::new(1_000, IdleCom::DriveInverted),
);

static HELLO: [Text; 2] = [ascii_text("HEL"), ascii_text("LO")];
static SCRIPT: BootScript = BootScript::new(&HELLO, 5);

static TICK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[allow(unsafe_code, reason = "Interrupt handler for the tick executor")]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: only this handler drives the executor.
    unsafe { TICK_EXECUTOR.on_interrupt() }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let tick_spawner = TICK_EXECUTOR.start(interrupt::SWI_IRQ_1);

    static LCD3_STATIC: Lcd3Static = Lcd3::new_static();
    let lcd3 = Lcd3::new(
        &LCD3_STATIC,
        ContentGenerator::new(&BOARD, &SCRIPT, CounterRadix::Hex),
        ComArray::new([
            Flex::new(p.PIN_12),
            Flex::new(p.PIN_13),
            Flex::new(p.PIN_14),
            Flex::new(p.PIN_15),
        ]),
        OutputArray::new([
            Output::new(p.PIN_16, Level::Low),
            Output::new(p.PIN_17, Level::Low),
            Output::new(p.PIN_18, Level::Low),
            Output::new(p.PIN_19, Level::Low),
            Output::new(p.PIN_20, Level::Low),
            Output::new(p.PIN_21, Level::Low),
        ]),
        tick_spawner,
    );
    match lcd3 {
        Ok(lcd3) => lcd3.run(),
        Err(err) => panic!("{err}"),
    }
}
