//! A device abstraction for a 3-digit, 4-COM segment LCD driven from plain GPIO.
//!
//! The content ticker runs as an Embassy task on whatever executor it is given (an
//! [`InterruptExecutor`](embassy_executor::InterruptExecutor) keeps it preemptive),
//! and the refresh loop runs in thread mode with busy-wait dwells.
//!
//! See [`Lcd3`] for the main device abstraction and usage examples.

#[cfg(feature = "display-trace")]
use defmt::info;
use embassy_executor::SendSpawner;
use embassy_time::{Delay, Duration, Ticker};
use embedded_hal::digital::PinState;

use crate::Result;
use crate::content::{ContentGenerator, TICK_PERIOD_MS};
use crate::display_state::DisplayState;
use crate::refresh::{LcdBus, PinMode, Refresher};
use crate::wiring::{ComLine, SEG_PIN_COUNT};

// ============================================================================
// Pin Submodules
// ============================================================================

mod com_array;
mod output_array;
pub use com_array::ComArray;
pub use output_array::OutputArray;

// ============================================================================
// Lcd3Bus
// ============================================================================

/// The panel's COM and SEG pins as one [`LcdBus`].
pub struct Lcd3Bus<'a> {
    com_pins: ComArray<'a>,
    segment_pins: OutputArray<'a, SEG_PIN_COUNT>,
}

impl<'a> Lcd3Bus<'a> {
    #[must_use]
    pub const fn new(com_pins: ComArray<'a>, segment_pins: OutputArray<'a, SEG_PIN_COUNT>) -> Self {
        Self {
            com_pins,
            segment_pins,
        }
    }
}

impl LcdBus for Lcd3Bus<'_> {
    fn configure_com(&mut self, com: ComLine, mode: PinMode) {
        self.com_pins.configure(com, mode);
    }

    fn set_com_level(&mut self, com: ComLine, level: PinState) {
        self.com_pins.set_level(com, level);
    }

    fn set_segments(&mut self, high_mask: u8, low_mask: u8) {
        self.segment_pins.set_from_masks(high_mask, low_mask);
    }
}

// ============================================================================
// Lcd3 Virtual Device
// ============================================================================

/// Static for the [`Lcd3`] device: the masks shared by its two halves.
pub struct Lcd3Static(DisplayState);

impl Lcd3Static {
    const fn new() -> Self {
        Self(DisplayState::new())
    }

    const fn state(&'static self) -> &'static DisplayState {
        &self.0
    }
}

/// A device abstraction for a 3-digit, 4-COM segment LCD.
///
/// # Hardware Requirements
///
/// - 4 COM pins, wired COM1..COM4, each able to float (high impedance) or drive.
/// - 6 SEG pins, wired SEG1..SEG6, push-pull outputs.
///
/// # Example
///
/// ```no_run
/// #![no_std]
/// #![no_main]
///
/// use embassy_executor::SendSpawner;
/// use embassy_rp::gpio::{Flex, Level, Output};
/// use lcd_kit::board::PANEL_3D4C;
/// use lcd_kit::content::{ContentGenerator, CounterRadix, READY_COUNTDOWN};
/// use lcd_kit::lcd3::{ComArray, Lcd3, Lcd3Static, OutputArray};
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_: &PanicInfo) -> ! { loop {} }
///
/// fn example(p: embassy_rp::Peripherals, tick_spawner: SendSpawner) -> lcd_kit::Result<()> {
///     let com_pins = ComArray::new([
///         Flex::new(p.PIN_2),
///         Flex::new(p.PIN_3),
///         Flex::new(p.PIN_4),
///         Flex::new(p.PIN_5),
///     ]);
///     let segment_pins = OutputArray::new([
///         Output::new(p.PIN_6, Level::Low),
///         Output::new(p.PIN_7, Level::Low),
///         Output::new(p.PIN_8, Level::Low),
///         Output::new(p.PIN_9, Level::Low),
///         Output::new(p.PIN_10, Level::Low),
///         Output::new(p.PIN_11, Level::Low),
///     ]);
///
///     static LCD3_STATIC: Lcd3Static = Lcd3::new_static();
///     let generator = ContentGenerator::new(&PANEL_3D4C, &READY_COUNTDOWN, CounterRadix::Decimal);
///     let lcd3 = Lcd3::new(&LCD3_STATIC, generator, com_pins, segment_pins, tick_spawner)?;
///
///     // "LCD", "Rea", "dy ", a countdown, "Go", then 000, 001, ...
///     lcd3.run()
/// }
/// ```
#[must_use = "Must be run to keep the panel refreshed"]
pub struct Lcd3<'a>(Refresher<'a, Lcd3Bus<'a>, Delay>);

impl Lcd3<'static> {
    /// Creates static resources for the display.
    #[must_use]
    pub const fn new_static() -> Lcd3Static {
        Lcd3Static::new()
    }

    /// Spawns the content ticker on `tick_spawner` and readies the refresh loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker task cannot be spawned. On success the returned
    /// device must be [`run`](Self::run) to keep the panel refreshed.
    pub fn new(
        lcd3_static: &'static Lcd3Static,
        generator: ContentGenerator,
        com_pins: ComArray<'static>,
        segment_pins: OutputArray<'static, SEG_PIN_COUNT>,
        tick_spawner: SendSpawner,
    ) -> Result<Self> {
        let state = lcd3_static.state();
        let timing = generator.board().timing();
        #[cfg(feature = "display-trace")]
        info!(
            "lcd3 on {}: dwell {} us, {} mHz refresh",
            generator.board().name(),
            timing.dwell_us(),
            timing.refresh_millihz()
        );

        let token = tick_loop(state, generator)?;
        tick_spawner.spawn(token);

        let bus = Lcd3Bus::new(com_pins, segment_pins);
        Ok(Self(Refresher::new(bus, Delay, state, timing)))
    }

    /// Multiplexes the panel forever. Call last, from thread mode.
    pub fn run(self) -> ! {
        self.0.run()
    }
}

#[embassy_executor::task]
async fn tick_loop(state: &'static DisplayState, mut generator: ContentGenerator) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        generator.tick(state);
        ticker.next().await;
    }
}
