//! The multiplexing loop that keeps the panel lit.
//!
//! Each COM line in turn is driven through two phases of equal length:
//!
//! ```text
//!             phase 1            phase 2
//!  COM      ‾‾‾‾‾‾‾‾‾‾‾‾|____________          (then back to idle)
//!  SEG on   ____________|‾‾‾‾‾‾‾‾‾‾‾‾          -V, then +V across the stroke
//!  SEG off  ‾‾‾‾‾‾‾‾‾‾‾‾|____________           0, then  0
//! ```
//!
//! A lit stroke sees equal and opposite voltage in the two phases and an unlit stroke
//! sees none, so no stroke ever carries a net DC bias.
//!
//! With [`IdleCom::DriveInverted`] the other COM lines are driven too, always at the
//! opposite level to the selected one. Every SEG pin is high in exactly one of the
//! two phases, so those pairs also sum to zero over each line.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::board::{IdleCom, RefreshTiming};
use crate::display_state::DisplayState;
use crate::wiring::{ComLine, SEG_PIN_MASK};

/// How a COM pin is configured.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    DrivenOutput,
    FloatingInput,
}

/// The GPIO primitives the refresh loop needs. Writes cannot fail.
pub trait LcdBus {
    /// Switches a COM pin between push-pull output and high impedance.
    fn configure_com(&mut self, com: ComLine, mode: PinMode);

    /// Sets the output level of a COM pin.
    fn set_com_level(&mut self, com: ComLine, level: PinState);

    /// Drives SEG pins: bits set in `high_mask` high, bits set in `low_mask` low,
    /// others untouched. SEG1 is bit 0.
    fn set_segments(&mut self, high_mask: u8, low_mask: u8);
}

impl<T: LcdBus + ?Sized> LcdBus for &mut T {
    #[inline]
    fn configure_com(&mut self, com: ComLine, mode: PinMode) {
        T::configure_com(self, com, mode);
    }

    #[inline]
    fn set_com_level(&mut self, com: ComLine, level: PinState) {
        T::set_com_level(self, com, level);
    }

    #[inline]
    fn set_segments(&mut self, high_mask: u8, low_mask: u8) {
        T::set_segments(self, high_mask, low_mask);
    }
}

/// Sole reader of [`DisplayState`]; drives the pins forever.
///
/// Dwells are busy-waits on `delay`, so the two phases of a line stay the same length
/// no matter what else the system is doing.
pub struct Refresher<'a, B, D> {
    bus: B,
    delay: D,
    state: &'a DisplayState,
    timing: RefreshTiming,
}

impl<'a, B: LcdBus, D: DelayNs> Refresher<'a, B, D> {
    /// Puts every COM line in its idle state and every SEG pin low.
    pub fn new(bus: B, delay: D, state: &'a DisplayState, timing: RefreshTiming) -> Self {
        let mut refresher = Self {
            bus,
            delay,
            state,
            timing,
        };
        if timing.idle() == IdleCom::DriveInverted {
            for com in ComLine::ALL {
                refresher.bus.configure_com(com, PinMode::DrivenOutput);
            }
        }
        for com in ComLine::ALL {
            refresher.idle(com);
        }
        refresher.bus.set_segments(0, SEG_PIN_MASK);
        refresher
    }

    #[must_use]
    pub const fn timing(&self) -> RefreshTiming {
        self.timing
    }

    /// Both phases of one COM line, then back to idle.
    pub fn refresh_line(&mut self, com: ComLine) {
        let mask = self.state.load(com);
        let inverse = !mask & SEG_PIN_MASK;
        let dwell_us = self.timing.dwell_us();

        self.bus.configure_com(com, PinMode::DrivenOutput);

        self.drive_others(com, PinState::Low);
        self.bus.set_com_level(com, PinState::High);
        self.bus.set_segments(inverse, mask);
        self.delay.delay_us(dwell_us);

        self.drive_others(com, PinState::High);
        self.bus.set_com_level(com, PinState::Low);
        self.bus.set_segments(mask, inverse);
        self.delay.delay_us(dwell_us);

        self.idle(com);
    }

    /// One pass over all four COM lines.
    pub fn refresh_cycle(&mut self) {
        for com in ComLine::ALL {
            self.refresh_line(com);
        }
    }

    /// Refreshes until power-off.
    pub fn run(mut self) -> ! {
        loop {
            self.refresh_cycle();
        }
    }

    fn idle(&mut self, com: ComLine) {
        match self.timing.idle() {
            IdleCom::Floating => self.bus.configure_com(com, PinMode::FloatingInput),
            IdleCom::DriveInverted => self.bus.set_com_level(com, PinState::Low),
        }
    }

    /// Sets every COM line but `selected` to `level`. Floating lines are left alone.
    fn drive_others(&mut self, selected: ComLine, level: PinState) {
        if self.timing.idle() != IdleCom::DriveInverted {
            return;
        }
        for com in ComLine::ALL {
            if com != selected {
                self.bus.set_com_level(com, level);
            }
        }
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::board::{PANEL_3D4C, PANEL_3D4C_LOGICAL};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Configure(ComLine, PinMode),
        Level(ComLine, PinState),
        Segments(u8, u8),
        Delay(u32),
    }

    struct Recorder {
        calls: [Option<Call>; 32],
        len: usize,
    }

    impl Recorder {
        const fn new() -> Self {
            Self {
                calls: [None; 32],
                len: 0,
            }
        }

        fn push(&mut self, call: Call) {
            self.calls[self.len] = Some(call);
            self.len += 1;
        }
    }

    struct Bus<'r>(&'r core::cell::RefCell<Recorder>);

    impl LcdBus for Bus<'_> {
        fn configure_com(&mut self, com: ComLine, mode: PinMode) {
            self.0.borrow_mut().push(Call::Configure(com, mode));
        }
        fn set_com_level(&mut self, com: ComLine, level: PinState) {
            self.0.borrow_mut().push(Call::Level(com, level));
        }
        fn set_segments(&mut self, high_mask: u8, low_mask: u8) {
            self.0.borrow_mut().push(Call::Segments(high_mask, low_mask));
        }
    }

    struct Delay<'r>(&'r core::cell::RefCell<Recorder>);

    impl DelayNs for Delay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Call::Delay(ns / 1_000));
        }
    }

    #[test]
    fn one_line_follows_the_two_phase_sequence() {
        let recorder = core::cell::RefCell::new(Recorder::new());
        let state = DisplayState::new();
        state.publish(crate::transpose::ComMasks::new([0b10_0000, 0, 0, 0]));
        let mut refresher = Refresher::new(
            Bus(&recorder),
            Delay(&recorder),
            &state,
            PANEL_3D4C.timing(),
        );
        recorder.borrow_mut().len = 0;

        refresher.refresh_line(ComLine::Com1);

        let expected = [
            Call::Configure(ComLine::Com1, PinMode::DrivenOutput),
            Call::Level(ComLine::Com1, PinState::High),
            Call::Segments(0b01_1111, 0b10_0000),
            Call::Delay(2_000),
            Call::Level(ComLine::Com1, PinState::Low),
            Call::Segments(0b10_0000, 0b01_1111),
            Call::Delay(2_000),
            Call::Configure(ComLine::Com1, PinMode::FloatingInput),
        ];
        let recorder = recorder.borrow();
        assert_eq!(recorder.len, expected.len());
        for (call, expected) in recorder.calls.iter().zip(expected) {
            assert_eq!(*call, Some(expected));
        }
    }

    #[test]
    fn driven_idle_lines_take_the_opposite_level() {
        let recorder = core::cell::RefCell::new(Recorder::new());
        let state = DisplayState::new();
        let mut refresher = Refresher::new(
            Bus(&recorder),
            Delay(&recorder),
            &state,
            PANEL_3D4C_LOGICAL.timing(),
        );
        recorder.borrow_mut().len = 0;

        refresher.refresh_line(ComLine::Com2);

        let expected = [
            Call::Configure(ComLine::Com2, PinMode::DrivenOutput),
            Call::Level(ComLine::Com1, PinState::Low),
            Call::Level(ComLine::Com3, PinState::Low),
            Call::Level(ComLine::Com4, PinState::Low),
            Call::Level(ComLine::Com2, PinState::High),
            Call::Segments(SEG_PIN_MASK, 0),
            Call::Delay(1_000),
            Call::Level(ComLine::Com1, PinState::High),
            Call::Level(ComLine::Com3, PinState::High),
            Call::Level(ComLine::Com4, PinState::High),
            Call::Level(ComLine::Com2, PinState::Low),
            Call::Segments(0, SEG_PIN_MASK),
            Call::Delay(1_000),
            Call::Level(ComLine::Com2, PinState::Low),
        ];
        let recorder = recorder.borrow();
        assert_eq!(recorder.len, expected.len());
        for (call, expected) in recorder.calls.iter().zip(expected) {
            assert_eq!(*call, Some(expected));
        }
    }

    #[test]
    fn new_idles_coms_and_clears_segments() {
        let recorder = core::cell::RefCell::new(Recorder::new());
        let state = DisplayState::new();
        let _refresher = Refresher::new(
            Bus(&recorder),
            Delay(&recorder),
            &state,
            PANEL_3D4C.timing(),
        );
        let recorder = recorder.borrow();
        assert_eq!(recorder.len, 5);
        assert_eq!(
            recorder.calls[0],
            Some(Call::Configure(ComLine::Com1, PinMode::FloatingInput))
        );
        assert_eq!(recorder.calls[4], Some(Call::Segments(0, SEG_PIN_MASK)));
    }
}
