use embassy_rp::gpio::{Flex, Level, Pull};
use embedded_hal::digital::PinState;

use crate::refresh::PinMode;
use crate::wiring::{COM_COUNT, ComLine};

/// The panel's four COM pins, COM1 first.
///
/// COM pins switch between push-pull output and high impedance every refresh, so
/// they are [`Flex`] pins. They start out floating with no pull.
pub struct ComArray<'a>([Flex<'a>; COM_COUNT]);

impl<'a> ComArray<'a> {
    #[must_use]
    pub fn new(mut pins: [Flex<'a>; COM_COUNT]) -> Self {
        for pin in &mut pins {
            pin.set_pull(Pull::None);
            pin.set_as_input();
        }
        Self(pins)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "ComLine::index is always below COM_COUNT"
    )]
    #[inline]
    fn pin_mut(&mut self, com: ComLine) -> &mut Flex<'a> {
        &mut self.0[com.index()]
    }

    #[inline]
    pub(crate) fn configure(&mut self, com: ComLine, mode: PinMode) {
        let pin = self.pin_mut(com);
        match mode {
            PinMode::DrivenOutput => pin.set_as_output(),
            PinMode::FloatingInput => pin.set_as_input(),
        }
    }

    #[inline]
    pub(crate) fn set_level(&mut self, com: ComLine, level: PinState) {
        self.pin_mut(com).set_level(Level::from(bool::from(level)));
    }
}
