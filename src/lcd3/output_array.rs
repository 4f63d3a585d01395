use embassy_rp::gpio::{self, Level};

/// Array of GPIO output pins driving the panel's SEG lines, SEG1 first.
///
/// See the [`Lcd3`](crate::lcd3::Lcd3) documentation for usage examples.
pub struct OutputArray<'a, const N: usize>([gpio::Output<'a>; N]);

impl<'a, const N: usize> OutputArray<'a, N> {
    pub const fn new(outputs: [gpio::Output<'a>; N]) -> Self {
        Self(outputs)
    }

    /// Bit `i` of `high_mask` drives output `i` high, bit `i` of `low_mask` drives it
    /// low; outputs with neither bit keep their level.
    #[inline]
    pub(crate) fn set_from_masks(&mut self, mut high_mask: u8, mut low_mask: u8) {
        for output in &mut self.0 {
            if (high_mask & 1) == 1 {
                output.set_level(Level::High);
            } else if (low_mask & 1) == 1 {
                output.set_level(Level::Low);
            }
            high_mask >>= 1;
            low_mask >>= 1;
        }
    }
}
