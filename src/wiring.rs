//! Board wiring: which pattern bits of which digit land on which COM line and SEG pin.
//!
//! The panel has 4 common (COM) lines and 6 segment (SEG) pins. While one COM line is
//! active, each SEG pin addresses exactly one stroke of one digit, so a
//! [`WiringTable`] lists, per digit, bit fields to lift out of that digit's
//! [`SegmentPattern`](crate::glyph::SegmentPattern) and where to drop them in a COM
//! line's 6-bit mask. [`transpose`](crate::transpose::transpose) is the single routine
//! that consumes it.

use crate::glyph::SEGMENT_COUNT;
use crate::text::DIGIT_COUNT;

/// Number of common lines on the panel.
pub const COM_COUNT: usize = 4;

/// Number of segment pins on the panel.
pub const SEG_PIN_COUNT: usize = 6;

/// The bits of a COM line mask that map to SEG pins (SEG1 = bit 0).
pub const SEG_PIN_MASK: u8 = 0b_0011_1111;

/// One of the panel's four common lines.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComLine {
    Com1,
    Com2,
    Com3,
    Com4,
}

impl ComLine {
    /// Multiplexing order.
    pub const ALL: [Self; COM_COUNT] = [Self::Com1, Self::Com2, Self::Com3, Self::Com4];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Moves `width` bits starting at `src_offset` of a digit's pattern to
/// `dest_offset` of `com`'s mask.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    pub com: ComLine,
    pub dest_offset: u8,
    pub src_offset: u8,
    pub width: u8,
}

impl Extraction {
    #[must_use]
    pub const fn new(com: ComLine, dest_offset: u8, src_offset: u8, width: u8) -> Self {
        assert!(width > 0, "extraction width must be positive");
        assert!(
            (src_offset as usize) + (width as usize) <= SEGMENT_COUNT,
            "extraction reads past the 7 pattern bits"
        );
        assert!(
            (dest_offset as usize) + (width as usize) <= SEG_PIN_COUNT,
            "extraction writes past the 6 SEG pins"
        );
        Self {
            com,
            dest_offset,
            src_offset,
            width,
        }
    }

    const fn field(&self) -> u8 {
        (1 << self.width) - 1
    }

    /// Pattern bits this extraction reads.
    #[must_use]
    pub const fn source_bits(&self) -> u8 {
        self.field() << self.src_offset
    }

    /// Mask bits this extraction writes.
    #[must_use]
    pub const fn dest_bits(&self) -> u8 {
        self.field() << self.dest_offset
    }

    /// This extraction's contribution to its COM mask.
    #[must_use]
    pub const fn place(&self, pattern_bits: u8) -> u8 {
        ((pattern_bits >> self.src_offset) & self.field()) << self.dest_offset
    }

    /// The pattern bits this extraction contributed to `mask`.
    #[must_use]
    pub const fn recover(&self, mask: u8) -> u8 {
        ((mask >> self.dest_offset) & self.field()) << self.src_offset
    }
}

/// Per-digit extraction lists for one board revision.
///
/// Validated at compile time when used in a `const`: every pattern bit of every digit
/// is read exactly once, and no (COM line, SEG pin) slot is written twice.
///
/// ```compile_fail
/// # use lcd_kit::wiring::{ComLine, Extraction, WiringTable};
/// const ALL_BITS: [Extraction; 1] = [Extraction::new(ComLine::Com1, 0, 0, 6)];
/// const MISSING_G: [Extraction; 1] = [Extraction::new(ComLine::Com2, 0, 0, 6)];
/// const THIRD: [Extraction; 1] = [Extraction::new(ComLine::Com3, 0, 0, 6)];
/// // Bit 6 of each digit is never read - caught at compile time
/// const BAD: WiringTable = WiringTable::new([&ALL_BITS, &MISSING_G, &THIRD]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiringTable {
    digits: [&'static [Extraction]; DIGIT_COUNT],
}

impl WiringTable {
    #[must_use]
    pub const fn new(digits: [&'static [Extraction]; DIGIT_COUNT]) -> Self {
        let mut claimed = [0u8; COM_COUNT];

        let mut digit = 0;
        while digit < DIGIT_COUNT {
            let extractions = digits[digit];
            let mut read = 0u8;

            let mut index = 0;
            while index < extractions.len() {
                let extraction = &extractions[index];

                let source = extraction.source_bits();
                assert!(read & source == 0, "pattern bit read twice");
                read |= source;

                let com = extraction.com.index();
                let dest = extraction.dest_bits();
                assert!(claimed[com] & dest == 0, "COM/SEG slot wired twice");
                claimed[com] |= dest;

                index += 1;
            }

            assert!(
                read == crate::glyph::PATTERN_MASK,
                "every pattern bit must be wired"
            );
            digit += 1;
        }

        Self { digits }
    }

    /// Extraction lists, left digit first.
    #[must_use]
    pub const fn digits(&self) -> &[&'static [Extraction]; DIGIT_COUNT] {
        &self.digits
    }

    /// SEG pins used while `com` is active.
    #[must_use]
    pub fn used_pins(&self, com: ComLine) -> u8 {
        self.digits
            .iter()
            .flat_map(|extractions| extractions.iter())
            .filter(|extraction| extraction.com == com)
            .fold(0, |used, extraction| used | extraction.dest_bits())
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn place_and_recover_are_inverse() {
        let extraction = Extraction::new(ComLine::Com3, 4, 2, 2);
        assert_eq!(extraction.place(0b_000_1100), 0b_11_0000);
        assert_eq!(extraction.place(0b_111_0011), 0);
        assert_eq!(extraction.recover(0b_11_0000), 0b_000_1100);
        assert_eq!(extraction.source_bits(), 0b_000_1100);
        assert_eq!(extraction.dest_bits(), 0b_11_0000);
    }

    #[test]
    fn com_lines_index_in_order() {
        for (position, com) in ComLine::ALL.iter().enumerate() {
            assert_eq!(com.index(), position);
        }
    }
}
