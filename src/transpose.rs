//! Three digit patterns in, four COM line masks out.

use crate::glyph::SegmentPattern;
use crate::text::DIGIT_COUNT;
use crate::wiring::{COM_COUNT, ComLine, SEG_PIN_MASK, WiringTable};

/// The SEG pin mask to assert while each COM line is active.
///
/// Only the low 6 bits are ever set.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComMasks([u8; COM_COUNT]);

impl ComMasks {
    /// Every segment off.
    pub const BLANK: Self = Self([0; COM_COUNT]);

    /// Wraps raw masks, discarding bits above the SEG pins.
    #[must_use]
    pub const fn new(masks: [u8; COM_COUNT]) -> Self {
        Self([
            masks[0] & SEG_PIN_MASK,
            masks[1] & SEG_PIN_MASK,
            masks[2] & SEG_PIN_MASK,
            masks[3] & SEG_PIN_MASK,
        ])
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "ComLine::index is always below COM_COUNT"
    )]
    #[must_use]
    pub const fn get(&self, com: ComLine) -> u8 {
        self.0[com.index()]
    }

    #[must_use]
    pub const fn as_array(&self) -> &[u8; COM_COUNT] {
        &self.0
    }
}

/// Packs the three digits' patterns into per-COM masks using `wiring`.
#[must_use]
pub fn transpose(wiring: &WiringTable, patterns: &[SegmentPattern; DIGIT_COUNT]) -> ComMasks {
    let mut masks = [0u8; COM_COUNT];
    for (pattern, extractions) in patterns.iter().zip(wiring.digits()) {
        for extraction in *extractions {
            if let Some(mask) = masks.get_mut(extraction.com.index()) {
                *mask |= extraction.place(pattern.bits());
            }
        }
    }
    ComMasks::new(masks)
}

/// Recovers the three digits' patterns from `masks`; inverse of [`transpose`].
#[must_use]
pub fn untranspose(wiring: &WiringTable, masks: &ComMasks) -> [SegmentPattern; DIGIT_COUNT] {
    let mut bits = [0u8; DIGIT_COUNT];
    for (digit_bits, extractions) in bits.iter_mut().zip(wiring.digits()) {
        for extraction in *extractions {
            *digit_bits |= extraction.recover(masks.get(extraction.com));
        }
    }
    bits.map(SegmentPattern::new)
}
