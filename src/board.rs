//! Per-board configuration: stroke bit order, panel wiring, refresh timing.
//!
//! Everything here is fixed at build time. A new board revision is a new [`Board`]
//! constant; the glyph shapes, the transpose routine and the refresh loop stay as
//! they are.

use crate::glyph::{BitOrder, GlyphTable, SegmentPattern};
use crate::text::{DIGIT_COUNT, Text};
use crate::transpose::{self, ComMasks};
use crate::wiring::{COM_COUNT, ComLine, Extraction, WiringTable};

/// Two drive phases per COM line per refresh cycle.
pub const PHASE_COUNT: u32 = 2;

/// Lowest refresh rate a board may be configured for.
pub const MIN_REFRESH_HZ: u32 = 30;

/// What an inactive COM line does while another is driven.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleCom {
    /// High impedance, so digits on inactive lines see no drive at all.
    Floating,
    /// Push-pull, always at the opposite level to the selected line: low during its
    /// first phase, high during its second. Idle pairs carry no DC, but unlit strokes
    /// see some RMS voltage, so contrast depends on the panel's threshold.
    DriveInverted,
}

/// Dwell per phase and idle policy for the refresh loop.
///
/// ```compile_fail
/// # use lcd_kit::board::{IdleCom, RefreshTiming};
/// // 10 ms per phase is 12.5 Hz - caught at compile time
/// const SLOW: RefreshTiming = RefreshTiming::new(10_000, IdleCom::Floating);
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTiming {
    dwell_us: u32,
    idle: IdleCom,
}

impl RefreshTiming {
    #[must_use]
    pub const fn new(dwell_us: u32, idle: IdleCom) -> Self {
        assert!(dwell_us > 0, "dwell must be positive");
        assert!(
            dwell_us <= 1_000_000 / (MIN_REFRESH_HZ * PHASE_COUNT * COM_COUNT as u32),
            "dwell too long for a flicker-free refresh"
        );
        Self { dwell_us, idle }
    }

    #[must_use]
    pub const fn dwell_us(&self) -> u32 {
        self.dwell_us
    }

    #[must_use]
    pub const fn idle(&self) -> IdleCom {
        self.idle
    }

    /// Time for one pass over all COM lines, both phases.
    #[must_use]
    pub const fn cycle_us(&self) -> u32 {
        self.dwell_us * PHASE_COUNT * COM_COUNT as u32
    }

    /// Full refresh cycles per second, in thousandths of a hertz.
    #[must_use]
    pub const fn refresh_millihz(&self) -> u32 {
        1_000_000_000 / self.cycle_us()
    }
}

/// Everything that differs between board revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    name: &'static str,
    bit_order: BitOrder,
    glyphs: GlyphTable,
    wiring: WiringTable,
    timing: RefreshTiming,
}

impl Board {
    #[must_use]
    pub const fn new(
        name: &'static str,
        bit_order: BitOrder,
        wiring: WiringTable,
        timing: RefreshTiming,
    ) -> Self {
        Self {
            name,
            bit_order,
            glyphs: GlyphTable::new(&bit_order),
            wiring,
            timing,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn bit_order(&self) -> &BitOrder {
        &self.bit_order
    }

    #[must_use]
    pub const fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    #[must_use]
    pub const fn wiring(&self) -> &WiringTable {
        &self.wiring
    }

    #[must_use]
    pub const fn timing(&self) -> RefreshTiming {
        self.timing
    }

    /// Glyph lookup then transpose: the masks that show `text`.
    #[must_use]
    pub fn encode(&self, text: &Text) -> ComMasks {
        transpose::transpose(&self.wiring, &self.glyphs.encode_text(text))
    }

    /// Per-digit patterns held in `masks`.
    #[must_use]
    pub fn decode(&self, masks: &ComMasks) -> [SegmentPattern; DIGIT_COUNT] {
        transpose::untranspose(&self.wiring, masks)
    }
}

// ============================================================================
// Reference panel
// ============================================================================
//
//    LCD PINOUT     |  Segments |  Segment matrix
//                   |           |
//  COM1 2 3 4 SEG6  |    -A-    |          SEG6 SEG5 SEG4 SEG3 SEG2 SEG1
//  10 | | | | | 6   |  F|   |B  |   COM1    1D   __   2D   __   3D   __
//    +---------+    |    -G-    |   COM2    1E   1C   2E   2C   3E   3C
//    | D1 D2 D3|    |  E|   |C  |   COM3    1G   1B   2G   2B   3G   3B
//    +---------+    |    -D-    |   COM4    1F   1A   2F   2A   3F   3A
//   1 | | | | | 5   |           |
//  SEG1 2 3 4 5     |           |

/// D E C G B F A, bit 6 down to bit 0: each COM line's pair of strokes is adjacent.
pub const DECGBFA: BitOrder = BitOrder::new([0, 2, 4, 6, 5, 1, 3]);

const PAIRED_DIGIT_1: [Extraction; COM_COUNT] = [
    Extraction::new(ComLine::Com1, 5, 6, 1), // D
    Extraction::new(ComLine::Com2, 4, 4, 2), // E C
    Extraction::new(ComLine::Com3, 4, 2, 2), // G B
    Extraction::new(ComLine::Com4, 4, 0, 2), // F A
];
const PAIRED_DIGIT_2: [Extraction; COM_COUNT] = [
    Extraction::new(ComLine::Com1, 3, 6, 1),
    Extraction::new(ComLine::Com2, 2, 4, 2),
    Extraction::new(ComLine::Com3, 2, 2, 2),
    Extraction::new(ComLine::Com4, 2, 0, 2),
];
const PAIRED_DIGIT_3: [Extraction; COM_COUNT] = [
    Extraction::new(ComLine::Com1, 1, 6, 1),
    Extraction::new(ComLine::Com2, 0, 4, 2),
    Extraction::new(ComLine::Com3, 0, 2, 2),
    Extraction::new(ComLine::Com4, 0, 0, 2),
];

/// Reference panel with [`DECGBFA`] patterns, 2 ms dwell (62.5 Hz), floating idle COMs.
pub const PANEL_3D4C: Board = Board::new(
    "3-digit 4-COM TN panel",
    DECGBFA,
    WiringTable::new([&PAIRED_DIGIT_1, &PAIRED_DIGIT_2, &PAIRED_DIGIT_3]),
    RefreshTiming::new(2_000, IdleCom::Floating),
);

/// Stroke-by-stroke wiring for the digit whose odd SEG pin is `odd` (even pin is `odd - 1`).
const fn logical_digit(odd: u8) -> [Extraction; 7] {
    let even = odd - 1;
    [
        Extraction::new(ComLine::Com1, odd, 3, 1),  // D
        Extraction::new(ComLine::Com2, odd, 4, 1),  // E
        Extraction::new(ComLine::Com2, even, 2, 1), // C
        Extraction::new(ComLine::Com3, odd, 6, 1),  // G
        Extraction::new(ComLine::Com3, even, 1, 1), // B
        Extraction::new(ComLine::Com4, odd, 5, 1),  // F
        Extraction::new(ComLine::Com4, even, 0, 1), // A
    ]
}

const LOGICAL_DIGIT_1: [Extraction; 7] = logical_digit(5);
const LOGICAL_DIGIT_2: [Extraction; 7] = logical_digit(3);
const LOGICAL_DIGIT_3: [Extraction; 7] = logical_digit(1);

/// Same panel with patterns kept in [`BitOrder::LOGICAL`], 1 ms dwell (125 Hz) and idle
/// COMs driven opposite to the selected line.
pub const PANEL_3D4C_LOGICAL: Board = Board::new(
    "3-digit 4-COM TN panel, logical bit order",
    BitOrder::LOGICAL,
    WiringTable::new([&LOGICAL_DIGIT_1, &LOGICAL_DIGIT_2, &LOGICAL_DIGIT_3]),
    RefreshTiming::new(1_000, IdleCom::DriveInverted),
);

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::text::text_from_str;

    #[test]
    fn reference_timing_is_62_5_hz() {
        assert_eq!(PANEL_3D4C.timing().cycle_us(), 16_000);
        assert_eq!(PANEL_3D4C.timing().refresh_millihz(), 62_500);
        assert_eq!(PANEL_3D4C_LOGICAL.timing().refresh_millihz(), 125_000);
    }

    #[test]
    fn both_bit_orders_drive_the_same_pins() {
        for text in ["LCD", "Rea", "dy ", " 3 ", "Go", "8 8", "000", "999", "AbC"] {
            let text = text_from_str(text);
            assert_eq!(PANEL_3D4C.encode(&text), PANEL_3D4C_LOGICAL.encode(&text));
        }
    }

    #[test]
    fn decode_recovers_glyphs() {
        let patterns = PANEL_3D4C.decode(&PANEL_3D4C.encode(&text_from_str("Go")));
        assert_eq!(patterns[0], PANEL_3D4C.glyphs().lookup('G'));
        assert_eq!(patterns[1], PANEL_3D4C.glyphs().lookup('o'));
        assert!(patterns[2].is_blank());
    }

    #[test]
    fn com1_leaves_alternate_pins_unused() {
        assert_eq!(PANEL_3D4C.wiring().used_pins(ComLine::Com1), 0b10_1010);
        assert_eq!(PANEL_3D4C.wiring().used_pins(ComLine::Com4), 0b11_1111);
    }
}
