//! Character to seven-segment pattern lookup.
//!
//! Glyphs are written once in logical segment order (A = bit 0 ... G = bit 6) and
//! re-encoded at compile time into a board's [`BitOrder`], so the wiring decides which
//! bit carries which stroke while the shapes stay the same on every board.
//!
//! See [`GlyphTable::lookup`] for the character policy.

use crate::text::{DIGIT_COUNT, Text};

/// Number of strokes in one digit.
pub const SEGMENT_COUNT: usize = 7;

/// The bits of a [`SegmentPattern`] that carry strokes.
pub const PATTERN_MASK: u8 = 0b_0111_1111;

/// One stroke of a seven-segment digit.
///
/// ```text
///    -A-
///  F|   |B
///    -G-
///  E|   |C
///    -D-
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    /// All strokes in logical order.
    pub const ALL: [Self; SEGMENT_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Bit of this stroke in logical order.
    #[must_use]
    pub const fn logical_bit(self) -> u8 {
        self as u8
    }
}

/// Stroke on/off bits for one digit, in a board's bit order.
///
/// Only the low 7 bits are ever set.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// All strokes off.
    pub const BLANK: Self = Self(0);

    /// Wraps raw pattern bits, discarding anything above bit 6.
    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self(bits & PATTERN_MASK)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }
}

/// Which pattern bit carries each stroke on a given board.
///
/// Indexed by [`Segment`]. Must be a permutation of bits 0..=6, checked at compile
/// time when used in a `const`:
///
/// ```compile_fail
/// # use lcd_kit::glyph::BitOrder;
/// // A and B share bit 0 - caught at compile time
/// const BAD: BitOrder = BitOrder::new([0, 0, 2, 3, 4, 5, 6]);
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitOrder([u8; SEGMENT_COUNT]);

impl BitOrder {
    /// A in bit 0 through G in bit 6.
    pub const LOGICAL: Self = Self::new([0, 1, 2, 3, 4, 5, 6]);

    /// `bit_of_segment[s]` is the pattern bit for stroke `s` (A first).
    #[must_use]
    pub const fn new(bit_of_segment: [u8; SEGMENT_COUNT]) -> Self {
        let mut seen = 0u8;
        let mut index = 0;
        while index < SEGMENT_COUNT {
            let bit = bit_of_segment[index];
            assert!((bit as usize) < SEGMENT_COUNT, "segment bit out of range");
            assert!(seen & (1 << bit) == 0, "two segments share one bit");
            seen |= 1 << bit;
            index += 1;
        }
        Self(bit_of_segment)
    }

    #[must_use]
    pub const fn bit(&self, segment: Segment) -> u8 {
        self.0[segment as usize]
    }

    /// Moves logical (A = bit 0) pattern bits into this order.
    #[must_use]
    pub const fn encode(&self, logical: u8) -> SegmentPattern {
        let mut bits = 0u8;
        let mut index = 0;
        while index < SEGMENT_COUNT {
            if logical & (1 << index) != 0 {
                bits |= 1 << self.0[index];
            }
            index += 1;
        }
        SegmentPattern::new(bits)
    }

    /// Inverse of [`BitOrder::encode`].
    #[must_use]
    pub const fn decode(&self, pattern: SegmentPattern) -> u8 {
        let mut logical = 0u8;
        let mut index = 0;
        while index < SEGMENT_COUNT {
            if pattern.bits() & (1 << self.0[index]) != 0 {
                logical |= 1 << index;
            }
            index += 1;
        }
        logical
    }
}

/// Digits, then letters A..Z, then space.
const GLYPH_COUNT: usize = 37;
const LETTER_BASE: usize = 10;
const SPACE_INDEX: usize = 36;

/// Glyph shapes in logical order (bit 6 .. bit 0 = G F E D C B A).
const LOGICAL_GLYPHS: [u8; GLYPH_COUNT] = [
    0b_011_1111, // 0
    0b_000_0110, // 1
    0b_101_1011, // 2
    0b_100_1111, // 3
    0b_110_0110, // 4
    0b_110_1101, // 5
    0b_111_1101, // 6
    0b_000_0111, // 7
    0b_111_1111, // 8
    0b_110_1111, // 9
    0b_111_0111, // A
    0b_111_1100, // b
    0b_011_1001, // C
    0b_101_1110, // d
    0b_111_1001, // E
    0b_111_0001, // F
    0b_011_1101, // G
    0b_111_0110, // H
    0b_011_0000, // I (left side, keeps it apart from 1)
    0b_000_1110, // J
    0b_111_0101, // K (approximation)
    0b_011_1000, // L
    0b_010_1011, // M (approximation)
    0b_011_0111, // N
    0b_101_1100, // o
    0b_111_0011, // P
    0b_110_0111, // q
    0b_101_0000, // r
    0b_110_1101, // S
    0b_111_1000, // t
    0b_011_1110, // U
    0b_010_1110, // V (approximation)
    0b_001_1101, // W (approximation)
    0b_100_1000, // x (approximation)
    0b_110_1110, // y
    0b_101_1011, // z
    0b_000_0000, // space
];

/// Position of `character` in the glyph table, if it has a glyph.
const fn glyph_index(character: char) -> Option<usize> {
    let folded = character.to_ascii_lowercase();
    match folded {
        '0'..='9' => Some(folded as usize - '0' as usize),
        'a'..='z' => Some(folded as usize - 'a' as usize + LETTER_BASE),
        ' ' => Some(SPACE_INDEX),
        _ => None,
    }
}

/// Whether [`GlyphTable::lookup`] has a dedicated glyph for `character`.
#[must_use]
pub const fn has_glyph(character: char) -> bool {
    glyph_index(character).is_some()
}

/// Glyph patterns already encoded for one board's [`BitOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTable {
    patterns: [SegmentPattern; GLYPH_COUNT],
}

impl GlyphTable {
    /// Re-encodes every glyph into `bit_order`.
    #[must_use]
    pub const fn new(bit_order: &BitOrder) -> Self {
        let mut patterns = [SegmentPattern::BLANK; GLYPH_COUNT];
        let mut index = 0;
        while index < GLYPH_COUNT {
            patterns[index] = bit_order.encode(LOGICAL_GLYPHS[index]);
            index += 1;
        }
        Self { patterns }
    }

    /// Pattern for `character`.
    ///
    /// Digits, letters (case-insensitive) and space have glyphs. Every other
    /// character renders blank rather than as garbage.
    #[must_use]
    pub fn lookup(&self, character: char) -> SegmentPattern {
        glyph_index(character)
            .and_then(|index| self.patterns.get(index))
            .copied()
            .unwrap_or(SegmentPattern::BLANK)
    }

    /// Patterns for the three digit positions, left to right.
    #[must_use]
    pub fn encode_text(&self, text: &Text) -> [SegmentPattern; DIGIT_COUNT] {
        text.map(|character| self.lookup(character))
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    const LOGICAL: GlyphTable = GlyphTable::new(&BitOrder::LOGICAL);

    #[test]
    fn digits_use_canonical_shapes() {
        assert_eq!(LOGICAL.lookup('0').bits(), 0b_011_1111);
        assert_eq!(LOGICAL.lookup('1').bits(), 0b_000_0110);
        assert_eq!(LOGICAL.lookup('8').bits(), PATTERN_MASK);
    }

    #[test]
    fn case_is_folded() {
        for (upper, lower) in ('A'..='Z').zip('a'..='z') {
            assert_eq!(LOGICAL.lookup(upper), LOGICAL.lookup(lower));
        }
    }

    #[test]
    fn unsupported_characters_are_blank() {
        for character in ['-', '.', '!', '\0', 'é', '\u{1F600}'] {
            assert!(LOGICAL.lookup(character).is_blank());
            assert!(!has_glyph(character));
        }
        assert!(LOGICAL.lookup(' ').is_blank());
    }

    #[test]
    fn patterns_stay_within_seven_bits() {
        let table = GlyphTable::new(&BitOrder::new([0, 2, 4, 6, 5, 1, 3]));
        for character in ('0'..='9').chain('a'..='z').chain(core::iter::once(' ')) {
            let first = table.lookup(character);
            assert_eq!(first.bits() & !PATTERN_MASK, 0);
            assert_eq!(first, table.lookup(character));
        }
    }

    #[test]
    fn only_space_is_blank_among_supported() {
        for character in ('0'..='9').chain('a'..='z') {
            assert!(!LOGICAL.lookup(character).is_blank(), "{character}");
        }
    }

    #[test]
    fn bit_order_round_trips() {
        let order = BitOrder::new([0, 2, 4, 6, 5, 1, 3]);
        for logical in 0..=PATTERN_MASK {
            assert_eq!(order.decode(order.encode(logical)), logical);
        }
        assert_eq!(order.bit(Segment::D), 6);
        assert_eq!(Segment::G.logical_bit(), 6);
    }

    #[test]
    fn reordered_zero_matches_board_encoding() {
        // D E C G B F A, bit 6 down to bit 0
        let table = GlyphTable::new(&BitOrder::new([0, 2, 4, 6, 5, 1, 3]));
        assert_eq!(table.lookup('0').bits(), 0b_111_0111);
        assert_eq!(table.lookup('m').bits(), 0b_100_0111);
        assert_eq!(table.lookup('W').bits(), 0b_111_0001);
    }
}
