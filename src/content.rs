//! Decides what the panel shows on each tick: a boot script, then a rolling counter.
//!
//! See [`ContentGenerator`] for the state machine.

#[cfg(feature = "display-trace")]
use defmt::info;

use crate::board::Board;
use crate::display_state::DisplayState;
use crate::text::{BLANK_TEXT, DIGIT_COUNT, Text, ascii_text};

/// Period of the content tick.
pub const TICK_PERIOD_MS: u64 = 100;

/// Fixed frames shown once at start-up, each held for the same number of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootScript {
    frames: &'static [Text],
    ticks_per_frame: u8,
}

impl BootScript {
    /// ```compile_fail
    /// # use lcd_kit::content::BootScript;
    /// // A frame must last at least one tick - caught at compile time
    /// const NEVER_SHOWN: BootScript = BootScript::new(&[[' '; 3]], 0);
    /// ```
    #[must_use]
    pub const fn new(frames: &'static [Text], ticks_per_frame: u8) -> Self {
        assert!(ticks_per_frame > 0, "each frame must last at least one tick");
        assert!(frames.len() <= u8::MAX as usize, "too many boot frames");
        Self {
            frames,
            ticks_per_frame,
        }
    }

    /// No boot frames: counting starts on the first tick.
    pub const NONE: Self = Self::new(&[], 1);

    #[must_use]
    pub const fn frames(&self) -> &'static [Text] {
        self.frames
    }

    #[must_use]
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// Ticks spent booting; the counter's first value shows on this tick (0-based).
    #[must_use]
    pub const fn total_ticks(&self) -> u32 {
        self.frames.len() as u32 * self.ticks_per_frame as u32
    }

    const fn first_phase(&self) -> Phase {
        if self.frames.is_empty() {
            Phase::Counting { value: 0 }
        } else {
            Phase::Booting {
                frame: 0,
                ticks_shown: 0,
            }
        }
    }

    #[expect(
        clippy::arithmetic_side_effects,
        reason = "both counters are bounded by the checks above them"
    )]
    fn advance(&self, frame: u8, ticks_shown: u8) -> Phase {
        if ticks_shown + 1 < self.ticks_per_frame {
            Phase::Booting {
                frame,
                ticks_shown: ticks_shown + 1,
            }
        } else if usize::from(frame) + 1 < self.frames.len() {
            Phase::Booting {
                frame: frame + 1,
                ticks_shown: 0,
            }
        } else {
            Phase::Counting { value: 0 }
        }
    }
}

// "LCDReady  3  2  1  0 Go", three characters at a time.
const READY_COUNTDOWN_FRAMES: [Text; 8] = [
    ascii_text("LCD"),
    ascii_text("Rea"),
    ascii_text("dy "),
    ascii_text(" 3 "),
    ascii_text(" 2 "),
    ascii_text(" 1 "),
    ascii_text(" 0 "),
    ascii_text("Go"),
];

/// "LCD Ready", a 3-2-1-0 countdown, then "Go"; 0.8 s per frame.
///
/// Every frame, "LCD" included, holds for the full 8 ticks, so "000" first shows on
/// tick 64 (the 65th). Firmware that counts ticks with a pre-increment shows "LCD"
/// for 7 ticks and "000" one tick earlier.
pub const READY_COUNTDOWN: BootScript = BootScript::new(&READY_COUNTDOWN_FRAMES, 8);

/// How the counter is written, and where it wraps.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterRadix {
    /// 000 to 999.
    #[default]
    Decimal,
    /// 000 to FFF.
    Hex,
}

impl CounterRadix {
    #[must_use]
    pub const fn base(self) -> u16 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }

    /// One past the largest value three digits can show.
    #[must_use]
    pub const fn modulus(self) -> u16 {
        let base = self.base();
        base * base * base
    }

    #[must_use]
    pub const fn next(self, value: u16) -> u16 {
        (value % self.modulus() + 1) % self.modulus()
    }

    /// Zero-padded, most significant digit first.
    #[must_use]
    pub fn render(self, value: u16) -> Text {
        let base = self.base();
        let mut remaining = value % self.modulus();
        let mut text = ['0'; DIGIT_COUNT];
        for slot in text.iter_mut().rev() {
            *slot = char::from_digit(u32::from(remaining % base), u32::from(base))
                .map_or(' ', |digit| digit.to_ascii_uppercase());
            remaining /= base;
        }
        text
    }
}

/// Where the generator is in its life.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing boot frame `frame`, already shown for `ticks_shown` ticks.
    Booting { frame: u8, ticks_shown: u8 },
    /// Showing `value` next. Terminal.
    Counting { value: u16 },
}

/// The single writer of [`DisplayState`].
///
/// `Booting` steps through the [`BootScript`] frames by tick count alone, then hands
/// over to `Counting`, which never goes back. Each tick renders the current phase,
/// then advances it.
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # #[panic_handler]
/// # fn panic(_: &core::panic::PanicInfo) -> ! { loop {} }
/// use lcd_kit::board::PANEL_3D4C;
/// use lcd_kit::content::{ContentGenerator, CounterRadix, READY_COUNTDOWN};
/// use lcd_kit::display_state::DisplayState;
///
/// static STATE: DisplayState = DisplayState::new();
///
/// # fn example() {
/// let mut generator = ContentGenerator::new(&PANEL_3D4C, &READY_COUNTDOWN, CounterRadix::Decimal);
/// generator.tick(&STATE); // "LCD"
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentGenerator {
    board: &'static Board,
    script: &'static BootScript,
    radix: CounterRadix,
    phase: Phase,
}

impl ContentGenerator {
    #[must_use]
    pub const fn new(
        board: &'static Board,
        script: &'static BootScript,
        radix: CounterRadix,
    ) -> Self {
        Self {
            board,
            script,
            radix,
            phase: script.first_phase(),
        }
    }

    #[must_use]
    pub const fn board(&self) -> &'static Board {
        self.board
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The text for this tick; advances the state machine.
    pub fn next_text(&mut self) -> Text {
        match self.phase {
            Phase::Booting { frame, ticks_shown } => {
                let text = self
                    .script
                    .frames()
                    .get(usize::from(frame))
                    .copied()
                    .unwrap_or(BLANK_TEXT);
                self.phase = self.script.advance(frame, ticks_shown);
                #[cfg(feature = "display-trace")]
                if let Phase::Counting { .. } = self.phase {
                    info!("boot script done, counting in {:?}", self.radix);
                }
                text
            }
            Phase::Counting { value } => {
                self.phase = Phase::Counting {
                    value: self.radix.next(value),
                };
                self.radix.render(value)
            }
        }
    }

    /// Decides this tick's text and publishes its masks. Never blocks.
    pub fn tick(&mut self, state: &DisplayState) {
        let text = self.next_text();
        state.publish(self.board.encode(&text));
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::board::PANEL_3D4C;

    #[test]
    fn zero_renders_zero_padded() {
        assert_eq!(CounterRadix::Decimal.render(0), ['0', '0', '0']);
        assert_eq!(CounterRadix::Decimal.render(42), ['0', '4', '2']);
        assert_eq!(CounterRadix::Hex.render(0xABC), ['A', 'B', 'C']);
    }

    #[test]
    fn counter_wraps_at_modulus() {
        assert_eq!(CounterRadix::Decimal.modulus(), 1000);
        assert_eq!(CounterRadix::Decimal.next(999), 0);
        assert_eq!(CounterRadix::Hex.modulus(), 0x1000);
        assert_eq!(CounterRadix::Hex.next(0xFFF), 0);
        assert_eq!(CounterRadix::Hex.render(0xFFF), ['F', 'F', 'F']);
    }

    #[test]
    fn ready_countdown_takes_64_ticks() {
        assert_eq!(READY_COUNTDOWN.total_ticks(), 64);
        assert_eq!(READY_COUNTDOWN.frames()[7], ['G', 'o', ' ']);
    }

    #[test]
    fn first_frame_holds_as_long_as_the_rest() {
        let mut generator = ContentGenerator::new(&PANEL_3D4C, &READY_COUNTDOWN, CounterRadix::Decimal);
        let lcd = ascii_text("LCD");
        for _ in 0..READY_COUNTDOWN.ticks_per_frame() {
            assert_eq!(generator.next_text(), lcd);
        }
        assert_eq!(generator.next_text(), ascii_text("Rea"));
        for _ in 1..READY_COUNTDOWN.total_ticks() - 1 - u32::from(READY_COUNTDOWN.ticks_per_frame()) {
            generator.next_text();
        }
        assert_eq!(generator.next_text(), ascii_text("Go"));
        assert_eq!(generator.next_text(), ['0', '0', '0']);
    }

    #[test]
    fn empty_script_counts_immediately() {
        let mut generator = ContentGenerator::new(&PANEL_3D4C, &BootScript::NONE, CounterRadix::Decimal);
        assert_eq!(generator.phase(), Phase::Counting { value: 0 });
        assert_eq!(generator.next_text(), ['0', '0', '0']);
        assert_eq!(generator.next_text(), ['0', '0', '1']);
    }

    #[test]
    fn tick_publishes_encoded_text() {
        let state = DisplayState::new();
        let mut generator = ContentGenerator::new(&PANEL_3D4C, &READY_COUNTDOWN, CounterRadix::Decimal);
        generator.tick(&state);
        assert_eq!(state.snapshot(), PANEL_3D4C.encode(&['L', 'C', 'D']));
    }
}
