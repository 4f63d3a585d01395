//! COM line masks shared between the content ticker and the refresh loop.
//!
//! One writer publishes, one reader multiplexes, and nothing locks. Each mask is its
//! own atomic, so the reader can see a mix of the previous and the new frame for at
//! most one refresh cycle. Every value it sees is a whole mask that was once
//! published, so the pins are never driven from a half-written byte.

use portable_atomic::{AtomicU8, Ordering};

use crate::transpose::ComMasks;
use crate::wiring::{COM_COUNT, ComLine, SEG_PIN_MASK};

/// The four COM line masks currently in force. Starts blank.
#[derive(Debug)]
pub struct DisplayState {
    masks: [AtomicU8; COM_COUNT],
}

impl DisplayState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            masks: [
                AtomicU8::new(0),
                AtomicU8::new(0),
                AtomicU8::new(0),
                AtomicU8::new(0),
            ],
        }
    }

    /// Replaces all four masks. Call from the single writer only.
    pub fn publish(&self, masks: ComMasks) {
        for (slot, &mask) in self.masks.iter().zip(masks.as_array()) {
            slot.store(mask, Ordering::Relaxed);
        }
    }

    /// Mask for `com`, as last published.
    #[must_use]
    pub fn load(&self, com: ComLine) -> u8 {
        self.masks
            .get(com.index())
            .map_or(0, |slot| slot.load(Ordering::Relaxed) & SEG_PIN_MASK)
    }

    /// All four masks. Not atomic as a group.
    #[must_use]
    pub fn snapshot(&self) -> ComMasks {
        ComMasks::new(ComLine::ALL.map(|com| self.load(com)))
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn starts_blank() {
        static STATE: DisplayState = DisplayState::new();
        assert_eq!(STATE.snapshot(), ComMasks::BLANK);
    }

    #[test]
    fn publish_overwrites_every_mask() {
        let state = DisplayState::new();
        state.publish(ComMasks::new([1, 2, 3, 4]));
        state.publish(ComMasks::new([0b10_0000, 0, 0b11_1111, 0b01_0101]));
        assert_eq!(state.load(ComLine::Com1), 0b10_0000);
        assert_eq!(state.load(ComLine::Com2), 0);
        assert_eq!(
            state.snapshot(),
            ComMasks::new([0b10_0000, 0, 0b11_1111, 0b01_0101])
        );
    }
}
