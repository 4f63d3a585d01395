//! Drive a 3-digit, 4-COM segment LCD straight from GPIO pins.
//!
//! The pure parts ([`glyph`], [`wiring`], [`transpose`], [`content`], [`refresh`]) run
//! anywhere; [`lcd3`] puts them on RP2040/RP235x pins with Embassy.
#![no_std]

pub mod board;
pub mod content;
pub mod display_state;
mod error;
pub mod glyph;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod lcd3;
pub mod refresh;
mod text;
pub mod transpose;
pub mod wiring;

// Re-export commonly used items
pub use board::{Board, IdleCom, PANEL_3D4C, PANEL_3D4C_LOGICAL, RefreshTiming};
pub use content::{BootScript, ContentGenerator, CounterRadix, Phase, READY_COUNTDOWN};
pub use display_state::DisplayState;
pub use error::{Error, Result};
pub use glyph::{BitOrder, GlyphTable, SegmentPattern};
pub use refresh::{LcdBus, PinMode, Refresher};
pub use text::{BLANK_TEXT, DIGIT_COUNT, Text, ascii_text, parse_text, text_from_str};
pub use transpose::{ComMasks, transpose, untranspose};
pub use wiring::{COM_COUNT, ComLine, Extraction, SEG_PIN_COUNT, SEG_PIN_MASK, WiringTable};
