//! The three characters shown on the panel.

use crate::{Error, Result};

/// Number of digit cells on the panel, left to right.
pub const DIGIT_COUNT: usize = 3;

/// Characters requested for the three digit positions.
pub type Text = [char; DIGIT_COUNT];

/// All three positions blank.
pub const BLANK_TEXT: Text = [' '; DIGIT_COUNT];

/// Builds [`Text`] from an ASCII literal at compile time, padding with spaces.
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # #[panic_handler]
/// # fn panic(_: &core::panic::PanicInfo) -> ! { loop {} }
/// use lcd_kit::{ascii_text, Text};
///
/// const GO: Text = ascii_text("Go");
/// const _: () = assert!(GO[2] == ' ');
/// ```
///
/// ```compile_fail
/// # use lcd_kit::{ascii_text, Text};
/// // Four characters do not fit - caught at compile time
/// const TOO_LONG: Text = ascii_text("LCD!");
/// ```
#[must_use]
pub const fn ascii_text(literal: &str) -> Text {
    let bytes = literal.as_bytes();
    assert!(bytes.is_ascii(), "text literal must be ASCII");
    assert!(bytes.len() <= DIGIT_COUNT, "text literal longer than the panel");

    let mut text = BLANK_TEXT;
    let mut index = 0;
    while index < bytes.len() {
        text[index] = bytes[index] as char;
        index += 1;
    }
    text
}

/// Takes the first three characters of `string`, padding with spaces.
///
/// Extra characters are dropped. Characters without a glyph are kept and later
/// render blank.
#[must_use]
pub fn text_from_str(string: &str) -> Text {
    let mut text = BLANK_TEXT;
    for (slot, character) in text.iter_mut().zip(string.chars()) {
        *slot = character;
    }
    text
}

/// Like [`text_from_str`], but rejects input the panel cannot show faithfully.
///
/// # Errors
///
/// Returns [`Error::TextTooLong`] for more than three characters and
/// [`Error::UnsupportedCharacter`] for a character with no glyph.
pub fn parse_text(string: &str) -> Result<Text> {
    if string.chars().count() > DIGIT_COUNT {
        return Err(Error::TextTooLong);
    }
    if let Some(character) = string.chars().find(|&character| !crate::glyph::has_glyph(character)) {
        return Err(Error::UnsupportedCharacter(character));
    }
    Ok(text_from_str(string))
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pad_right() {
        assert_eq!(text_from_str("7"), ['7', ' ', ' ']);
        assert_eq!(text_from_str(""), BLANK_TEXT);
    }

    #[test]
    fn long_strings_truncate() {
        assert_eq!(text_from_str("Ready"), ['R', 'e', 'a']);
    }

    #[test]
    fn ascii_text_matches_runtime_conversion() {
        const DY: Text = ascii_text("dy ");
        assert_eq!(DY, text_from_str("dy "));
    }

    #[test]
    fn parse_text_rejects_what_cannot_be_shown() {
        assert!(matches!(parse_text("abcd"), Err(Error::TextTooLong)));
        assert!(matches!(
            parse_text("1-2"),
            Err(Error::UnsupportedCharacter('-'))
        ));
        assert!(matches!(parse_text("8 8"), Ok(['8', ' ', '8'])));
    }
}
