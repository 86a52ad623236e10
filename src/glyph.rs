//! Glyphs and their segment encodings for a common-anode 7-segment digit.
//!
//! A segment pattern is one byte, most significant bit first:
//!
//! | bit | 7 | 6 | 5 | 4 | 3 | 2 | 1 | 0  |
//! |-----|---|---|---|---|---|---|---|----|
//! | seg | A | B | C | D | E | F | G | DP |
//!
//! A `0` bit lights the segment. The byte is shifted out LSB first, so the decimal point
//! reaches the last output of the shift register.

/// Pattern with every segment (and the decimal point) dark.
pub const BLANK: u8 = 0b_1111_1111;

/// AND-mask that lights the decimal point on top of a glyph.
pub const DECIMAL_POINT_SHOWN: u8 = 0b_1111_1110;

/// AND-mask that leaves a glyph untouched.
pub const DECIMAL_POINT_HIDDEN: u8 = 0b_1111_1111;

/// Segment patterns for digits 0-9.
const DIGITS: [u8; 10] = [
    0b_0000_0011, // 0
    0b_1001_1111, // 1
    0b_0010_0101, // 2
    0b_0000_1101, // 3
    0b_1001_1001, // 4
    0b_0100_1001, // 5
    0b_0100_0001, // 6
    0b_0001_1111, // 7
    0b_0000_0001, // 8
    0b_0000_1001, // 9
];

/// What a single digit slot can hold.
///
/// Any value can be stored; values without an encoding (a digit above 9, a letter outside
/// the supported set) render as [`BLANK`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyph {
    #[default]
    Blank,
    Digit(u8),
    Letter(char),
}

impl Glyph {
    /// The segment pattern for this glyph, without a decimal point.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "Digit is bounds checked first")]
    pub const fn segments(self) -> u8 {
        match self {
            Self::Blank => BLANK,
            Self::Digit(value) if value < 10 => DIGITS[value as usize],
            Self::Digit(_) => BLANK,
            Self::Letter(letter) => letter_segments(letter),
        }
    }

    /// True if this glyph has its own entry in the encoding table.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        match self {
            Self::Blank => true,
            Self::Digit(value) => value < 10,
            Self::Letter(letter) => letter_segments(letter) != BLANK,
        }
    }
}

impl From<u8> for Glyph {
    fn from(value: u8) -> Self {
        Self::Digit(value)
    }
}

impl From<char> for Glyph {
    fn from(char: char) -> Self {
        if char == ' ' {
            return Self::Blank;
        }
        char.to_digit(10)
            .and_then(|digit| u8::try_from(digit).ok())
            .map_or(Self::Letter(char), Self::Digit)
    }
}

/// Letters needed to spell the short status words ("hora", "AlAr", "ErrO", ...).
const fn letter_segments(letter: char) -> u8 {
    match letter {
        'A' => 0b_0001_0001,
        'a' => 0b_0000_0101,
        'E' => 0b_0110_0001,
        'F' | 'f' => 0b_0111_0001,
        'N' => 0b_0001_0011,
        'n' => 0b_1101_0101,
        'h' => 0b_1101_0001,
        'l' => 0b_1111_0011,
        'R' | 'r' => 0b_1111_0101,
        'u' => 0b_1100_0111,
        'O' => 0b_0000_0011,
        'o' => 0b_1100_0101,
        _ => BLANK,
    }
}
