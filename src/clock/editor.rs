use crate::glyph::Glyph;
use crate::led4::CELL_COUNT;

/// The four HH:MM digits being edited and the cursor over them.
///
/// Increments wrap at a per-position limit that depends on the neighbouring hour digit,
/// so starting from a valid time no sequence of increments can produce an hour above 23
/// or a minute above 59.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitEditor {
    digits: [u8; CELL_COUNT],
    cursor: usize,
}

impl DigitEditor {
    /// Loads `hour:minute` and puts the cursor on the first digit.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting into decimal digits"
    )]
    pub const fn load(&mut self, hour: u8, minute: u8) {
        self.digits = [hour / 10, hour % 10, minute / 10, minute % 10];
        self.cursor = 0;
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn digits(&self) -> [u8; CELL_COUNT] {
        self.digits
    }

    #[must_use]
    pub fn glyphs(&self) -> [Glyph; CELL_COUNT] {
        self.digits.map(Glyph::Digit)
    }

    /// Moves the cursor right by `step`, wrapping past the last digit.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "cursor < 4 and step is a click count"
    )]
    pub fn advance_cursor(&mut self, step: u8) {
        self.cursor = (self.cursor + usize::from(step)) % CELL_COUNT;
    }

    /// Adds `step` to the digit under the cursor, wrapping at its limit, and returns the
    /// new value.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "digits stay below 10 and the limit is never zero"
    )]
    pub fn increment(&mut self, step: u8) -> u8 {
        let limit = self.max_value_for_digit(self.cursor);
        let value = self.digits.get(self.cursor).map_or(0, |&digit| (digit + step) % limit);
        if let Some(digit) = self.digits.get_mut(self.cursor) {
            *digit = value;
        }
        value
    }

    /// Exclusive upper bound for the digit at `index`.
    ///
    /// Hour tens: 0-2, or 0-1 while the hour units digit is 4 or more. Hour units: 0-9, or
    /// 0-3 once the tens digit is 2. Minute tens: 0-5. Minute units: 0-9.
    #[must_use]
    pub const fn max_value_for_digit(&self, index: usize) -> u8 {
        let [hour_tens, hour_units, _, _] = self.digits;
        match index {
            0 if hour_units >= 4 => 2,
            0 => 3,
            1 if hour_tens <= 1 => 10,
            1 => 4,
            2 => 6,
            _ => 10,
        }
    }

    #[must_use]
    #[expect(clippy::arithmetic_side_effects, reason = "digits stay below 10")]
    pub const fn hour(&self) -> u8 {
        self.digits[0] * 10 + self.digits[1]
    }

    #[must_use]
    #[expect(clippy::arithmetic_side_effects, reason = "digits stay below 10")]
    pub const fn minute(&self) -> u8 {
        self.digits[2] * 10 + self.digits[3]
    }
}
