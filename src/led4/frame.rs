//! The digit buffer and display attributes shared by the main loop and the multiplex tick.

use crate::BLINK_PERIOD;
use crate::glyph::{DECIMAL_POINT_HIDDEN, DECIMAL_POINT_SHOWN, Glyph};

use super::CELL_COUNT;

/// Whether a digit takes part in multiplexing.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    On,
    Off,
    Blinking,
}

/// One position of the display.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitSlot {
    pub glyph: Glyph,
    pub visibility: Visibility,
    pub decimal_point: bool,
}

impl DigitSlot {
    /// The pattern driven onto the segment bus: glyph AND decimal-point mask.
    #[must_use]
    pub const fn segments(&self) -> u8 {
        let mask = if self.decimal_point {
            DECIMAL_POINT_SHOWN
        } else {
            DECIMAL_POINT_HIDDEN
        };
        self.glyph.segments() & mask
    }
}

/// Display-wide indicators.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAttributes {
    pub colon: bool,
    pub degree_sign: bool,
    pub brightness: u8,
}

impl Default for DisplayAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayAttributes {
    const fn new() -> Self {
        Self {
            colon: false,
            degree_sign: false,
            brightness: u8::MAX,
        }
    }
}

/// The result of one multiplex tick.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Render {
    /// Digit selected by this tick.
    pub index: usize,
    /// Pattern for that digit, already masked with its decimal point.
    pub segments: u8,
    /// False when the digit is off or in the dark half of its blink.
    pub lit: bool,
    pub colon: bool,
    pub degree_sign: bool,
    pub brightness: u8,
}

/// Digit slots, attributes and per-digit blink phases.
///
/// Plain data: callers serialize access (see [`Led4`](super::Led4)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    slots: [DigitSlot; CELL_COUNT],
    attributes: DisplayAttributes,
    blink_phases: [u8; CELL_COUNT],
    selected: usize,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// All digits blank, on, without decimal points; indicators off; full brightness.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [DigitSlot {
                glyph: Glyph::Blank,
                visibility: Visibility::On,
                decimal_point: false,
            }; CELL_COUNT],
            attributes: DisplayAttributes::new(),
            blink_phases: [0; CELL_COUNT],
            selected: 0,
        }
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&DigitSlot> {
        self.slots.get(index)
    }

    #[must_use]
    pub const fn attributes(&self) -> &DisplayAttributes {
        &self.attributes
    }

    pub fn write_digit(&mut self, index: usize, glyph: Glyph) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.glyph = glyph;
        }
    }

    pub fn write_digits(&mut self, glyphs: [Glyph; CELL_COUNT]) {
        for (slot, glyph) in self.slots.iter_mut().zip(glyphs) {
            slot.glyph = glyph;
        }
    }

    /// Writes up to four characters left to right and blanks the remaining digits.
    pub fn write_message(&mut self, text: &str) {
        let mut chars = text.chars();
        for slot in &mut self.slots {
            slot.glyph = chars.next().map_or(Glyph::Blank, Glyph::from);
        }
    }

    pub fn set_visibility(&mut self, index: usize, visibility: Visibility) {
        if let (Some(slot), Some(phase)) =
            (self.slots.get_mut(index), self.blink_phases.get_mut(index))
        {
            if slot.visibility != visibility {
                *phase = 0;
            }
            slot.visibility = visibility;
        }
    }

    pub fn set_all_visibility(&mut self, visibility: Visibility) {
        for index in 0..CELL_COUNT {
            self.set_visibility(index, visibility);
        }
    }

    pub fn set_decimal_point(&mut self, index: usize, shown: bool) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.decimal_point = shown;
        }
    }

    pub fn set_all_decimal_points(&mut self, shown: bool) {
        for slot in &mut self.slots {
            slot.decimal_point = shown;
        }
    }

    pub const fn set_colon(&mut self, on: bool) {
        self.attributes.colon = on;
    }

    pub const fn set_degree_sign(&mut self, on: bool) {
        self.attributes.degree_sign = on;
    }

    pub const fn set_brightness(&mut self, brightness: u8) {
        self.attributes.brightness = brightness;
    }

    /// HH:MM layout: all digits on, no decimal points, colon on, degree sign off.
    pub fn clock_layout(&mut self) {
        self.set_all_visibility(Visibility::On);
        self.set_all_decimal_points(false);
        self.attributes.colon = true;
        self.attributes.degree_sign = false;
    }

    /// NN.N° layout: three digits on, decimal point on digit 1, degree sign on, colon off.
    pub fn temperature_layout(&mut self) {
        self.set_all_visibility(Visibility::On);
        self.set_visibility(3, Visibility::Off);
        self.set_all_decimal_points(false);
        self.set_decimal_point(1, true);
        self.attributes.colon = false;
        self.attributes.degree_sign = true;
    }

    /// Four plain digits: all on, no decimal points, colon and degree sign off.
    pub fn numeric_layout(&mut self) {
        self.set_all_visibility(Visibility::On);
        self.set_all_decimal_points(false);
        self.attributes.colon = false;
        self.attributes.degree_sign = false;
    }

    /// Selects the next digit round-robin and works out what it should show.
    ///
    /// An off digit renders dark but still consumes its turn. A blinking digit is lit for
    /// the first [`BLINK_PERIOD`] of its visits and dark for the next [`BLINK_PERIOD`].
    /// Nothing is lit at brightness 0.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Modulo keeps the cursor and the phase in range"
    )]
    pub fn tick(&mut self) -> Render {
        let index = self.selected % CELL_COUNT;
        self.selected = (index + 1) % CELL_COUNT;

        let slot = self.slots.get(index).copied().unwrap_or_default();
        let lit = match slot.visibility {
            Visibility::On => true,
            Visibility::Off => false,
            Visibility::Blinking => self.blink_phases.get_mut(index).is_some_and(|phase| {
                let lit = *phase < BLINK_PERIOD;
                *phase = (*phase + 1) % (2 * BLINK_PERIOD);
                lit
            }),
        };

        Render {
            index,
            segments: slot.segments(),
            lit: lit && self.attributes.brightness > 0,
            colon: self.attributes.colon,
            degree_sign: self.attributes.degree_sign,
            brightness: self.attributes.brightness,
        }
    }
}
