use embassy_rp::gpio::{Level, Output};

use super::{CELL_COUNT, OutputArray, SegmentBus};

/// Segment lines behind a 74HC595-style shift register, plus one select line per digit
/// and the colon and degree-sign indicators.
///
/// Digit select lines are active high. The segment byte is shifted out LSB first, so the
/// decimal point (bit 0) lands on the register's last output.
///
/// ```no_run
/// # use embassy_rp::gpio::{Level, Output};
/// use mex_clock::led4::{OutputArray, ShiftRegisterBus};
///
/// # fn example(p: embassy_rp::Peripherals) {
/// let bus = ShiftRegisterBus::new(
///     OutputArray::new([
///         Output::new(p.PIN_10, Level::Low),
///         Output::new(p.PIN_11, Level::Low),
///         Output::new(p.PIN_12, Level::Low),
///         Output::new(p.PIN_13, Level::Low),
///     ]),
///     Output::new(p.PIN_2, Level::Low), // latch
///     Output::new(p.PIN_3, Level::Low), // data
///     Output::new(p.PIN_4, Level::Low), // clock
///     Output::new(p.PIN_14, Level::High), // colon
///     Output::new(p.PIN_15, Level::High), // degree sign
/// );
/// # }
/// ```
pub struct ShiftRegisterBus<'a> {
    digits: OutputArray<'a, CELL_COUNT>,
    latch: Output<'a>,
    data: Output<'a>,
    clock: Output<'a>,
    colon: Output<'a>,
    degree_sign: Output<'a>,
}

impl<'a> ShiftRegisterBus<'a> {
    #[must_use]
    pub const fn new(
        digits: OutputArray<'a, CELL_COUNT>,
        latch: Output<'a>,
        data: Output<'a>,
        clock: Output<'a>,
        colon: Output<'a>,
        degree_sign: Output<'a>,
    ) -> Self {
        Self {
            digits,
            latch,
            data,
            clock,
            colon,
            degree_sign,
        }
    }

    #[expect(clippy::shadow_reuse, reason = "Consuming the byte bit by bit")]
    fn shift_out(&mut self, segments: u8) {
        let mut segments = segments;
        self.latch.set_low();
        for _ in 0..u8::BITS {
            self.data.set_level(Level::from(segments & 1 == 1));
            self.clock.set_high();
            self.clock.set_low();
            segments >>= 1;
        }
        self.latch.set_high();
    }
}

impl SegmentBus for ShiftRegisterBus<'_> {
    fn show(&mut self, index: usize, segments: u8) {
        self.digits.set_all(Level::Low);
        self.shift_out(segments);
        if self.digits.set_level_at_index(index, Level::High).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("digit {} has no select line", index);
        }
    }

    fn blank(&mut self) {
        self.digits.set_all(Level::Low);
    }

    // Both indicators are common-anode LEDs: low lights them.
    fn set_indicators(&mut self, colon: bool, degree_sign: bool) {
        self.colon.set_level(Level::from(!colon));
        self.degree_sign.set_level(Level::from(!degree_sign));
    }
}
