//! A device abstraction for a multiplexed 4-digit, 7-segment LED display.
//!
//! The digit buffer ([`Frame`]) is shared between the main loop, which writes it through
//! the [`Led4`] handle, and the multiplex task, which renders one digit per tick onto a
//! [`SegmentBus`]. Every access goes through a critical-section [`Mutex`], so a multi-field
//! update is never observed half done by the render tick.
//!
//! See [`Led4`] for the main device abstraction.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_time::Duration;
use static_cell::StaticCell;

use crate::MULTIPLEX_PERIOD;
use crate::glyph::Glyph;

mod frame;
pub use frame::{DigitSlot, DisplayAttributes, Frame, Render, Visibility};

#[cfg(any(test, feature = "host"))]
mod recording_bus;
#[cfg(any(test, feature = "host"))]
pub use recording_bus::RecordingBus;

#[cfg(feature = "pico1")]
mod output_array;
#[cfg(feature = "pico1")]
pub use output_array::OutputArray;

#[cfg(feature = "pico1")]
mod shift_register_bus;
#[cfg(feature = "pico1")]
pub use shift_register_bus::ShiftRegisterBus;

/// The number of cells (digits) in the display.
pub const CELL_COUNT: usize = 4;

/// The physical side of the display: one segment pattern at a time plus two indicators.
pub trait SegmentBus {
    /// Drives `segments` (0 = lit) onto the shared segment lines and selects digit `index`.
    /// Every other digit is deselected.
    fn show(&mut self, index: usize, segments: u8);

    /// Deselects every digit.
    fn blank(&mut self);

    fn set_indicators(&mut self, colon: bool, degree_sign: bool);
}

/// A [`Frame`] bound to the bus it renders onto.
pub struct Multiplexer<B> {
    frame: Frame,
    bus: B,
}

impl<B: SegmentBus> Multiplexer<B> {
    #[must_use]
    pub const fn new(bus: B) -> Self {
        Self {
            frame: Frame::new(),
            bus,
        }
    }

    /// Advances the frame by one tick and drives the result onto the bus.
    pub fn render(&mut self) -> Render {
        let render = self.frame.tick();
        self.bus.blank();
        self.bus.set_indicators(render.colon, render.degree_sign);
        if render.lit {
            self.bus.show(render.index, render.segments);
        }
        render
    }
}

/// State shared between the [`Led4`] handle and the multiplex tick.
pub type Led4Shared<B> = Mutex<CriticalSectionRawMutex, RefCell<Multiplexer<B>>>;

/// Static storage for a [`Led4`] device.
pub type Led4Static<B> = StaticCell<Led4Shared<B>>;

/// A device abstraction for a multiplexed 4-digit, 7-segment LED display.
///
/// The handle is `Copy`; every copy talks to the same display. Setters take effect on the
/// next multiplex tick (or immediately for [`Led4::disable_display`]). Out-of-range digit
/// indexes are ignored.
///
/// # Example
///
/// ```no_run
/// use mex_clock::{Glyph, led4::{Led4, Led4Shared, Multiplexer, RecordingBus}};
/// # use core::cell::RefCell;
/// # use embassy_sync::blocking_mutex::Mutex;
///
/// let shared: Led4Shared<RecordingBus> = Mutex::new(RefCell::new(Multiplexer::new(RecordingBus::new())));
/// let display = Led4::from_shared(&shared);
/// display.enable_clock_display();
/// display.write_digits([Glyph::Digit(1), Glyph::Digit(2), Glyph::Digit(4), Glyph::Digit(5)]);
/// display.enable_blink(0);
/// ```
pub struct Led4<'a, B>(&'a Led4Shared<B>);

impl<B> Clone for Led4<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Led4<'_, B> {}

impl<'a, B: SegmentBus> Led4<'a, B> {
    /// Creates static storage for the display.
    #[must_use]
    pub const fn new_static() -> Led4Static<B> {
        StaticCell::new()
    }

    /// Wraps already-initialized shared state.
    #[must_use]
    pub const fn from_shared(shared: &'a Led4Shared<B>) -> Self {
        Self(shared)
    }

    /// Initializes the static storage with `bus` and returns the handle.
    ///
    /// Nothing renders until something calls [`Led4::tick`].
    #[must_use]
    pub fn init(led4_static: &'static Led4Static<B>, bus: B) -> Led4<'static, B> {
        Led4(led4_static.init(Mutex::new(RefCell::new(Multiplexer::new(bus)))))
    }

    fn with<R>(self, f: impl FnOnce(&mut Multiplexer<B>) -> R) -> R {
        self.0.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn with_frame<R>(self, f: impl FnOnce(&mut Frame) -> R) -> R {
        self.with(|multiplexer| f(&mut multiplexer.frame))
    }

    pub fn write_digit(self, index: usize, glyph: impl Into<Glyph>) {
        let glyph = glyph.into();
        self.with_frame(|frame| frame.write_digit(index, glyph));
    }

    /// Writes all four digits in one critical section.
    pub fn write_digits(self, glyphs: [Glyph; CELL_COUNT]) {
        self.with_frame(|frame| frame.write_digits(glyphs));
    }

    /// Writes up to four characters; the rest of the display is blanked.
    pub fn write_message(self, text: &str) {
        self.with_frame(|frame| frame.write_message(text));
    }

    pub fn enable_digit(self, index: usize) {
        self.with_frame(|frame| frame.set_visibility(index, Visibility::On));
    }

    pub fn disable_digit(self, index: usize) {
        self.with_frame(|frame| frame.set_visibility(index, Visibility::Off));
    }

    pub fn enable_blink(self, index: usize) {
        self.with_frame(|frame| frame.set_visibility(index, Visibility::Blinking));
    }

    /// Same as [`Led4::enable_digit`].
    pub fn disable_blink(self, index: usize) {
        self.enable_digit(index);
    }

    pub fn enable_decimal_point(self, index: usize) {
        self.with_frame(|frame| frame.set_decimal_point(index, true));
    }

    pub fn disable_decimal_point(self, index: usize) {
        self.with_frame(|frame| frame.set_decimal_point(index, false));
    }

    /// Shows or hides every decimal point at once.
    pub fn set_decimal_points(self, shown: bool) {
        self.with_frame(|frame| frame.set_all_decimal_points(shown));
    }

    pub fn enable_colon(self) {
        self.with_frame(|frame| frame.set_colon(true));
    }

    pub fn disable_colon(self) {
        self.with_frame(|frame| frame.set_colon(false));
    }

    pub fn enable_degree_sign(self) {
        self.with_frame(|frame| frame.set_degree_sign(true));
    }

    pub fn disable_degree_sign(self) {
        self.with_frame(|frame| frame.set_degree_sign(false));
    }

    /// 0 keeps every digit dark, 255 keeps the selected digit lit for the whole period.
    pub fn set_brightness(self, brightness: u8) {
        self.with_frame(|frame| frame.set_brightness(brightness));
    }

    pub fn enable_display(self) {
        self.with_frame(|frame| frame.set_all_visibility(Visibility::On));
    }

    /// Turns every digit off and blanks the bus, indicators included, before returning.
    ///
    /// The colon and degree sign come back on the next tick if the frame still asks for them.
    pub fn disable_display(self) {
        self.with(|multiplexer| {
            multiplexer.frame.set_all_visibility(Visibility::Off);
            multiplexer.bus.blank();
            multiplexer.bus.set_indicators(false, false);
        });
    }

    pub fn enable_blink_display(self) {
        self.with_frame(|frame| frame.set_all_visibility(Visibility::Blinking));
    }

    /// Same as [`Led4::enable_display`].
    pub fn disable_blink_display(self) {
        self.enable_display();
    }

    pub fn enable_clock_display(self) {
        self.with_frame(Frame::clock_layout);
    }

    pub fn enable_temp_display(self) {
        self.with_frame(Frame::temperature_layout);
    }

    pub fn enable_numeric_display(self) {
        self.with_frame(Frame::numeric_layout);
    }

    /// Renders the next digit and returns how long it should stay lit.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "brightness <= 255, so the product stays far below u64::MAX"
    )]
    pub fn tick(self) -> Duration {
        let render = self.with(Multiplexer::render);
        MULTIPLEX_PERIOD * u32::from(render.brightness) / u32::from(u8::MAX)
    }

    /// Deselects every digit without touching the frame; ends a dimmed digit's on-time.
    pub fn blank(self) {
        self.with(|multiplexer| multiplexer.bus.blank());
    }

    /// A copy of one digit slot.
    #[must_use]
    pub fn slot(self, index: usize) -> Option<DigitSlot> {
        self.with_frame(|frame| frame.slot(index).copied())
    }

    #[must_use]
    pub fn attributes(self) -> DisplayAttributes {
        self.with_frame(|frame| *frame.attributes())
    }

    /// Runs `f` against the bus, e.g. to inspect a [`RecordingBus`].
    pub fn inspect_bus<R>(self, f: impl FnOnce(&B) -> R) -> R {
        self.with(|multiplexer| f(&multiplexer.bus))
    }
}

#[cfg(feature = "pico1")]
impl Led4<'static, ShiftRegisterBus<'static>> {
    /// Creates the display device and spawns its multiplex task on `spawner`.
    ///
    /// Pass the spawner of a high-priority `InterruptExecutor` so rendering preempts the
    /// main loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    #[must_use = "Must be used to manage the spawned task"]
    pub fn new(
        led4_static: &'static Led4Static<ShiftRegisterBus<'static>>,
        bus: ShiftRegisterBus<'static>,
        spawner: embassy_executor::SendSpawner,
    ) -> crate::Result<Self> {
        let led4 = Self::init(led4_static, bus);
        let token = multiplex_loop(led4)?;
        spawner.spawn(token);
        Ok(led4)
    }
}

#[cfg(feature = "pico1")]
#[embassy_executor::task]
async fn multiplex_loop(led4: Led4<'static, ShiftRegisterBus<'static>>) -> ! {
    use embassy_time::{Ticker, Timer};

    #[cfg(feature = "defmt")]
    defmt::info!("multiplex loop started, period {} us", MULTIPLEX_PERIOD.as_micros());
    let mut ticker = Ticker::every(MULTIPLEX_PERIOD);
    loop {
        let on_time = led4.tick();
        // At zero on-time the tick drove nothing, so there is nothing to end.
        if on_time > Duration::from_ticks(0) && on_time < MULTIPLEX_PERIOD {
            Timer::after(on_time).await;
            led4.blank();
        }
        ticker.next().await;
    }
}
