//! Fakes and a tick-driven harness shared by the host integration tests.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::RefCell;
use std::collections::VecDeque;

use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant};
use mex_clock::led4::{DigitSlot, Led4Shared, Multiplexer, RecordingBus};
use mex_clock::{
    ButtonEvent, ButtonId, CalendarTime, Clock, Glyph, InputSource, Led4, SCHEDULER_TICK,
    SyncStatus, TemperatureSource, TimeSource,
};

/// A wall clock that only moves when told to.
pub struct FakeTime {
    now: CalendarTime,
    status: SyncStatus,
    set_count: usize,
}

impl FakeTime {
    pub const fn new(now: CalendarTime, status: SyncStatus) -> Self {
        Self {
            now,
            status,
            set_count: 0,
        }
    }

    pub fn advance(&mut self, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).expect("short test durations");
        self.now += time::Duration::milliseconds(millis);
    }

    /// Jumps without counting as a `set_time` call.
    pub const fn jump_to(&mut self, now: CalendarTime) {
        self.now = now;
    }

    pub const fn set_count(&self) -> usize {
        self.set_count
    }
}

impl TimeSource for FakeTime {
    fn now(&mut self) -> CalendarTime {
        self.now
    }

    fn set_time(&mut self, time: CalendarTime) -> mex_clock::Result<()> {
        self.now = time;
        self.set_count += 1;
        Ok(())
    }

    fn sync_status(&self) -> SyncStatus {
        self.status
    }
}

/// Button events queued by the test, handed out one per poll.
#[derive(Default)]
pub struct FakeInput(VecDeque<(ButtonId, ButtonEvent)>);

impl FakeInput {
    pub fn push(&mut self, button: ButtonId, event: ButtonEvent) {
        self.0.push_back((button, event));
    }

    pub fn pending(&self) -> usize {
        self.0.len()
    }
}

impl InputSource for FakeInput {
    fn poll(&mut self, _now: Instant) -> Option<(ButtonId, ButtonEvent)> {
        self.0.pop_front()
    }
}

/// Reports a fixed temperature and counts reading requests.
pub struct FakeThermometer {
    pub tenths: i16,
    pub requests: usize,
}

impl TemperatureSource for FakeThermometer {
    fn request_reading(&mut self) {
        self.requests += 1;
    }

    fn last_reading(&self) -> i16 {
        self.tenths
    }
}

pub type TestClock<'a> = Clock<'a, RecordingBus, FakeTime, FakeInput, FakeThermometer>;

pub fn new_display() -> Led4Shared<RecordingBus> {
    Mutex::new(RefCell::new(Multiplexer::new(RecordingBus::new())))
}

/// Drives a [`Clock`] with a fake time source, moving both clocks one scheduler tick at a time.
pub struct Harness<'a> {
    pub clock: TestClock<'a>,
    pub now: Instant,
}

impl<'a> Harness<'a> {
    pub fn new(display: &'a Led4Shared<RecordingBus>, start: CalendarTime) -> Self {
        Self::with_status(display, start, SyncStatus::Synced)
    }

    pub fn with_status(
        display: &'a Led4Shared<RecordingBus>,
        start: CalendarTime,
        status: SyncStatus,
    ) -> Self {
        let now = Instant::from_secs(1_000);
        let clock = Clock::new(
            Led4::from_shared(display),
            FakeTime::new(start, status),
            FakeInput::default(),
            FakeThermometer {
                tenths: 234,
                requests: 0,
            },
            now,
        );
        Self { clock, now }
    }

    pub fn tick(&mut self) {
        self.now += SCHEDULER_TICK;
        self.clock.time_source_mut().advance(SCHEDULER_TICK);
        self.clock.tick(self.now);
    }

    /// Ticks until at least `duration` has passed.
    pub fn run_for(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.tick();
        }
    }

    /// Queues one button event and runs the tick that consumes it.
    pub fn press(&mut self, button: ButtonId, event: ButtonEvent) {
        self.clock.input_mut().push(button, event);
        self.tick();
    }

    pub fn time(&mut self) -> CalendarTime {
        self.clock.time_source_mut().now()
    }

    pub fn slot(&self, index: usize) -> DigitSlot {
        self.clock.display().slot(index).expect("index in range")
    }

    pub fn glyphs(&self) -> [Glyph; 4] {
        [0, 1, 2, 3].map(|index| self.slot(index).glyph)
    }
}

/// The glyphs `write_message(text)` would produce.
pub fn message(text: &str) -> [Glyph; 4] {
    let mut chars = text.chars();
    [(); 4].map(|()| chars.next().map_or(Glyph::Blank, Glyph::from))
}

pub fn digits(values: [u8; 4]) -> [Glyph; 4] {
    values.map(Glyph::Digit)
}
