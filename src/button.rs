//! Push-button input: click classification and the [`InputSource`] seam.
//!
//! The clock polls its input once per scheduler tick. Each physical press is reported at
//! most once, as a [`ButtonEvent`] tagged with the [`ButtonId`] it came from.

use embassy_time::Instant;

use crate::{BUTTON_DEBOUNCE_DELAY, DOUBLE_CLICK_WINDOW, LONG_PRESS_DURATION};

/// The two logical buttons of the clock.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ButtonId {
    /// Moves the edit cursor; long press commits or toggles.
    Navigate,
    /// Increments the digit under the cursor; long press commits the alarm.
    Value,
}

/// What a press (or two quick presses) turned out to be.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ButtonEvent {
    SingleClick,
    DoubleClick,
    /// Sent once, while the button is still held.
    LongPressStart,
}

impl ButtonEvent {
    /// How many clicks the event stands for; `None` for a long press.
    #[must_use]
    pub const fn clicks(self) -> Option<u8> {
        match self {
            Self::SingleClick => Some(1),
            Self::DoubleClick => Some(2),
            Self::LongPressStart => None,
        }
    }
}

/// Source of already-classified button events.
pub trait InputSource {
    /// Returns the next pending event, if any.
    fn poll(&mut self, now: Instant) -> Option<(ButtonId, ButtonEvent)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Pressed { since: Instant, second: bool },
    Released { at: Instant },
    LongPressed,
}

/// Turns a sampled button level into click events.
///
/// Feed it the raw level every few milliseconds. A level change is accepted once it has
/// been stable for [`BUTTON_DEBOUNCE_DELAY`]. A release followed by a second press within
/// [`DOUBLE_CLICK_WINDOW`] is a double click; holding for [`LONG_PRESS_DURATION`] is a long
/// press, reported before release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickDetector {
    phase: Phase,
    stable_down: bool,
    raw_down: bool,
    raw_since: Instant,
}

impl Default for ClickDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            stable_down: false,
            raw_down: false,
            raw_since: Instant::MIN,
        }
    }

    /// Feeds one sample and returns the event it completes, if any.
    pub fn update(&mut self, is_down: bool, now: Instant) -> Option<ButtonEvent> {
        if is_down != self.raw_down {
            self.raw_down = is_down;
            self.raw_since = now;
        }
        let settled = now.saturating_duration_since(self.raw_since) >= BUTTON_DEBOUNCE_DELAY;
        let edge = settled && self.raw_down != self.stable_down;
        if edge {
            self.stable_down = self.raw_down;
        }

        let (phase, event) = match (self.phase, edge, self.stable_down) {
            (Phase::Idle, true, true) => (
                Phase::Pressed {
                    since: now,
                    second: false,
                },
                None,
            ),
            (Phase::Pressed { second: false, .. }, true, false) => {
                (Phase::Released { at: now }, None)
            }
            (Phase::Pressed { second: true, .. }, true, false) => {
                (Phase::Idle, Some(ButtonEvent::DoubleClick))
            }
            (Phase::Pressed { since, .. }, false, true)
                if now.saturating_duration_since(since) >= LONG_PRESS_DURATION =>
            {
                (Phase::LongPressed, Some(ButtonEvent::LongPressStart))
            }
            (Phase::Released { at }, true, true)
                if now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW =>
            {
                (
                    Phase::Pressed {
                        since: now,
                        second: true,
                    },
                    None,
                )
            }
            (Phase::Released { .. }, true, true) => (
                Phase::Pressed {
                    since: now,
                    second: false,
                },
                Some(ButtonEvent::SingleClick),
            ),
            (Phase::Released { at }, false, false)
                if now.saturating_duration_since(at) > DOUBLE_CLICK_WINDOW =>
            {
                (Phase::Idle, Some(ButtonEvent::SingleClick))
            }
            (Phase::LongPressed, true, false) => (Phase::Idle, None),
            (phase, _, _) => (phase, None),
        };
        self.phase = phase;
        event
    }
}

#[cfg(feature = "pico1")]
pub use buttons::Buttons;

#[cfg(feature = "pico1")]
mod buttons {
    use embassy_rp::gpio::Input;
    use embassy_time::Instant;
    use heapless::Deque;

    use super::{ButtonEvent, ButtonId, ClickDetector, InputSource};

    /// Two active-low push buttons (pressed pulls the pin to ground).
    pub struct Buttons<'a> {
        navigate: (Input<'a>, ClickDetector),
        value: (Input<'a>, ClickDetector),
        pending: Deque<(ButtonId, ButtonEvent), 4>,
    }

    impl<'a> Buttons<'a> {
        #[must_use]
        pub fn new(navigate: Input<'a>, value: Input<'a>) -> Self {
            Self {
                navigate: (navigate, ClickDetector::new()),
                value: (value, ClickDetector::new()),
                pending: Deque::new(),
            }
        }

        fn sample(&mut self, now: Instant) {
            for (id, (input, detector)) in [
                (ButtonId::Navigate, &mut self.navigate),
                (ButtonId::Value, &mut self.value),
            ] {
                if let Some(event) = detector.update(input.is_low(), now) {
                    #[cfg(feature = "defmt")]
                    defmt::info!("button {:?}: {:?}", id, event);
                    // A full queue means the clock stopped polling; dropping is fine.
                    let _ = self.pending.push_back((id, event));
                }
            }
        }
    }

    impl InputSource for Buttons<'_> {
        fn poll(&mut self, now: Instant) -> Option<(ButtonId, ButtonEvent)> {
            self.sample(now);
            self.pending.pop_front()
        }
    }
}
