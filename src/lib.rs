//! Four-digit seven-segment clock, alarm and thermometer.
//!
//! The crate is split in two halves:
//!
//! - a hardware-free core (the [`led4`] multiplexer frame, the [`alarm`] matcher and the
//!   [`clock`] mode controller) that builds and tests on the host, and
//! - RP2040 drivers behind the `pico1` feature that plug the core into a shift-register
//!   LED display, the on-chip RTC, two push buttons and the internal temperature sensor.
#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod button;
pub mod clock;
pub mod clock_time;
mod error;
pub mod glyph;
pub mod led4;
#[cfg(feature = "pico1")]
pub mod rtc_clock;
mod shared_constants;
pub mod temperature;

// Re-export commonly used items
pub use alarm::Alarm;
pub use button::{ButtonEvent, ButtonId, InputSource};
pub use clock::{Clock, state::ClockMode};
pub use clock_time::{CalendarTime, SyncStatus, TimeSource};
pub use error::{Error, Result};
pub use glyph::Glyph;
pub use led4::{Led4, SegmentBus};
pub use shared_constants::*;
pub use temperature::TemperatureSource;
