//! Wall-clock time as seen by the mode controller.
//!
//! The controller only reads and writes whole [`CalendarTime`] values through a
//! [`TimeSource`]; how the time is kept (RTC chip, on-chip RTC, a fake in tests) is up to
//! the implementation.

use time::macros::datetime;
use time::{PrimitiveDateTime, Time};

use crate::{Error, Result};

/// Calendar date plus time of day, without a time zone.
pub type CalendarTime = PrimitiveDateTime;

/// The time a source reports before anyone has set it: 2016-01-01 00:00:00.
pub const DEFAULT_TIME: CalendarTime = datetime!(2016-01-01 0:00);

/// Whether a [`TimeSource`] managed to synchronize at startup.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    NotSynced,
    SyncFailed,
}

/// Supplies the current wall-clock time and accepts a new one.
pub trait TimeSource {
    fn now(&mut self) -> CalendarTime;

    /// Replaces the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing clock rejects the value.
    fn set_time(&mut self, time: CalendarTime) -> Result<()>;

    /// Synchronization status, meaningful at startup only.
    fn sync_status(&self) -> SyncStatus;
}

/// `calendar` with its time of day replaced by `hour:minute:00`.
///
/// # Errors
///
/// Returns [`Error::InvalidTimeOfDay`] if `hour` is above 23 or `minute` above 59.
pub fn with_hour_minute(calendar: CalendarTime, hour: u8, minute: u8) -> Result<CalendarTime> {
    let time =
        Time::from_hms(hour, minute, 0).map_err(|_| Error::InvalidTimeOfDay { hour, minute })?;
    Ok(calendar.replace_time(time))
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn hour_minute_replaced_and_seconds_cleared() {
        let before = datetime!(2024-02-29 18:07:42);
        let after = with_hour_minute(before, 6, 30).expect("valid time");
        assert_eq!(after, datetime!(2024-02-29 6:30:00));
    }

    #[test]
    fn out_of_range_hour_or_minute_is_rejected() {
        assert!(matches!(
            with_hour_minute(DEFAULT_TIME, 24, 0),
            Err(Error::InvalidTimeOfDay { hour: 24, minute: 0 })
        ));
        assert!(with_hour_minute(DEFAULT_TIME, 23, 60).is_err());
        assert!(with_hour_minute(DEFAULT_TIME, 23, 59).is_ok());
    }
}
