//! [`TimeSource`] over the RP2040's on-chip real-time clock.

#[cfg(feature = "defmt")]
use defmt::{info, warn};
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use time::{Date, Month, PrimitiveDateTime, Time, Weekday};

use crate::Result;
use crate::clock_time::{CalendarTime, DEFAULT_TIME, SyncStatus, TimeSource};

/// The on-chip RTC, seeded with [`DEFAULT_TIME`] if it is not already running.
///
/// A reading that fails or does not form a valid date falls back to the last good one.
pub struct RtcClock<'a> {
    rtc: Rtc<'a, RTC>,
    last_good: CalendarTime,
    sync_status: SyncStatus,
}

impl<'a> RtcClock<'a> {
    #[must_use]
    pub fn new(rtc: Rtc<'a, RTC>) -> Self {
        let mut clock = Self {
            rtc,
            last_good: DEFAULT_TIME,
            sync_status: SyncStatus::NotSynced,
        };
        clock.sync_status = match clock.synchronize() {
            Ok(()) => SyncStatus::Synced,
            #[cfg_attr(
                not(feature = "defmt"),
                expect(unused_variables, reason = "Only the logger reads it")
            )]
            Err(err) => {
                #[cfg(feature = "defmt")]
                warn!("RTC sync failed: {}", defmt::Display2Format(&err));
                SyncStatus::SyncFailed
            }
        };
        #[cfg(feature = "defmt")]
        info!("RTC sync status: {:?}", clock.sync_status);
        clock
    }

    fn synchronize(&mut self) -> Result<()> {
        if !self.rtc.is_running() {
            #[cfg(feature = "defmt")]
            info!("RTC stopped, seeding with the default time");
            self.rtc.set_datetime(to_rtc(DEFAULT_TIME))?;
        }
        let now = self.rtc.now()?;
        if let Some(calendar) = from_rtc(&now) {
            self.last_good = calendar;
        }
        Ok(())
    }
}

impl TimeSource for RtcClock<'_> {
    fn now(&mut self) -> CalendarTime {
        if let Some(calendar) = self.rtc.now().ok().as_ref().and_then(from_rtc) {
            self.last_good = calendar;
        }
        self.last_good
    }

    fn set_time(&mut self, time: CalendarTime) -> Result<()> {
        self.rtc.set_datetime(to_rtc(time))?;
        self.last_good = time;
        #[cfg(feature = "defmt")]
        info!("time set to {:02}:{:02}", time.hour(), time.minute());
        Ok(())
    }

    fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "Only years 0..=4095 fit the RTC; the default and edited times stay well inside"
)]
fn to_rtc(calendar: CalendarTime) -> DateTime {
    DateTime {
        year: calendar.year() as u16,
        month: u8::from(calendar.month()),
        day: calendar.day(),
        day_of_week: match calendar.weekday() {
            Weekday::Sunday => DayOfWeek::Sunday,
            Weekday::Monday => DayOfWeek::Monday,
            Weekday::Tuesday => DayOfWeek::Tuesday,
            Weekday::Wednesday => DayOfWeek::Wednesday,
            Weekday::Thursday => DayOfWeek::Thursday,
            Weekday::Friday => DayOfWeek::Friday,
            Weekday::Saturday => DayOfWeek::Saturday,
        },
        hour: calendar.hour(),
        minute: calendar.minute(),
        second: calendar.second(),
    }
}

fn from_rtc(date_time: &DateTime) -> Option<CalendarTime> {
    let month = Month::try_from(date_time.month).ok()?;
    let date = Date::from_calendar_date(i32::from(date_time.year), month, date_time.day).ok()?;
    let time = Time::from_hms(date_time.hour, date_time.minute, date_time.second).ok()?;
    Some(PrimitiveDateTime::new(date, time))
}
