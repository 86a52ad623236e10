//! A single daily alarm matched at minute granularity.

#[cfg(feature = "defmt")]
use defmt::info;

use crate::Result;
use crate::clock_time::{CalendarTime, with_hour_minute};

/// One alarm time plus an enabled flag.
///
/// [`Alarm::is_triggered`] holds for the whole matching minute, so callers that act on it
/// must make sure they act only once per match (the clock disables the alarm on dismissal
/// and re-arms it a minute later).
///
/// ```
/// use mex_clock::Alarm;
/// use time::macros::datetime;
///
/// let mut alarm = Alarm::new(datetime!(2024-05-01 21:14:09));
/// alarm.set_alarm_time(7, 30)?;
/// alarm.enable();
/// assert!(alarm.is_triggered(datetime!(2024-05-02 7:30:59)));
/// assert!(!alarm.is_triggered(datetime!(2024-05-02 7:31:00)));
/// # Ok::<(), mex_clock::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alarm {
    alarm_time: CalendarTime,
    enabled: bool,
}

impl Alarm {
    /// A disabled alarm at midnight of `now`'s date.
    #[must_use]
    pub const fn new(now: CalendarTime) -> Self {
        Self {
            alarm_time: now.replace_time(time::Time::MIDNIGHT),
            enabled: false,
        }
    }

    /// Moves the alarm to `hour:minute:00`, keeping its date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeOfDay`](crate::Error::InvalidTimeOfDay) if `hour` is
    /// above 23 or `minute` above 59; the alarm is left unchanged.
    pub fn set_alarm_time(&mut self, hour: u8, minute: u8) -> Result<()> {
        self.alarm_time = with_hour_minute(self.alarm_time, hour, minute)?;
        #[cfg(feature = "defmt")]
        info!("alarm set to {:02}:{:02}", hour, minute);
        Ok(())
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        #[cfg(feature = "defmt")]
        info!("alarm enabled");
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        #[cfg(feature = "defmt")]
        info!("alarm disabled");
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when enabled and `now` falls inside the alarm's hour and minute, on any date.
    #[must_use]
    pub const fn is_triggered(&self, now: CalendarTime) -> bool {
        self.enabled
            && self.alarm_time.hour() == now.hour()
            && self.alarm_time.minute() == now.minute()
    }

    #[must_use]
    pub const fn alarm_time(&self) -> CalendarTime {
        self.alarm_time
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Alarm {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(
            fmt,
            "Alarm {{ {=u8:02}:{=u8:02}, enabled: {} }}",
            self.alarm_time.hour(),
            self.alarm_time.minute(),
            self.enabled
        );
    }
}
