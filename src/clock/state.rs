//! Clock modes and what each one does on a scheduler tick.

use embassy_time::Instant;

use super::{ALARM_BANNER, Clock, EDIT_ALARM_LABEL, EDIT_TIME_LABEL, ERROR_MESSAGE};
use crate::button::InputSource;
use crate::clock_time::TimeSource;
use crate::led4::SegmentBus;
use crate::temperature::TemperatureSource;
use crate::{REFRESH_INTERVAL, SHOW_TEMPERATURE_DWELL, SHOW_TIME_DWELL};

/// Display modes of the clock.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Set the time: label, then HH:MM with the digit under the cursor blinking.
    EditTime,
    /// Set the alarm: like [`ClockMode::EditTime`]; decimal points show whether it is enabled.
    EditAlarm,
    ShowTime,
    ShowTemperature,
    ShowAlarmRinging,
    /// Time source failed at startup. Buttons and the alarm stay off until restart.
    Error,
}

impl ClockMode {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::EditTime | Self::EditAlarm)
    }

    /// Ringing pre-empts the display modes only.
    #[must_use]
    pub const fn can_be_interrupted_by_alarm(self) -> bool {
        matches!(self, Self::ShowTime | Self::ShowTemperature)
    }

    /// Runs this mode for one tick and returns the mode for the next one.
    ///
    /// `entering` is true on the first tick after a transition into this mode.
    pub(super) fn execute<B, T, I, S>(
        self,
        clock: &mut Clock<'_, B, T, I, S>,
        entering: bool,
        now: Instant,
    ) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        match self {
            Self::EditTime => self.execute_edit_time(clock, entering, now),
            Self::EditAlarm => self.execute_edit_alarm(clock, entering, now),
            Self::ShowTime => self.execute_show_time(clock, entering, now),
            Self::ShowTemperature => self.execute_show_temperature(clock, entering, now),
            Self::ShowAlarmRinging => self.execute_alarm_ringing(clock),
            Self::Error => self.execute_error(clock, entering),
        }
    }

    fn execute_edit_time<B, T, I, S>(
        self,
        clock: &mut Clock<'_, B, T, I, S>,
        entering: bool,
        now: Instant,
    ) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        if entering {
            clock.start_label(EDIT_TIME_LABEL, now);
        }
        if clock.label_expired(now) {
            let time = clock.time_source.now();
            clock.begin_edit(time.hour(), time.minute());
        }
        self
    }

    fn execute_edit_alarm<B, T, I, S>(
        self,
        clock: &mut Clock<'_, B, T, I, S>,
        entering: bool,
        now: Instant,
    ) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        if entering {
            clock.start_label(EDIT_ALARM_LABEL, now);
        }
        if clock.label_expired(now) {
            let alarm_time = clock.alarm.alarm_time();
            clock.begin_edit(alarm_time.hour(), alarm_time.minute());
            clock.display.set_decimal_points(clock.alarm.is_enabled());
        }
        self
    }

    fn execute_show_time<B, T, I, S>(
        self,
        clock: &mut Clock<'_, B, T, I, S>,
        entering: bool,
        now: Instant,
    ) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        if entering {
            clock.refresh_time();
            clock.display.enable_clock_display();
            clock.last_refresh = now;
            clock.mode_entered_at = now;
        }

        if now.saturating_duration_since(clock.last_refresh) >= REFRESH_INTERVAL {
            clock.refresh_time();
            clock.last_refresh = now;
        }

        if now.saturating_duration_since(clock.mode_entered_at) > SHOW_TIME_DWELL {
            Self::ShowTemperature
        } else {
            self
        }
    }

    fn execute_show_temperature<B, T, I, S>(
        self,
        clock: &mut Clock<'_, B, T, I, S>,
        entering: bool,
        now: Instant,
    ) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        if entering {
            clock.refresh_temperature();
            clock.display.enable_temp_display();
            clock.last_refresh = now;
            clock.mode_entered_at = now;
        }

        if now.saturating_duration_since(clock.last_refresh) >= REFRESH_INTERVAL {
            clock.refresh_temperature();
            clock.last_refresh = now;
        }

        if now.saturating_duration_since(clock.mode_entered_at) > SHOW_TEMPERATURE_DWELL {
            Self::ShowTime
        } else {
            self
        }
    }

    // Repainted every tick; any button press dismisses (see `Clock::handle_button`).
    fn execute_alarm_ringing<B, T, I, S>(self, clock: &Clock<'_, B, T, I, S>) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        clock.display.disable_display();
        clock.display.write_message(ALARM_BANNER);
        clock.display.enable_display();
        self
    }

    fn execute_error<B, T, I, S>(self, clock: &mut Clock<'_, B, T, I, S>, entering: bool) -> Self
    where
        B: SegmentBus,
        T: TimeSource,
        I: InputSource,
        S: TemperatureSource,
    {
        if entering {
            #[cfg(feature = "defmt")]
            defmt::error!("time source failed, buttons and alarm disabled");
            clock.display.enable_numeric_display();
            clock.display.write_message(ERROR_MESSAGE);
            clock.alarm.disable();
        }
        self
    }
}
