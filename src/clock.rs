//! The clock's mode controller.
//!
//! [`Clock::tick`] runs once per scheduler tick from the main loop. It polls the buttons,
//! lets a ringing alarm pre-empt the display modes, re-arms a dismissed alarm after a
//! minute, and then runs the current [`ClockMode`]. Everything it shows goes through the
//! [`Led4`] handle, so the multiplex task keeps rendering concurrently.

#[cfg(feature = "defmt")]
use defmt::{info, warn};
use embassy_time::Instant;

use crate::alarm::Alarm;
use crate::button::{ButtonEvent, ButtonId, InputSource};
use crate::clock_time::{SyncStatus, TimeSource, with_hour_minute};
use crate::error::log_failure;
use crate::glyph::Glyph;
use crate::led4::{Led4, SegmentBus};
use crate::temperature::{TemperatureSource, clamp_for_display};
use crate::{ALARM_REARM_DELAY, EDIT_LABEL_DURATION};

mod editor;
pub mod state;

pub use editor::DigitEditor;
use state::ClockMode;

/// Label shown when time editing starts.
pub const EDIT_TIME_LABEL: &str = "hora";
/// Label shown when alarm editing starts; only the first four letters fit.
pub const EDIT_ALARM_LABEL: &str = "alarme";
/// Banner repainted while the alarm rings.
pub const ALARM_BANNER: &str = "AlAr";
/// Shown in [`ClockMode::Error`].
pub const ERROR_MESSAGE: &str = "ErrO";

/// The clock/alarm appliance: display, time, buttons, thermometer and one alarm.
///
/// ```no_run
/// # use mex_clock::{Clock, ClockMode, led4::RecordingBus};
/// # fn example<T, I, S>(
/// #     display: mex_clock::Led4<'_, RecordingBus>,
/// #     time: T,
/// #     input: I,
/// #     thermometer: S,
/// # ) where
/// #     T: mex_clock::TimeSource,
/// #     I: mex_clock::InputSource,
/// #     S: mex_clock::TemperatureSource,
/// # {
/// use embassy_time::Instant;
///
/// let mut clock = Clock::new(display, time, input, thermometer, Instant::now());
/// assert_eq!(clock.mode(), ClockMode::EditTime);
/// loop {
///     clock.tick(Instant::now());
/// }
/// # }
/// ```
pub struct Clock<'a, B, T, I, S> {
    display: Led4<'a, B>,
    time_source: T,
    input: I,
    thermometer: S,
    alarm: Alarm,
    mode: ClockMode,
    previous_mode: ClockMode,
    entry_pending: bool,
    editor: DigitEditor,
    label_until: Option<Instant>,
    mode_entered_at: Instant,
    last_refresh: Instant,
    dismissed_at: Option<Instant>,
}

impl<'a, B, T, I, S> Clock<'a, B, T, I, S>
where
    B: SegmentBus,
    T: TimeSource,
    I: InputSource,
    S: TemperatureSource,
{
    /// Starts in [`ClockMode::EditTime`] so the time gets set at power-up, or in
    /// [`ClockMode::Error`] if `time_source` did not synchronize.
    ///
    /// The alarm starts disabled at midnight.
    #[must_use]
    pub fn new(
        display: Led4<'a, B>,
        mut time_source: T,
        input: I,
        thermometer: S,
        now: Instant,
    ) -> Self {
        let alarm = Alarm::new(time_source.now());
        let sync_status = time_source.sync_status();
        let mode = if sync_status == SyncStatus::Synced {
            ClockMode::EditTime
        } else {
            #[cfg(feature = "defmt")]
            warn!("{}", defmt::Display2Format(&crate::Error::TimeSync(sync_status)));
            ClockMode::Error
        };
        #[cfg(feature = "defmt")]
        info!("clock starting in {:?}", mode);

        Self {
            display,
            time_source,
            input,
            thermometer,
            alarm,
            mode,
            previous_mode: mode,
            entry_pending: true,
            editor: DigitEditor::default(),
            label_until: None,
            mode_entered_at: now,
            last_refresh: now,
            dismissed_at: None,
        }
    }

    /// Runs one scheduler tick.
    pub fn tick(&mut self, now: Instant) {
        if self.mode != ClockMode::Error {
            if let Some((button, event)) = self.input.poll(now) {
                self.handle_button(button, event, now);
            }
        }

        if self.mode.can_be_interrupted_by_alarm()
            && self.alarm.is_triggered(self.time_source.now())
        {
            #[cfg(feature = "defmt")]
            info!("alarm ringing");
            self.refresh_time();
            self.display.enable_clock_display();
            self.transition(ClockMode::ShowAlarmRinging);
        }

        if let Some(dismissed_at) = self.dismissed_at {
            if now.saturating_duration_since(dismissed_at) > ALARM_REARM_DELAY {
                #[cfg(feature = "defmt")]
                info!("alarm re-armed");
                self.alarm.enable();
                self.dismissed_at = None;
            }
        }

        let entering = core::mem::take(&mut self.entry_pending);
        let mode = self.mode;
        let next = mode.execute(self, entering, now);
        self.transition(next);
    }

    /// Silences a ringing alarm: back to [`ClockMode::ShowTime`] with the alarm disabled
    /// until the re-arm delay has passed. Does nothing unless the alarm is ringing.
    pub fn dismiss_alarm(&mut self, now: Instant) {
        if self.mode != ClockMode::ShowAlarmRinging {
            return;
        }
        #[cfg(feature = "defmt")]
        info!("alarm dismissed");
        self.alarm.disable();
        self.dismissed_at = Some(now);
        self.transition(ClockMode::ShowTime);
    }

    #[must_use]
    pub const fn mode(&self) -> ClockMode {
        self.mode
    }

    /// The mode before the most recent transition.
    #[must_use]
    pub const fn previous_mode(&self) -> ClockMode {
        self.previous_mode
    }

    #[must_use]
    pub const fn alarm(&self) -> &Alarm {
        &self.alarm
    }

    pub const fn alarm_mut(&mut self) -> &mut Alarm {
        &mut self.alarm
    }

    /// The digits being edited; meaningful in the edit modes only.
    #[must_use]
    pub const fn editor(&self) -> &DigitEditor {
        &self.editor
    }

    #[must_use]
    pub const fn display(&self) -> Led4<'a, B> {
        self.display
    }

    pub const fn time_source_mut(&mut self) -> &mut T {
        &mut self.time_source
    }

    pub const fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub const fn thermometer_mut(&mut self) -> &mut S {
        &mut self.thermometer
    }

    fn transition(&mut self, next: ClockMode) {
        if next == self.mode {
            return;
        }
        #[cfg(feature = "defmt")]
        info!("mode {:?} -> {:?}", self.mode, next);
        self.previous_mode = self.mode;
        self.mode = next;
        self.entry_pending = true;
        self.label_until = None;
    }

    /// True while an edit mode has not finished its entry (label still showing).
    const fn edit_entry_in_progress(&self) -> bool {
        self.mode.is_editing() && (self.entry_pending || self.label_until.is_some())
    }

    fn handle_button(&mut self, button: ButtonId, event: ButtonEvent, now: Instant) {
        if self.mode == ClockMode::ShowAlarmRinging {
            self.dismiss_alarm(now);
            return;
        }
        if self.edit_entry_in_progress() {
            return;
        }

        match (button, event.clicks()) {
            (ButtonId::Navigate, Some(step)) if self.mode.is_editing() => {
                self.display.disable_blink(self.editor.cursor());
                self.editor.advance_cursor(step);
                self.display.enable_blink(self.editor.cursor());
            }
            (ButtonId::Value, Some(step)) if self.mode.is_editing() => {
                let value = self.editor.increment(step);
                self.display.write_digit(self.editor.cursor(), value);
            }
            (ButtonId::Navigate, None) => match self.mode {
                ClockMode::EditTime => {
                    self.commit_time();
                    self.transition(ClockMode::ShowTime);
                }
                ClockMode::EditAlarm => self.toggle_alarm(),
                ClockMode::ShowTime | ClockMode::ShowTemperature => {
                    self.transition(ClockMode::EditTime);
                }
                ClockMode::ShowAlarmRinging | ClockMode::Error => {}
            },
            (ButtonId::Value, None) => match self.mode {
                ClockMode::EditAlarm => {
                    self.commit_alarm();
                    self.transition(ClockMode::ShowTime);
                }
                ClockMode::ShowTime | ClockMode::ShowTemperature => {
                    self.transition(ClockMode::EditAlarm);
                }
                ClockMode::EditTime | ClockMode::ShowAlarmRinging | ClockMode::Error => {}
            },
            (_, Some(_)) => {}
        }
    }

    fn commit_time(&mut self) {
        let (hour, minute) = (self.editor.hour(), self.editor.minute());
        let result = with_hour_minute(self.time_source.now(), hour, minute)
            .and_then(|time| self.time_source.set_time(time));
        log_failure("time not set", result);
    }

    fn commit_alarm(&mut self) {
        let result = self
            .alarm
            .set_alarm_time(self.editor.hour(), self.editor.minute());
        log_failure("alarm not set", result);
    }

    fn toggle_alarm(&mut self) {
        if self.alarm.is_enabled() {
            self.alarm.disable();
        } else {
            self.alarm.enable();
        }
        self.display.set_decimal_points(self.alarm.is_enabled());
    }

    fn refresh_time(&mut self) {
        let now = self.time_source.now();
        self.display.write_digits(time_glyphs(now.hour(), now.minute()));
    }

    fn refresh_temperature(&mut self) {
        self.thermometer.request_reading();
        let tenths = clamp_for_display(self.thermometer.last_reading());
        self.display.write_digits(temperature_glyphs(tenths));
    }

    /// Starts showing an edit label; the edit itself begins once it expires.
    fn start_label(&mut self, label: &str, now: Instant) {
        self.display.enable_numeric_display();
        self.display.write_message(label);
        let until = now.checked_add(EDIT_LABEL_DURATION).unwrap_or(Instant::MAX);
        self.label_until = Some(until);
    }

    /// True once the label started by [`Self::start_label`] has expired (and clears it).
    fn label_expired(&mut self, now: Instant) -> bool {
        match self.label_until {
            Some(until) if now >= until => {
                self.label_until = None;
                true
            }
            _ => false,
        }
    }

    /// Shows the editor's digits as HH:MM with the first digit blinking.
    fn begin_edit(&mut self, hour: u8, minute: u8) {
        self.editor.load(hour, minute);
        self.display.enable_clock_display();
        self.display.write_digits(self.editor.glyphs());
        self.display.enable_blink(self.editor.cursor());
    }
}

#[expect(
    clippy::integer_division_remainder_used,
    reason = "Splitting into decimal digits"
)]
fn time_glyphs(hour: u8, minute: u8) -> [Glyph; 4] {
    [hour / 10, hour % 10, minute / 10, minute % 10].map(Glyph::Digit)
}

#[expect(
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    reason = "tenths <= 999, so every digit fits a u8"
)]
fn temperature_glyphs(tenths: u16) -> [Glyph; 4] {
    [
        Glyph::Digit((tenths / 100) as u8),
        Glyph::Digit((tenths % 100 / 10) as u8),
        Glyph::Digit((tenths % 10) as u8),
        Glyph::Blank,
    ]
}
