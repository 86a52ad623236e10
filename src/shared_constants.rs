use embassy_time::Duration;

// Generated by build.rs from `DISPLAY_BRIGHTNESS` (environment or `.env`).
include!(concat!(env!("OUT_DIR"), "/display_config.rs"));

pub const ONE_MINUTE: Duration = Duration::from_secs(60);

/// Time each digit owns the segment bus before the next one is selected.
pub const MULTIPLEX_PERIOD: Duration = Duration::from_millis(5);
/// Number of visits to a blinking digit spent lit, then the same number spent dark.
pub const BLINK_PERIOD: u8 = 10;

/// Cadence of the main control loop.
pub const SCHEDULER_TICK: Duration = Duration::from_millis(10);
/// Maximum age of the time or temperature shown in the display modes.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);
pub const SHOW_TIME_DWELL: Duration = Duration::from_secs(7);
pub const SHOW_TEMPERATURE_DWELL: Duration = Duration::from_secs(3);
/// Delay after a dismissal before the alarm is armed again for the next day.
pub const ALARM_REARM_DELAY: Duration = ONE_MINUTE;
/// How long the "hora" / "alar" label shows when an edit mode is entered.
pub const EDIT_LABEL_DURATION: Duration = Duration::from_millis(600);

pub const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(10);
/// A second press must start within this window to count as a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(250);
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(600);
