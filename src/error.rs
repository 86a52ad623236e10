use derive_more::derive::{Display, Error};

use crate::clock_time::SyncStatus;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    #[display("Hour or minute out of range: {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u8, minute: u8 },

    #[display("Time source did not synchronize: {_0:?}")]
    TimeSync(#[error(not(source))] SyncStatus),

    #[cfg(feature = "pico1")]
    #[display("RTC operation failed: {_0:?}")]
    Rtc(#[error(not(source))] embassy_rp::rtc::RtcError),

    #[cfg(feature = "pico1")]
    #[display("ADC read failed: {_0:?}")]
    Adc(#[error(not(source))] embassy_rp::adc::Error),
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_rp::rtc::RtcError> for Error {
    fn from(err: embassy_rp::rtc::RtcError) -> Self {
        Self::Rtc(err)
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_rp::adc::Error> for Error {
    fn from(err: embassy_rp::adc::Error) -> Self {
        Self::Adc(err)
    }
}

/// Logs the error in `result`, if any, and drops it.
#[cfg_attr(
    not(feature = "defmt"),
    expect(unused_variables, reason = "Only the logger reads them")
)]
pub(crate) fn log_failure(context: &'static str, result: Result<()>) {
    if let Err(err) = result {
        #[cfg(feature = "defmt")]
        defmt::warn!("{}: {}", context, defmt::Display2Format(&err));
    }
}
