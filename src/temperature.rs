//! Temperature readings in tenths of a degree Celsius.

/// Supplies the temperature shown in `ShowTemperature` mode.
pub trait TemperatureSource {
    /// Takes a new reading; may block briefly.
    fn request_reading(&mut self);

    /// The most recent reading, in tenths of a degree Celsius.
    fn last_reading(&self) -> i16;
}

/// Highest temperature the three-digit readout can show (99.9 °C).
pub const MAX_DISPLAY_TENTHS: i16 = 999;

/// Clamps a reading to the displayable 0.0 to 99.9 range.
#[must_use]
pub const fn clamp_for_display(tenths: i16) -> u16 {
    if tenths <= 0 {
        0
    } else if tenths >= MAX_DISPLAY_TENTHS {
        MAX_DISPLAY_TENTHS.unsigned_abs()
    } else {
        tenths.unsigned_abs()
    }
}

#[cfg(feature = "pico1")]
pub use internal::InternalTemperature;

#[cfg(feature = "pico1")]
mod internal {
    use embassy_rp::adc::{Adc, Blocking, Channel, Config};
    use embassy_rp::{Peri, peripherals};

    use super::TemperatureSource;

    const ADC_REFERENCE_VOLTS: f32 = 3.3;
    const ADC_FULL_SCALE: f32 = 4096.0;

    /// The RP2040's on-die temperature sensor, read through the blocking ADC.
    pub struct InternalTemperature<'a> {
        adc: Adc<'a, Blocking>,
        sensor: Channel<'a>,
        last_tenths: i16,
    }

    impl<'a> InternalTemperature<'a> {
        #[must_use]
        pub fn new(
            adc: Peri<'a, peripherals::ADC>,
            sensor: Peri<'a, peripherals::ADC_TEMP_SENSOR>,
        ) -> Self {
            Self {
                adc: Adc::new_blocking(adc, Config::default()),
                sensor: Channel::new_temp_sensor(sensor),
                last_tenths: 0,
            }
        }
    }

    impl TemperatureSource for InternalTemperature<'_> {
        fn request_reading(&mut self) {
            match self.adc.blocking_read(&mut self.sensor) {
                Ok(raw) => self.last_tenths = tenths_from_raw(raw),
                #[cfg_attr(
                    not(feature = "defmt"),
                    expect(unused_variables, reason = "Only the logger reads it")
                )]
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("temperature read failed: {:?}", err);
                }
            }
        }

        fn last_reading(&self) -> i16 {
            self.last_tenths
        }
    }

    // RP2040 datasheet, section 4.9.5: T = 27 - (V - 0.706) / 0.001721.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Result is within -300.0..=500.0 degrees"
    )]
    fn tenths_from_raw(raw: u16) -> i16 {
        let volts = f32::from(raw) * ADC_REFERENCE_VOLTS / ADC_FULL_SCALE;
        let celsius = 27.0 - (volts - 0.706) / 0.001_721;
        (celsius * 10.0) as i16
    }
}
