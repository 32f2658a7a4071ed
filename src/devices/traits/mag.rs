//! Magnetometer Sensor Trait and Data Types
//!
//! Device-independent interface for magnetometers, so heading and logging code
//! does not depend on a particular chip driver.
//!
//! ## Usage
//!
//! ```ignore
//! use qmc5883l::devices::traits::MagnetometerSensor;
//!
//! fn log_field<M: MagnetometerSensor>(mag: &mut M) -> Result<(), M::Error> {
//!     let sample = mag.read_mag()?;
//!     // sample.m_gauss[0..3]
//!     Ok(())
//! }
//! ```

/// One magnetic field measurement
///
/// `raw` holds the signed register counts in X/Y/Z order, `m_gauss` the same
/// vector scaled to milligauss by the resolution in effect when it was read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSample {
    /// Raw counts (X, Y, Z)
    pub raw: [i16; 3],
    /// Field strength in milligauss (X, Y, Z)
    pub m_gauss: [f32; 3],
}

impl MagSample {
    /// Scale raw counts by `resolution` (milligauss per LSB)
    pub fn from_raw(raw: [i16; 3], resolution: f32) -> Self {
        Self {
            raw,
            m_gauss: raw.map(|count| count as f32 * resolution),
        }
    }
}

/// One die temperature measurement
///
/// The value is relative: gain is factory calibrated but the offset is not, so
/// absolute readings need an application-level correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSample {
    /// Raw counts
    pub raw: i16,
    /// Temperature in °C (uncompensated offset)
    pub celsius: f32,
}

impl TemperatureSample {
    /// Convert raw counts with `sensitivity` LSB/°C
    pub fn from_raw(raw: i16, sensitivity: f32) -> Self {
        Self {
            raw,
            celsius: raw as f32 / sensitivity,
        }
    }
}

/// Magnetometer sensor trait
pub trait MagnetometerSensor {
    /// Driver error type
    type Error;

    /// Block until a fresh field measurement is available and return it
    fn read_mag(&mut self) -> Result<MagSample, Self::Error>;

    /// Read the die temperature
    fn read_temperature(&mut self) -> Result<TemperatureSample, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mag_sample_scaling() {
        let sample = MagSample::from_raw([6000, -6000, 0], 1000.0 / 12000.0);
        assert!((sample.m_gauss[0] - 500.0).abs() < 1e-3);
        assert!((sample.m_gauss[1] + 500.0).abs() < 1e-3);
        assert_eq!(sample.m_gauss[2], 0.0);
        assert_eq!(sample.raw, [6000, -6000, 0]);
    }

    #[test]
    fn test_temperature_sample() {
        let t = TemperatureSample::from_raw(250, 100.0);
        assert!((t.celsius - 2.5).abs() < 1e-6);
        let t = TemperatureSample::from_raw(-100, 100.0);
        assert!((t.celsius + 1.0).abs() < 1e-6);
    }
}
