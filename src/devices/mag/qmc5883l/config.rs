//! QMC5883L Configuration
//!
//! Typed values for every CONTROL1 field, the bring-up configuration applied by
//! [`Qmc5883l::configure`](super::Qmc5883l::configure), and the data-ready polling policy.

use super::registers;

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// No measurements, lowest power (power-on state)
    #[default]
    Standby,
    /// Measure continuously at the configured output rate
    Continuous,
}

impl Mode {
    /// Get the field value for this mode
    pub fn register_value(self) -> u8 {
        match self {
            Mode::Standby => 0b00,
            Mode::Continuous => 0b01,
        }
    }

    /// Decode a field value; codes 2 and 3 are reserved
    pub fn from_register(value: u8) -> Option<Self> {
        match value {
            0b00 => Some(Mode::Standby),
            0b01 => Some(Mode::Continuous),
            _ => None,
        }
    }
}

/// Output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputRate {
    /// 10 Hz (default)
    #[default]
    Hz10,
    /// 50 Hz
    Hz50,
    /// 100 Hz
    Hz100,
    /// 200 Hz
    Hz200,
}

impl OutputRate {
    /// Get the field value for this rate
    pub fn register_value(self) -> u8 {
        match self {
            OutputRate::Hz10 => 0b00,
            OutputRate::Hz50 => 0b01,
            OutputRate::Hz100 => 0b10,
            OutputRate::Hz200 => 0b11,
        }
    }

    /// Decode a field value (only the low two bits are used)
    pub fn from_register(value: u8) -> Self {
        match value & 0b11 {
            0b00 => OutputRate::Hz10,
            0b01 => OutputRate::Hz50,
            0b10 => OutputRate::Hz100,
            _ => OutputRate::Hz200,
        }
    }

    /// Rate in Hz
    pub fn hz(self) -> u16 {
        match self {
            OutputRate::Hz10 => 10,
            OutputRate::Hz50 => 50,
            OutputRate::Hz100 => 100,
            OutputRate::Hz200 => 200,
        }
    }
}

/// Full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    /// ±2 gauss, 12000 LSB/G (default)
    #[default]
    Gauss2,
    /// ±8 gauss, 3000 LSB/G
    Gauss8,
}

impl FullScale {
    /// Get the field value for this range
    pub fn register_value(self) -> u8 {
        match self {
            FullScale::Gauss2 => 0b00,
            FullScale::Gauss8 => 0b01,
        }
    }

    /// Decode a field value; codes 2 and 3 are reserved
    pub fn from_register(value: u8) -> Option<Self> {
        match value {
            0b00 => Some(FullScale::Gauss2),
            0b01 => Some(FullScale::Gauss8),
            _ => None,
        }
    }

    /// Range limit in gauss
    pub fn gauss(self) -> u8 {
        match self {
            FullScale::Gauss2 => 2,
            FullScale::Gauss8 => 8,
        }
    }

    /// Conversion factor from raw counts to milligauss
    pub fn resolution_mg_per_lsb(self) -> f32 {
        match self {
            FullScale::Gauss2 => registers::RESOLUTION_2G,
            FullScale::Gauss8 => registers::RESOLUTION_8G,
        }
    }

    /// Conversion factor for a raw full scale field value
    ///
    /// Reserved codes convert to 0.0 rather than guessing a resolution.
    pub fn resolution_for_code(code: u8) -> f32 {
        Self::from_register(code).map_or(0.0, Self::resolution_mg_per_lsb)
    }
}

/// Over sample ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverSample {
    /// 512 samples (default, lowest noise)
    #[default]
    Osr512,
    /// 256 samples
    Osr256,
    /// 128 samples
    Osr128,
    /// 64 samples (lowest power)
    Osr64,
}

impl OverSample {
    /// Get the field value for this ratio
    pub fn register_value(self) -> u8 {
        match self {
            OverSample::Osr512 => 0b00,
            OverSample::Osr256 => 0b01,
            OverSample::Osr128 => 0b10,
            OverSample::Osr64 => 0b11,
        }
    }

    /// Decode a field value (only the low two bits are used)
    pub fn from_register(value: u8) -> Self {
        match value & 0b11 {
            0b00 => OverSample::Osr512,
            0b01 => OverSample::Osr256,
            0b10 => OverSample::Osr128,
            _ => OverSample::Osr64,
        }
    }

    /// Number of internal samples per output sample
    pub fn samples(self) -> u16 {
        match self {
            OverSample::Osr512 => 512,
            OverSample::Osr256 => 256,
            OverSample::Osr128 => 128,
            OverSample::Osr64 => 64,
        }
    }
}

/// Data-ready polling policy for vector reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcquisitionConfig {
    /// Status polls before giving up with `Timeout`
    pub poll_limit: u16,
    /// Delay between polls in milliseconds
    pub poll_interval_ms: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            poll_limit: registers::DATA_READY_POLL_LIMIT,
            poll_interval_ms: registers::DATA_READY_POLL_INTERVAL_MS,
        }
    }
}

impl AcquisitionConfig {
    /// Worst-case wait for data-ready in milliseconds
    pub fn max_wait_ms(&self) -> u32 {
        (self.poll_limit as u32).saturating_mul(self.poll_interval_ms)
    }
}

/// Bring-up configuration
///
/// The defaults put the chip into continuous 10 Hz measurement at ±2 gauss with
/// maximum oversampling, interrupt pin off and pointer roll-over on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Qmc5883lConfig {
    /// SET/RESET period register value (datasheet recommends 0x01)
    pub period: u8,
    /// Auto-wrap the register pointer on burst reads
    pub pointer_roll_over: bool,
    /// Drive the DRDY interrupt pin
    pub interrupt: bool,
    /// Over sample ratio
    pub over_sample: OverSample,
    /// Full scale range
    pub full_scale: FullScale,
    /// Output data rate
    pub output_rate: OutputRate,
    /// Operating mode, applied last
    pub mode: Mode,
}

impl Default for Qmc5883lConfig {
    fn default() -> Self {
        Self {
            period: 0x01,
            pointer_roll_over: true,
            interrupt: false,
            over_sample: OverSample::Osr512,
            full_scale: FullScale::Gauss2,
            output_rate: OutputRate::Hz10,
            mode: Mode::Continuous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_rate_codes() {
        for rate in [
            OutputRate::Hz10,
            OutputRate::Hz50,
            OutputRate::Hz100,
            OutputRate::Hz200,
        ] {
            assert_eq!(OutputRate::from_register(rate.register_value()), rate);
        }
        assert_eq!(OutputRate::Hz200.hz(), 200);
    }

    #[test]
    fn test_over_sample_codes() {
        assert_eq!(OverSample::from_register(0b10), OverSample::Osr128);
        assert_eq!(OverSample::Osr64.register_value(), 0b11);
        assert_eq!(OverSample::Osr256.samples(), 256);
    }

    #[test]
    fn test_reserved_codes_decode_to_none() {
        assert_eq!(Mode::from_register(0b10), None);
        assert_eq!(Mode::from_register(0b11), None);
        assert_eq!(FullScale::from_register(0b10), None);
        assert_eq!(FullScale::from_register(0b11), None);
    }

    #[test]
    fn test_resolution_for_code() {
        assert!((FullScale::resolution_for_code(0) - 1000.0 / 12000.0).abs() < 1e-9);
        assert!((FullScale::resolution_for_code(1) - 1000.0 / 3000.0).abs() < 1e-9);
        assert_eq!(FullScale::resolution_for_code(2), 0.0);
        assert_eq!(FullScale::resolution_for_code(3), 0.0);
    }

    #[test]
    fn test_acquisition_defaults() {
        let acq = AcquisitionConfig::default();
        assert_eq!(acq.poll_limit, 5000);
        assert_eq!(acq.poll_interval_ms, 10);
        assert_eq!(acq.max_wait_ms(), 50_000);
    }

    #[test]
    fn test_default_config() {
        let config = Qmc5883lConfig::default();
        assert_eq!(config.period, 0x01);
        assert!(config.pointer_roll_over);
        assert!(!config.interrupt);
        assert_eq!(config.over_sample, OverSample::Osr512);
        assert_eq!(config.full_scale, FullScale::Gauss2);
        assert_eq!(config.output_rate, OutputRate::Hz10);
        assert_eq!(config.mode, Mode::Continuous);
    }
}
