//! QMC5883L Driver Implementation
//!
//! Core driver implementation: handle lifecycle, masked register access,
//! typed configuration and data acquisition.

use super::config::{AcquisitionConfig, FullScale, Mode, OutputRate, OverSample, Qmc5883lConfig};
use super::error::{Binding, BusOp, Qmc5883lError, Result};
use super::info::{ChipInfo, CHIP_INFO};
use super::registers::{self, Field, Status};
use crate::devices::traits::{MagSample, MagnetometerSensor, TemperatureSample};
use crate::platform::{I2cInterface, TimerInterface};

/// QMC5883L driver handle
///
/// Owns the bus and delay bindings and tracks whether the chip has been brought
/// up. Every configuration and acquisition call requires a prior successful
/// [`init`](Self::init) and fails with [`Qmc5883lError::NotInitialized`] otherwise.
///
/// The handle holds no lock; it is meant to be owned by a single context.
pub struct Qmc5883l<I, T> {
    /// Bus binding (open/close/register read/register write)
    interface: Option<I>,

    /// Delay binding
    timer: Option<T>,

    /// Data-ready polling policy
    acquisition: AcquisitionConfig,

    /// Set by `init`, cleared by `deinit`
    initialized: bool,
}

impl<I, T> Qmc5883l<I, T> {
    /// Create a handle with no bindings linked
    pub const fn new() -> Self {
        Self {
            interface: None,
            timer: None,
            acquisition: AcquisitionConfig {
                poll_limit: registers::DATA_READY_POLL_LIMIT,
                poll_interval_ms: registers::DATA_READY_POLL_INTERVAL_MS,
            },
            initialized: false,
        }
    }

    /// Create a handle with both bindings linked
    pub fn with_bindings(interface: I, timer: T) -> Self {
        let mut handle = Self::new();
        handle.link_interface(interface);
        handle.link_timer(timer);
        handle
    }

    /// Link the bus binding, returning the previous one
    ///
    /// Relinking while initialized leaves the new bus unopened; deinit first.
    pub fn link_interface(&mut self, interface: I) -> Option<I> {
        self.interface.replace(interface)
    }

    /// Link the delay binding, returning the previous one
    pub fn link_timer(&mut self, timer: T) -> Option<T> {
        self.timer.replace(timer)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn interface(&self) -> Option<&I> {
        self.interface.as_ref()
    }

    pub fn interface_mut(&mut self) -> Option<&mut I> {
        self.interface.as_mut()
    }

    pub fn timer(&self) -> Option<&T> {
        self.timer.as_ref()
    }

    pub fn acquisition_config(&self) -> AcquisitionConfig {
        self.acquisition
    }

    /// Change the data-ready poll limit and interval used by [`read`](Self::read)
    pub fn set_acquisition_config(&mut self, acquisition: AcquisitionConfig) {
        self.acquisition = acquisition;
    }

    /// Take the bindings back, dropping the handle
    pub fn release(self) -> (Option<I>, Option<T>) {
        (self.interface, self.timer)
    }

    /// Chip metadata
    pub const fn info() -> ChipInfo {
        CHIP_INFO
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Qmc5883lError::NotInitialized)
        }
    }
}

impl<I, T> Default for Qmc5883l<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: I2cInterface, T: TimerInterface> Qmc5883l<I, T> {
    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Bring the chip up
    ///
    /// Checks that both bindings are linked (without touching the bus if not),
    /// opens the bus, verifies the chip ID and issues a soft reset followed by a
    /// 100 ms settle delay. Any failure after the bus was opened closes it again.
    pub fn init(&mut self) -> Result<()> {
        if self.interface.is_none() {
            crate::log_error!("qmc5883l: iic interface is not linked");
            return Err(Qmc5883lError::MissingBinding(Binding::Interface));
        }
        if self.timer.is_none() {
            crate::log_error!("qmc5883l: delay is not linked");
            return Err(Qmc5883lError::MissingBinding(Binding::Timer));
        }

        self.bus()?.open().map_err(|e| {
            crate::log_error!("qmc5883l: iic init failed");
            Qmc5883lError::Interface(e)
        })?;

        if let Err(e) = self.probe_and_reset() {
            if self.bus()?.close().is_err() {
                crate::log_warn!("qmc5883l: iic deinit failed");
            }
            return Err(e);
        }

        self.initialized = true;
        crate::log_info!("qmc5883l: initialized");
        Ok(())
    }

    /// Init, then apply `config`
    ///
    /// If any configuration step fails the chip is deinitialized again and the
    /// configuration error is returned.
    pub fn init_with_config(&mut self, config: &Qmc5883lConfig) -> Result<()> {
        self.init()?;
        if let Err(e) = self.configure(config) {
            crate::log_error!("qmc5883l: configure failed");
            if self.deinit().is_err() {
                crate::log_warn!("qmc5883l: deinit after failed configure also failed");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Reset the chip and close the bus
    ///
    /// The bus is closed even when the reset write fails; that failure is still
    /// returned. The handle stays initialized only if closing the bus fails.
    pub fn deinit(&mut self) -> Result<()> {
        self.ensure_initialized()?;

        let reset = self.write_field(registers::SOFT_RESET, 1);
        if reset.is_ok() {
            self.delay_ms(registers::DEINIT_RESET_DELAY_MS)?;
        } else {
            crate::log_warn!("qmc5883l: reset before close failed, closing anyway");
        }

        self.bus()?.close().map_err(|e| {
            crate::log_error!("qmc5883l: iic deinit failed");
            Qmc5883lError::Interface(e)
        })?;
        self.initialized = false;
        reset
    }

    /// Apply a full bring-up configuration
    ///
    /// Fields are written period first and mode last, so the chip only starts
    /// measuring once everything else is in place.
    pub fn configure(&mut self, config: &Qmc5883lConfig) -> Result<()> {
        self.set_period(config.period)?;
        self.set_pointer_roll_over(config.pointer_roll_over)?;
        self.set_interrupt(config.interrupt)?;
        self.set_over_sample(config.over_sample)?;
        self.set_full_scale(config.full_scale)?;
        self.set_output_rate(config.output_rate)?;
        self.set_mode(config.mode)?;
        crate::log_debug!(
            "qmc5883l: configured {} Hz, +-{} gauss, osr {}",
            config.output_rate.hz(),
            config.full_scale.gauss(),
            config.over_sample.samples()
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Acquisition
    // ------------------------------------------------------------------------

    /// Wait for data-ready and read the field vector
    ///
    /// The resolution is taken from the full scale field as it is on the chip
    /// when the read starts. Data-ready is polled up to `poll_limit` times with
    /// `poll_interval_ms` between polls; if it never sets the read fails with
    /// [`Qmc5883lError::Timeout`] and no data transfer is made.
    pub fn read(&mut self) -> Result<MagSample> {
        self.ensure_initialized()?;

        let control1 = self.read_byte(registers::CONTROL1)?;
        let code = registers::FULL_SCALE.extract(control1);
        let resolution = FullScale::resolution_for_code(code);
        if FullScale::from_register(code).is_none() {
            crate::log_warn!("qmc5883l: full scale code {} is reserved, output is zero", code);
        }

        self.wait_data_ready()?;

        let mut buf = [0u8; 6];
        self.read_regs(registers::X_LSB, &mut buf)?;
        let raw = [
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ];

        Ok(MagSample::from_raw(raw, resolution))
    }

    /// Read the die temperature
    ///
    /// No data-ready polling; the value has an uncompensated offset.
    pub fn read_temperature(&mut self) -> Result<TemperatureSample> {
        self.ensure_initialized()?;

        let mut buf = [0u8; 2];
        self.read_regs(registers::TEMP_LSB, &mut buf)?;
        Ok(TemperatureSample::from_raw(
            i16::from_le_bytes(buf),
            registers::TEMP_SENSITIVITY,
        ))
    }

    /// Read the status flags
    pub fn get_status(&mut self) -> Result<Status> {
        self.ensure_initialized()?;
        self.read_status()
    }

    fn read_status(&mut self) -> Result<Status> {
        Ok(Status::from_bits_truncate(self.read_byte(registers::STATUS)?))
    }

    fn wait_data_ready(&mut self) -> Result<()> {
        let AcquisitionConfig {
            poll_limit,
            poll_interval_ms,
        } = self.acquisition;

        for _ in 0..poll_limit {
            if self.read_status()?.contains(Status::DRDY) {
                return Ok(());
            }
            self.delay_ms(poll_interval_ms)?;
        }

        crate::log_error!("qmc5883l: ready bit not set after {} polls", poll_limit);
        Err(Qmc5883lError::Timeout)
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.set_field(registers::MODE, mode.register_value())
    }

    pub fn get_mode(&mut self) -> Result<Mode> {
        let value = self.get_field(registers::MODE)?;
        Mode::from_register(value).ok_or(Qmc5883lError::InvalidFieldValue {
            field: registers::MODE.name,
            value,
        })
    }

    pub fn set_output_rate(&mut self, rate: OutputRate) -> Result<()> {
        self.set_field(registers::OUTPUT_RATE, rate.register_value())
    }

    pub fn get_output_rate(&mut self) -> Result<OutputRate> {
        Ok(OutputRate::from_register(self.get_field(registers::OUTPUT_RATE)?))
    }

    pub fn set_full_scale(&mut self, scale: FullScale) -> Result<()> {
        self.set_field(registers::FULL_SCALE, scale.register_value())
    }

    pub fn get_full_scale(&mut self) -> Result<FullScale> {
        let value = self.get_field(registers::FULL_SCALE)?;
        FullScale::from_register(value).ok_or(Qmc5883lError::InvalidFieldValue {
            field: registers::FULL_SCALE.name,
            value,
        })
    }

    pub fn set_over_sample(&mut self, sample: OverSample) -> Result<()> {
        self.set_field(registers::OVER_SAMPLE, sample.register_value())
    }

    pub fn get_over_sample(&mut self) -> Result<OverSample> {
        Ok(OverSample::from_register(self.get_field(registers::OVER_SAMPLE)?))
    }

    /// Enable or disable the DRDY interrupt pin
    ///
    /// The chip bit is an interrupt *disable*, so `true` clears it.
    pub fn set_interrupt(&mut self, enable: bool) -> Result<()> {
        self.set_field(registers::INT_DISABLE, u8::from(!enable))
    }

    pub fn get_interrupt(&mut self) -> Result<bool> {
        Ok(self.get_field(registers::INT_DISABLE)? == 0)
    }

    pub fn set_pointer_roll_over(&mut self, enable: bool) -> Result<()> {
        self.set_field(registers::POINTER_ROLL_OVER, u8::from(enable))
    }

    pub fn get_pointer_roll_over(&mut self) -> Result<bool> {
        Ok(self.get_field(registers::POINTER_ROLL_OVER)? == 1)
    }

    /// Trigger a soft reset and wait 100 ms for the chip to settle
    pub fn soft_reset(&mut self) -> Result<()> {
        self.set_field(registers::SOFT_RESET, 1)?;
        self.delay_ms(registers::RESET_DELAY_MS)
    }

    pub fn set_period(&mut self, fbr: u8) -> Result<()> {
        self.set_field(registers::PERIOD_FBR, fbr)
    }

    pub fn get_period(&mut self) -> Result<u8> {
        self.get_field(registers::PERIOD_FBR)
    }

    // ------------------------------------------------------------------------
    // Register access
    // ------------------------------------------------------------------------

    /// Write `value` into `field`, preserving every other bit of its register
    pub fn set_field(&mut self, field: Field, value: u8) -> Result<()> {
        self.ensure_initialized()?;
        check_span(field)?;
        if value > field.max() {
            crate::log_error!("qmc5883l: {} value {} is out of range", field.name, value);
            return Err(Qmc5883lError::InvalidFieldValue {
                field: field.name,
                value,
            });
        }
        self.write_field(field, value)
    }

    /// Read the current value of `field`
    pub fn get_field(&mut self, field: Field) -> Result<u8> {
        self.ensure_initialized()?;
        check_span(field)?;
        Ok(field.extract(self.read_byte(field.reg)?))
    }

    /// Write raw bytes starting at `reg`, bypassing field handling
    pub fn set_reg(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        self.ensure_initialized()?;
        self.write_regs(reg, data)
    }

    /// Read raw bytes starting at `reg`, bypassing field handling
    pub fn get_reg(&mut self, reg: u8, buf: &mut [u8]) -> Result<()> {
        self.ensure_initialized()?;
        self.read_regs(reg, buf)
    }

    fn probe_and_reset(&mut self) -> Result<()> {
        let id = self.read_byte(registers::CHIP_ID)?;
        if id != registers::CHIP_ID_VALUE {
            crate::log_error!("qmc5883l: id is invalid: {:#x}", id);
            return Err(Qmc5883lError::IdentityMismatch { found: id });
        }

        self.write_field(registers::SOFT_RESET, 1)?;
        self.delay_ms(registers::RESET_DELAY_MS)
    }

    /// Read-modify-write without the initialized check (used by init/deinit)
    fn write_field(&mut self, field: Field, value: u8) -> Result<()> {
        let current = if field.is_full_width() {
            0
        } else {
            self.read_byte(field.reg)?
        };
        self.write_regs(field.reg, &[field.insert(current, value)])
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_regs(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<()> {
        self.bus()?
            .read_register(registers::QMC5883L_ADDR, reg, buf)
            .map_err(|cause| {
                crate::log_error!("qmc5883l: read {} failed", registers::name(reg));
                Qmc5883lError::Bus {
                    op: BusOp::Read(reg),
                    cause,
                }
            })
    }

    fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        self.bus()?
            .write_register(registers::QMC5883L_ADDR, reg, data)
            .map_err(|cause| {
                crate::log_error!("qmc5883l: write {} failed", registers::name(reg));
                Qmc5883lError::Bus {
                    op: BusOp::Write(reg),
                    cause,
                }
            })
    }

    fn bus(&mut self) -> Result<&mut I> {
        self.interface
            .as_mut()
            .ok_or(Qmc5883lError::MissingBinding(Binding::Interface))
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.timer
            .as_mut()
            .ok_or(Qmc5883lError::MissingBinding(Binding::Timer))?
            .delay_ms(ms);
        Ok(())
    }
}

fn check_span(field: Field) -> Result<()> {
    if field.is_valid() {
        Ok(())
    } else {
        crate::log_error!(
            "qmc5883l: {} span offset {} width {} does not fit a register",
            field.name,
            field.offset,
            field.width
        );
        Err(Qmc5883lError::InvalidField {
            field: field.name,
            offset: field.offset,
            width: field.width,
        })
    }
}

impl<I: I2cInterface, T: TimerInterface> MagnetometerSensor for Qmc5883l<I, T> {
    type Error = Qmc5883lError;

    fn read_mag(&mut self) -> Result<MagSample> {
        self.read()
    }

    fn read_temperature(&mut self) -> Result<TemperatureSample> {
        Qmc5883l::read_temperature(self)
    }
}
