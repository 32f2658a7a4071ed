//! embedded-hal platform implementation
//!
//! This module adapts any blocking `embedded-hal` 1.0 I2C bus and delay provider
//! to the platform traits, so the drivers run on every HAL that implements
//! `embedded_hal::i2c::I2c` and `embedded_hal::delay::DelayNs`.
//!
//! # Example
//!
//! ```ignore
//! use qmc5883l::platform::hal::{HalDelay, HalI2c};
//! use qmc5883l::Qmc5883l;
//!
//! // `i2c` and `delay` come from the board HAL (rp235x-hal, stm32f3xx-hal, ...)
//! let mut mag = Qmc5883l::with_bindings(HalI2c::new(i2c), HalDelay::new(delay));
//! mag.init()?;
//! ```

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cInterface, TimerInterface},
    Result,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c, Operation};

/// I2C implementation on top of an `embedded-hal` blocking bus
///
/// `open`/`close` only gate access; the underlying peripheral is expected to be
/// configured by the HAL before it is handed over.
///
/// # Type Parameters
///
/// * `I` - Any `embedded_hal::i2c::I2c` implementation (7-bit addressing)
pub struct HalI2c<I> {
    i2c: I,
    open: bool,
}

impl<I: I2c> HalI2c<I> {
    /// Wrap a HAL I2C bus
    pub fn new(i2c: I) -> Self {
        Self { i2c, open: false }
    }

    /// Whether `open` has been called without a matching `close`
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Give the HAL bus back
    pub fn release(self) -> I {
        self.i2c
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(PlatformError::I2c(I2cError::NotOpen))
        }
    }
}

impl<I: I2c> I2cInterface for HalI2c<I> {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn read_register(&mut self, addr: u8, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.ensure_open()?;
        self.i2c
            .write_read(addr >> 1, &[reg], buffer)
            .map_err(|e| map_hal_error(e.kind()))
    }

    fn write_register(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<()> {
        self.ensure_open()?;
        // Adjacent writes in one transaction go out back to back, without a
        // repeated START, so the register address and payload share a frame.
        self.i2c
            .transaction(addr >> 1, &mut [Operation::Write(&[reg]), Operation::Write(data)])
            .map_err(|e| map_hal_error(e.kind()))
    }
}

/// Map embedded-hal I2C error kinds to platform I2C errors
fn map_hal_error(kind: ErrorKind) -> PlatformError {
    match kind {
        ErrorKind::NoAcknowledge(_) => PlatformError::I2c(I2cError::Nack),
        ErrorKind::ArbitrationLoss => PlatformError::I2c(I2cError::ArbitrationLost),
        ErrorKind::Overrun => PlatformError::I2c(I2cError::Overrun),
        _ => PlatformError::I2c(I2cError::BusError),
    }
}

/// Delay implementation on top of an `embedded-hal` delay provider
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    /// Wrap a HAL delay provider
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    /// Give the HAL delay provider back
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> TimerInterface for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource};
    use std::vec::Vec;

    /// Register-file bus speaking raw embedded-hal transactions
    struct FakeBus {
        registers: [u8; 16],
        addresses: Vec<u8>,
        nack: bool,
    }

    impl FakeBus {
        fn new() -> Self {
            Self {
                registers: [0; 16],
                addresses: Vec::new(),
                nack: false,
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> core::result::Result<(), Self::Error> {
            self.addresses.push(address);
            if self.nack {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            let mut pointer: Option<usize> = None;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        for &b in bytes.iter() {
                            match pointer {
                                None => pointer = Some(b as usize),
                                Some(p) => {
                                    self.registers[p % 16] = b;
                                    pointer = Some(p + 1);
                                }
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        let start = pointer.unwrap_or(0);
                        for (i, slot) in buf.iter_mut().enumerate() {
                            *slot = self.registers[(start + i) % 16];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_transfer_before_open_fails() {
        let mut i2c = HalI2c::new(FakeBus::new());
        let mut buf = [0u8; 1];
        assert_eq!(
            i2c.read_register(0x1A, 0x0D, &mut buf),
            Err(PlatformError::I2c(I2cError::NotOpen))
        );
        assert_eq!(
            i2c.write_register(0x1A, 0x09, &[0x01]),
            Err(PlatformError::I2c(I2cError::NotOpen))
        );
        assert!(i2c.release().addresses.is_empty());
    }

    #[test]
    fn test_write_then_read_register_uses_7bit_address() {
        let mut i2c = HalI2c::new(FakeBus::new());
        i2c.open().unwrap();

        i2c.write_register(0x1A, 0x09, &[0x1D, 0x40]).unwrap();
        let mut buf = [0u8; 2];
        i2c.read_register(0x1A, 0x09, &mut buf).unwrap();
        assert_eq!(buf, [0x1D, 0x40]);

        let bus = i2c.release();
        assert_eq!(bus.addresses, vec![0x0D, 0x0D]);
        assert_eq!(bus.registers[0x09], 0x1D);
        assert_eq!(bus.registers[0x0A], 0x40);
    }

    #[test]
    fn test_close_blocks_further_transfers() {
        let mut i2c = HalI2c::new(FakeBus::new());
        i2c.open().unwrap();
        assert!(i2c.is_open());
        i2c.close().unwrap();
        assert!(!i2c.is_open());

        let mut buf = [0u8; 1];
        assert!(i2c.read_register(0x1A, 0x06, &mut buf).is_err());
    }

    #[test]
    fn test_nack_maps_to_platform_error() {
        let mut bus = FakeBus::new();
        bus.nack = true;
        let mut i2c = HalI2c::new(bus);
        i2c.open().unwrap();

        let mut buf = [0u8; 1];
        assert_eq!(
            i2c.read_register(0x1A, 0x0D, &mut buf),
            Err(PlatformError::I2c(I2cError::Nack))
        );
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            map_hal_error(ErrorKind::ArbitrationLoss),
            PlatformError::I2c(I2cError::ArbitrationLost)
        );
        assert_eq!(
            map_hal_error(ErrorKind::Overrun),
            PlatformError::I2c(I2cError::Overrun)
        );
        assert_eq!(
            map_hal_error(ErrorKind::Bus),
            PlatformError::I2c(I2cError::BusError)
        );
        assert_eq!(
            map_hal_error(ErrorKind::Other),
            PlatformError::I2c(I2cError::BusError)
        );
    }

    #[test]
    fn test_hal_delay_forwards_milliseconds() {
        let mut delay = HalDelay::new(CountingDelay::default());
        delay.delay_ms(10);
        delay.delay_us(5);
        assert_eq!(delay.release().total_ns, 10_000_000 + 5_000);
    }
}
