//! I2C interface trait
//!
//! This module defines the register-oriented bus interface that platform
//! implementations must provide to the device drivers.

use crate::platform::Result;

/// I2C interface trait
///
/// Platform implementations must provide this interface for register-mapped
/// devices on a two-wire bus.
///
/// # Addressing
///
/// `addr` is the 8-bit write-address form of the device (7-bit address shifted
/// left by one), which is how register-mapped chips are usually documented.
/// Implementations on top of 7-bit HALs shift it back (see
/// [`HalI2c`](crate::platform::hal::HalI2c)).
///
/// # Safety Invariants
///
/// - `open` must succeed before any register transfer
/// - Only one owner per I2C bus instance
/// - No concurrent access to the same I2C bus from multiple contexts
pub trait I2cInterface {
    /// Bring up the bus
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if the peripheral cannot be
    /// claimed or configured.
    fn open(&mut self) -> Result<()>;

    /// Release the bus
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if the peripheral cannot be
    /// released cleanly.
    fn close(&mut self) -> Result<()>;

    /// Read `buffer.len()` bytes starting at register `reg`
    ///
    /// Performs a combined write-read transaction with a repeated START:
    /// START - ADDR(W) - REG - REPEATED_START - ADDR(R) - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if:
    /// - Device does not acknowledge (NACK)
    /// - Bus error occurs
    /// - The bus is not open
    fn read_register(&mut self, addr: u8, reg: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write `data` starting at register `reg`
    ///
    /// Performs a single write transaction:
    /// START - ADDR(W) - REG - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if:
    /// - Device does not acknowledge (NACK)
    /// - Bus error occurs
    /// - The bus is not open
    fn write_register(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<()>;
}
