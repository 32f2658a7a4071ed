//! QMC5883L error types

use crate::platform::PlatformError;
use core::fmt;

/// Result type for QMC5883L operations
pub type Result<T> = core::result::Result<T, Qmc5883lError>;

/// Binding a handle needs before `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Binding {
    /// Bus interface (open/close/read/write)
    Interface,
    /// Delay provider
    Timer,
}

/// Bus transfer that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusOp {
    /// Read starting at register
    Read(u8),
    /// Write starting at register
    Write(u8),
}

/// QMC5883L driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Qmc5883lError {
    /// Operation requires a successful `init`
    NotInitialized,
    /// A required binding was not linked before `init`
    MissingBinding(Binding),
    /// Bus could not be opened or closed
    Interface(PlatformError),
    /// Register transfer failed
    Bus { op: BusOp, cause: PlatformError },
    /// Chip ID register did not read 0xFF
    IdentityMismatch { found: u8 },
    /// Data-ready bit never set within the poll limit
    Timeout,
    /// Field value outside what the field or its typed decoding allows
    InvalidFieldValue { field: &'static str, value: u8 },
    /// Field bit span does not fit inside one 8-bit register
    InvalidField {
        field: &'static str,
        offset: u8,
        width: u8,
    },
}

impl fmt::Display for Qmc5883lError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qmc5883lError::NotInitialized => write!(f, "qmc5883l is not initialized"),
            Qmc5883lError::MissingBinding(Binding::Interface) => {
                write!(f, "bus interface is not linked")
            }
            Qmc5883lError::MissingBinding(Binding::Timer) => write!(f, "delay is not linked"),
            Qmc5883lError::Interface(e) => write!(f, "bus open/close failed: {}", e),
            Qmc5883lError::Bus { op: BusOp::Read(reg), cause } => {
                write!(f, "read register {:#04x} failed: {}", reg, cause)
            }
            Qmc5883lError::Bus { op: BusOp::Write(reg), cause } => {
                write!(f, "write register {:#04x} failed: {}", reg, cause)
            }
            Qmc5883lError::IdentityMismatch { found } => {
                write!(f, "chip id is invalid: {:#04x}", found)
            }
            Qmc5883lError::Timeout => write!(f, "data ready bit was never set"),
            Qmc5883lError::InvalidFieldValue { field, value } => {
                write!(f, "invalid {} value: {}", field, value)
            }
            Qmc5883lError::InvalidField {
                field,
                offset,
                width,
            } => write!(f, "invalid {} span: offset {} width {}", field, offset, width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::I2cError;

    #[test]
    fn test_display() {
        let err = Qmc5883lError::Bus {
            op: BusOp::Read(0x09),
            cause: PlatformError::I2c(I2cError::Nack),
        };
        assert_eq!(format!("{}", err), "read register 0x09 failed: I2C error: Nack");

        let err = Qmc5883lError::IdentityMismatch { found: 0x3C };
        assert_eq!(format!("{}", err), "chip id is invalid: 0x3c");

        let err = Qmc5883lError::MissingBinding(Binding::Timer);
        assert_eq!(format!("{}", err), "delay is not linked");

        let err = Qmc5883lError::InvalidField {
            field: "mode",
            offset: 7,
            width: 2,
        };
        assert_eq!(format!("{}", err), "invalid mode span: offset 7 width 2");
    }
}
