//! QMC5883L 3-axis magnetometer driver
//!
//! Register-level driver for the QST QMC5883L, generic over the platform
//! [`I2cInterface`](crate::platform::I2cInterface) and
//! [`TimerInterface`](crate::platform::TimerInterface).
//!
//! ## Lifecycle
//!
//! 1. Create an empty handle with [`Qmc5883l::new`] and link the bindings, or use
//!    [`Qmc5883l::with_bindings`]
//! 2. [`Qmc5883l::init`] opens the bus, checks the chip ID and soft-resets the chip
//! 3. Configure fields individually or with [`Qmc5883l::configure`]
//! 4. Acquire with [`Qmc5883l::read`] / [`Qmc5883l::read_temperature`]
//! 5. [`Qmc5883l::deinit`] resets the chip and closes the bus

mod config;
mod driver;
mod error;
mod info;
pub mod registers;

pub use config::{AcquisitionConfig, FullScale, Mode, OutputRate, OverSample, Qmc5883lConfig};
pub use driver::Qmc5883l;
pub use error::{Binding, BusOp, Qmc5883lError, Result};
pub use info::{info, ChipInfo, CHIP_INFO, DRIVER_VERSION};
pub use registers::{Field, Status};
