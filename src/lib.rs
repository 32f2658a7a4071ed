#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! qmc5883l - Driver for the QST QMC5883L 3-axis magnetometer
//!
//! This library provides a platform abstraction for the two-wire bus and delay
//! primitives, plus a register-level driver that configures the chip and converts
//! its raw output into milligauss and degrees Celsius.
//!
//! ## Layout
//!
//! - [`platform`]: bus/delay traits the driver is generic over, embedded-hal
//!   adapters, and mocks for host tests
//! - [`devices`]: the QMC5883L driver and the magnetometer reading types
//! - [`core`]: logging macros shared by every layer
//!
//! ## Usage
//!
//! ```ignore
//! use qmc5883l::devices::mag::qmc5883l::{Qmc5883l, Qmc5883lConfig};
//! use qmc5883l::platform::hal::{HalDelay, HalI2c};
//!
//! let mut mag = Qmc5883l::with_bindings(HalI2c::new(i2c), HalDelay::new(delay));
//! mag.init_with_config(&Qmc5883lConfig::default())?;
//! let sample = mag.read()?;
//! ```

// Logging macros (log_info!, log_error!, ...)
pub mod core;

// Platform abstraction layer (bus + delay bindings)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

pub use devices::mag::qmc5883l::{info, Qmc5883l, Qmc5883lError};
