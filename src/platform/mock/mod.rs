//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use qmc5883l::platform::mock::{MockI2c, MockTimer};
//! use qmc5883l::Qmc5883l;
//!
//! let i2c = MockI2c::new().with_register(0x0D, 0xFF);
//! let mut mag = Qmc5883l::with_bindings(i2c, MockTimer::new());
//! mag.init().unwrap();
//! assert!(mag.is_initialized());
//! ```

#![cfg(any(test, feature = "mock"))]

mod i2c;
mod timer;

pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
