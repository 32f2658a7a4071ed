//! Platform abstraction layer
//!
//! This module provides the bus and delay abstractions the device drivers are
//! written against. All platform-specific code must be isolated to this module.

pub mod error;
pub mod hal;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{I2cError, PlatformError, Result};
pub use traits::{I2cInterface, TimerInterface};
