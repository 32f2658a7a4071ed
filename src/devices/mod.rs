//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! so they run unchanged on any bus/delay implementation.
//!
//! ## Modules
//!
//! - `mag`: Magnetometer drivers (QMC5883L)
//! - `traits`: Device trait definitions (MagnetometerSensor, sample types)

pub mod mag;
pub mod traits;
