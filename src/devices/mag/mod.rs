//! Magnetometer Drivers
//!
//! This module contains magnetometer drivers implementing the `MagnetometerSensor` trait.
//!
//! ## Available Drivers
//!
//! - `qmc5883l`: QST QMC5883L 3-axis magnetometer

pub mod qmc5883l;

pub use qmc5883l::Qmc5883l;
