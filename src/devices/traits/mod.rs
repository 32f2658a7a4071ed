//! Device trait definitions

pub mod mag;

pub use mag::{MagSample, MagnetometerSensor, TemperatureSample};
