//! Host-side session tests against the public API
//!
//! Run with `cargo test --features mock`.

#![cfg(feature = "mock")]

use qmc5883l::devices::mag::qmc5883l::{
    registers, FullScale, Mode, OutputRate, OverSample, Qmc5883l, Qmc5883lConfig, Qmc5883lError,
    Status,
};
use qmc5883l::devices::traits::MagnetometerSensor;
use qmc5883l::platform::mock::{MockI2c, MockTimer};

fn chip() -> MockI2c {
    MockI2c::new().with_register(registers::CHIP_ID, registers::CHIP_ID_VALUE)
}

#[test]
fn test_full_session() {
    let mut mag = Qmc5883l::with_bindings(chip(), MockTimer::new());
    mag.init_with_config(&Qmc5883lConfig::default()).unwrap();

    assert_eq!(mag.get_mode().unwrap(), Mode::Continuous);
    assert_eq!(mag.get_output_rate().unwrap(), OutputRate::Hz10);
    assert_eq!(mag.get_full_scale().unwrap(), FullScale::Gauss2);
    assert_eq!(mag.get_over_sample().unwrap(), OverSample::Osr512);
    assert!(!mag.get_interrupt().unwrap());
    assert!(mag.get_pointer_roll_over().unwrap());
    assert_eq!(mag.get_period().unwrap(), 0x01);

    // 12000 counts is one gauss at the 2 gauss range
    let i2c = mag.interface_mut().unwrap();
    i2c.set_register(registers::X_LSB, 0xE0);
    i2c.set_register(registers::X_MSB, 0x2E);
    i2c.set_register(registers::TEMP_LSB, 0xC4);
    i2c.set_register(registers::TEMP_MSB, 0x09);
    i2c.set_register(registers::STATUS, Status::DRDY.bits());

    let sample = mag.read_mag().unwrap();
    assert_eq!(sample.raw, [12000, 0, 0]);
    assert!((sample.m_gauss[0] - 1000.0).abs() < 1e-2);

    let temp = mag.read_temperature().unwrap();
    assert_eq!(temp.raw, 2500);
    assert!((temp.celsius - 25.0).abs() < 1e-6);

    mag.deinit().unwrap();
    assert_eq!(mag.read(), Err(Qmc5883lError::NotInitialized));

    let (i2c, timer) = mag.release();
    assert!(!i2c.unwrap().is_open());
    // init reset settle, deinit reset settle
    assert_eq!(timer.unwrap().elapsed_ms(), 110);
}

#[test]
fn test_wrong_chip_is_rejected() {
    let i2c = MockI2c::new().with_register(registers::CHIP_ID, 0x00);
    let mut mag = Qmc5883l::with_bindings(i2c, MockTimer::new());

    assert_eq!(
        mag.init_with_config(&Qmc5883lConfig::default()),
        Err(Qmc5883lError::IdentityMismatch { found: 0x00 })
    );
    assert!(!mag.is_initialized());
    assert!(!mag.interface().unwrap().is_open());
}

#[test]
fn test_metadata() {
    let info = qmc5883l::info();
    assert_eq!(info.interface, "IIC");
    assert_eq!(info.version_major(), 1);
    assert_eq!(info.version_minor(), 0);
    assert_eq!(Qmc5883l::<MockI2c, MockTimer>::info(), info);
}
