//! QMC5883L chip metadata

/// Driver version, encoded as `major * 1000 + minor * 100`
pub const DRIVER_VERSION: u32 = 1000;

/// Static chip identity and operating limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    pub chip_name: &'static str,
    pub manufacturer_name: &'static str,
    pub interface: &'static str,
    pub supply_voltage_min_v: f32,
    pub supply_voltage_max_v: f32,
    pub max_current_ma: f32,
    pub temperature_min: f32,
    pub temperature_max: f32,
    pub driver_version: u32,
}

impl ChipInfo {
    pub fn version_major(&self) -> u32 {
        self.driver_version / 1000
    }

    pub fn version_minor(&self) -> u32 {
        (self.driver_version % 1000) / 100
    }
}

/// QMC5883L metadata
pub const CHIP_INFO: ChipInfo = ChipInfo {
    chip_name: "QST QMC5883L",
    manufacturer_name: "QST",
    interface: "IIC",
    supply_voltage_min_v: 2.16,
    supply_voltage_max_v: 3.6,
    max_current_ma: 2.6,
    temperature_min: -40.0,
    temperature_max: 85.0,
    driver_version: DRIVER_VERSION,
};

/// Chip metadata; needs no handle and touches no hardware
pub const fn info() -> ChipInfo {
    CHIP_INFO
}
