//! QMC5883L Register Definitions
//!
//! Based on the QST QMC5883L datasheet register map. Bit fields inside the
//! control registers are described by [`Field`] descriptors so every access goes
//! through the same masked read-modify-write path.

use bitflags::bitflags;

// ============================================================================
// Bus address and identity
// ============================================================================

/// Device address in 8-bit write form (7-bit address 0x0D)
pub const QMC5883L_ADDR: u8 = 0x1A;

/// Chip ID register
pub const CHIP_ID: u8 = 0x0D;

/// Expected chip ID value
pub const CHIP_ID_VALUE: u8 = 0xFF;

// ============================================================================
// Registers
// ============================================================================

/// Magnetic field output (little-endian, X/Y/Z in register order)
pub const X_LSB: u8 = 0x00;
pub const X_MSB: u8 = 0x01;
pub const Y_LSB: u8 = 0x02;
pub const Y_MSB: u8 = 0x03;
pub const Z_LSB: u8 = 0x04;
pub const Z_MSB: u8 = 0x05;

/// Status register (DRDY, OVL, DOR)
pub const STATUS: u8 = 0x06;

/// Temperature output (little-endian)
pub const TEMP_LSB: u8 = 0x07;
pub const TEMP_MSB: u8 = 0x08;

/// Control register 1 (mode, ODR, range, OSR)
pub const CONTROL1: u8 = 0x09;

/// Control register 2 (interrupt disable, pointer roll-over, soft reset)
pub const CONTROL2: u8 = 0x0A;

/// SET/RESET period register
pub const PERIOD: u8 = 0x0B;

/// Human-readable register name for diagnostics
pub fn name(reg: u8) -> &'static str {
    match reg {
        X_LSB..=Z_MSB => "data",
        STATUS => "status",
        TEMP_LSB | TEMP_MSB => "temperature",
        CONTROL1 => "control1",
        CONTROL2 => "control2",
        PERIOD => "period",
        CHIP_ID => "chip id",
        _ => "register",
    }
}

// ============================================================================
// Bit fields
// ============================================================================

/// Bit span inside a single 8-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Register address
    pub reg: u8,
    /// Position of the least significant bit
    pub offset: u8,
    /// Number of bits
    pub width: u8,
    /// Field name used in diagnostics and errors
    pub name: &'static str,
}

impl Field {
    /// Whether the span lies inside one 8-bit register and is at least one bit wide
    pub const fn is_valid(self) -> bool {
        self.width > 0 && (self.offset as u16 + self.width as u16) <= 8
    }

    /// Largest value the field can hold (0 for an invalid span)
    pub const fn max(self) -> u8 {
        if !self.is_valid() {
            0
        } else if self.width == 8 {
            0xFF
        } else {
            (1u8 << self.width) - 1
        }
    }

    /// Mask of the field bits in register position (0 for an invalid span)
    pub const fn mask(self) -> u8 {
        if self.is_valid() {
            self.max() << self.offset
        } else {
            0
        }
    }

    /// Whether the field spans the whole register
    pub const fn is_full_width(self) -> bool {
        self.offset == 0 && self.width == 8
    }

    /// Replace the field bits of `current` with `value`, keeping all other bits
    pub const fn insert(self, current: u8, value: u8) -> u8 {
        if self.is_valid() {
            (current & !self.mask()) | ((value << self.offset) & self.mask())
        } else {
            current
        }
    }

    /// Extract the field value from a full register value
    pub const fn extract(self, current: u8) -> u8 {
        if self.is_valid() {
            (current & self.mask()) >> self.offset
        } else {
            0
        }
    }
}

/// Operating mode, CONTROL1[1:0]
pub const MODE: Field = Field {
    reg: CONTROL1,
    offset: 0,
    width: 2,
    name: "mode",
};

/// Output data rate, CONTROL1[3:2]
pub const OUTPUT_RATE: Field = Field {
    reg: CONTROL1,
    offset: 2,
    width: 2,
    name: "output rate",
};

/// Full scale range, CONTROL1[5:4]
pub const FULL_SCALE: Field = Field {
    reg: CONTROL1,
    offset: 4,
    width: 2,
    name: "full scale",
};

/// Over sample ratio, CONTROL1[7:6]
pub const OVER_SAMPLE: Field = Field {
    reg: CONTROL1,
    offset: 6,
    width: 2,
    name: "over sample",
};

/// Interrupt pin disable, CONTROL2[0] (1 = disabled)
pub const INT_DISABLE: Field = Field {
    reg: CONTROL2,
    offset: 0,
    width: 1,
    name: "interrupt",
};

/// Pointer roll-over enable, CONTROL2[6]
pub const POINTER_ROLL_OVER: Field = Field {
    reg: CONTROL2,
    offset: 6,
    width: 1,
    name: "pointer roll over",
};

/// Soft reset trigger, CONTROL2[7]
pub const SOFT_RESET: Field = Field {
    reg: CONTROL2,
    offset: 7,
    width: 1,
    name: "soft reset",
};

/// SET/RESET period, whole register
pub const PERIOD_FBR: Field = Field {
    reg: PERIOD,
    offset: 0,
    width: 8,
    name: "period",
};

bitflags! {
    /// Status register flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// New data is ready to be read
        const DRDY = 0b0000_0001;
        /// A channel exceeded the full scale range
        const OVL = 0b0000_0010;
        /// Data was skipped because it was not read in time
        const DOR = 0b0000_0100;
    }
}

// ============================================================================
// Timing and conversion constants
// ============================================================================

/// Settle time after the soft reset issued by init and `soft_reset`
pub const RESET_DELAY_MS: u32 = 100;

/// Settle time after the soft reset issued by deinit
pub const DEINIT_RESET_DELAY_MS: u32 = 10;

/// Data-ready polls before a vector read gives up
pub const DATA_READY_POLL_LIMIT: u16 = 5000;

/// Delay between data-ready polls
pub const DATA_READY_POLL_INTERVAL_MS: u32 = 10;

/// Milligauss per LSB at ±2 gauss (12000 LSB/G)
pub const RESOLUTION_2G: f32 = 1000.0 / 12000.0;

/// Milligauss per LSB at ±8 gauss (3000 LSB/G)
pub const RESOLUTION_8G: f32 = 1000.0 / 3000.0;

/// Temperature sensitivity (LSB/°C)
pub const TEMP_SENSITIVITY: f32 = 100.0;
