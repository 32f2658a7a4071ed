//! Mock I2C implementation for testing
//!
//! `MockI2c` behaves like a register-mapped device: writes land in a 256-byte
//! register file and reads return it, with auto-incrementing addresses for
//! burst transfers. Individual registers can be scripted to return a sequence
//! of values (e.g. a status register that becomes ready after N polls) and any
//! register can be made to fail on read or write.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Bus opened
    Open,
    /// Bus closed
    Close,
    /// Register write transaction
    Write { addr: u8, reg: u8, data: Vec<u8> },
    /// Register read transaction
    Read { addr: u8, reg: u8, len: usize },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification and simulates a register file.
#[derive(Debug)]
pub struct MockI2c {
    registers: [u8; 256],
    transactions: Vec<I2cTransaction>,
    scripted: BTreeMap<u8, VecDeque<u8>>,
    fail_reads: BTreeSet<u8>,
    fail_writes: BTreeSet<u8>,
    fail_open: bool,
    fail_close: bool,
    open: bool,
}

impl MockI2c {
    /// Create a new mock I2C with every register cleared
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            transactions: Vec::new(),
            scripted: BTreeMap::new(),
            fail_reads: BTreeSet::new(),
            fail_writes: BTreeSet::new(),
            fail_open: false,
            fail_close: false,
            open: false,
        }
    }

    /// Builder form of [`Self::set_register`]
    pub fn with_register(mut self, reg: u8, value: u8) -> Self {
        self.set_register(reg, value);
        self
    }

    /// Preload a register value
    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.registers[reg as usize] = value;
    }

    /// Current register value
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[reg as usize]
    }

    /// Queue values returned by successive single-byte reads of `reg`
    ///
    /// Once the queue is drained, reads fall back to the register file.
    pub fn script_reads(&mut self, reg: u8, values: &[u8]) {
        self.scripted
            .entry(reg)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Make every read starting at `reg` fail with a bus error
    pub fn fail_read(&mut self, reg: u8) {
        self.fail_reads.insert(reg);
    }

    /// Make every write starting at `reg` fail with a NACK
    pub fn fail_write(&mut self, reg: u8) {
        self.fail_writes.insert(reg);
    }

    /// Make `open` fail
    pub fn fail_open(&mut self) {
        self.fail_open = true;
    }

    /// Make `close` fail
    pub fn fail_close(&mut self) {
        self.fail_close = true;
    }

    /// Whether the bus is currently open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Number of `open` calls
    pub fn open_count(&self) -> usize {
        self.count(|t| matches!(t, I2cTransaction::Open))
    }

    /// Number of `close` calls
    pub fn close_count(&self) -> usize {
        self.count(|t| matches!(t, I2cTransaction::Close))
    }

    /// Number of read transactions starting at `reg`
    pub fn read_count(&self, reg: u8) -> usize {
        self.count(|t| matches!(t, I2cTransaction::Read { reg: r, .. } if *r == reg))
    }

    /// Number of write transactions starting at `reg`
    pub fn write_count(&self, reg: u8) -> usize {
        self.count(|t| matches!(t, I2cTransaction::Write { reg: r, .. } if *r == reg))
    }

    fn count(&self, pred: impl Fn(&I2cTransaction) -> bool) -> usize {
        self.transactions.iter().filter(|t| pred(t)).count()
    }
}

impl Default for MockI2c {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cInterface for MockI2c {
    fn open(&mut self) -> Result<()> {
        self.transactions.push(I2cTransaction::Open);
        if self.fail_open {
            return Err(PlatformError::InitializationFailed);
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.transactions.push(I2cTransaction::Close);
        if self.fail_close {
            return Err(PlatformError::InitializationFailed);
        }
        self.open = false;
        Ok(())
    }

    fn read_register(&mut self, addr: u8, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Read {
            addr,
            reg,
            len: buffer.len(),
        });
        if !self.open {
            return Err(PlatformError::I2c(I2cError::NotOpen));
        }
        if self.fail_reads.contains(&reg) {
            return Err(PlatformError::I2c(I2cError::BusError));
        }

        if buffer.len() == 1 {
            if let Some(value) = self.scripted.get_mut(&reg).and_then(|q| q.pop_front()) {
                buffer[0] = value;
                return Ok(());
            }
        }

        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self.registers[reg.wrapping_add(i as u8) as usize];
        }
        Ok(())
    }

    fn write_register(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Write {
            addr,
            reg,
            data: data.to_vec(),
        });
        if !self.open {
            return Err(PlatformError::I2c(I2cError::NotOpen));
        }
        if self.fail_writes.contains(&reg) {
            return Err(PlatformError::I2c(I2cError::Nack));
        }

        for (i, &b) in data.iter().enumerate() {
            self.registers[reg.wrapping_add(i as u8) as usize] = b;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_i2c_requires_open() {
        let mut i2c = MockI2c::new();
        let mut buf = [0u8; 1];
        assert_eq!(
            i2c.read_register(0x1A, 0x00, &mut buf),
            Err(PlatformError::I2c(I2cError::NotOpen))
        );
        assert_eq!(i2c.read_count(0x00), 1);
    }

    #[test]
    fn test_mock_i2c_write_then_burst_read() {
        let mut i2c = MockI2c::new();
        i2c.open().unwrap();
        i2c.write_register(0x1A, 0x00, &[0x70, 0x17, 0x90]).unwrap();

        let mut buf = [0u8; 3];
        i2c.read_register(0x1A, 0x00, &mut buf).unwrap();
        assert_eq!(buf, [0x70, 0x17, 0x90]);

        assert_eq!(
            i2c.transactions()[1],
            I2cTransaction::Write {
                addr: 0x1A,
                reg: 0x00,
                data: vec![0x70, 0x17, 0x90]
            }
        );
        assert_eq!(
            i2c.transactions()[2],
            I2cTransaction::Read {
                addr: 0x1A,
                reg: 0x00,
                len: 3
            }
        );
    }

    #[test]
    fn test_mock_i2c_scripted_reads_then_register_file() {
        let mut i2c = MockI2c::new().with_register(0x06, 0x05);
        i2c.open().unwrap();
        i2c.script_reads(0x06, &[0x00, 0x00]);

        let mut buf = [0u8; 1];
        i2c.read_register(0x1A, 0x06, &mut buf).unwrap();
        assert_eq!(buf[0], 0x00);
        i2c.read_register(0x1A, 0x06, &mut buf).unwrap();
        assert_eq!(buf[0], 0x00);
        i2c.read_register(0x1A, 0x06, &mut buf).unwrap();
        assert_eq!(buf[0], 0x05);
    }

    #[test]
    fn test_mock_i2c_failure_injection() {
        let mut i2c = MockI2c::new();
        i2c.open().unwrap();
        i2c.fail_read(0x09);
        i2c.fail_write(0x0A);

        let mut buf = [0u8; 1];
        assert_eq!(
            i2c.read_register(0x1A, 0x09, &mut buf),
            Err(PlatformError::I2c(I2cError::BusError))
        );
        assert_eq!(
            i2c.write_register(0x1A, 0x0A, &[0x80]),
            Err(PlatformError::I2c(I2cError::Nack))
        );
        assert_eq!(i2c.register(0x0A), 0x00);
    }

    #[test]
    fn test_mock_i2c_open_close_counters() {
        let mut i2c = MockI2c::new();
        i2c.open().unwrap();
        assert!(i2c.is_open());
        i2c.close().unwrap();
        assert!(!i2c.is_open());
        assert_eq!(i2c.open_count(), 1);
        assert_eq!(i2c.close_count(), 1);

        i2c.clear_transactions();
        assert!(i2c.transactions().is_empty());
    }
}
