//! Timer interface trait
//!
//! This module defines the blocking delay interface that platform implementations must provide.

/// Timer interface trait
///
/// Platform implementations must provide this interface for blocking delays.
/// Drivers only wait through this trait, so tests can substitute a timer that
/// records the requested delays instead of sleeping.
pub trait TimerInterface {
    /// Delay for specified number of microseconds
    ///
    /// Blocks execution for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for specified number of milliseconds
    ///
    /// Blocks execution for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}
