//! Mock Timer implementation for testing

use crate::platform::traits::TimerInterface;

/// Mock Timer implementation
///
/// Uses simulated time for delays in test environment: every delay advances a
/// virtual clock and is counted, nothing actually sleeps.
#[derive(Debug)]
pub struct MockTimer {
    elapsed_us: u64,
    delay_calls: usize,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self {
            elapsed_us: 0,
            delay_calls: 0,
        }
    }

    /// Total simulated time in microseconds
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Total simulated time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_us / 1000
    }

    /// Number of delay requests
    pub fn delay_calls(&self) -> usize {
        self.delay_calls
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) {
        self.elapsed_us = self.elapsed_us.wrapping_add(us as u64);
        self.delay_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_delay_us() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.elapsed_us(), 0);

        timer.delay_us(1000);
        assert_eq!(timer.elapsed_us(), 1000);

        timer.delay_us(500);
        assert_eq!(timer.elapsed_us(), 1500);
        assert_eq!(timer.delay_calls(), 2);
    }

    #[test]
    fn test_mock_timer_delay_ms() {
        let mut timer = MockTimer::new();
        timer.delay_ms(100);
        timer.delay_ms(10);
        assert_eq!(timer.elapsed_ms(), 110);
        assert_eq!(timer.delay_calls(), 2);
    }
}
