//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use gy521::{Clock, Gy521Driver};
use std::cell::Cell;
use std::rc::Rc;

/// Controllable clock shared between a test and the driver
///
/// Both the millisecond and microsecond readings derive from one counter,
/// so advancing it moves the throttle and integration clocks together.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    current_us: Rc<Cell<u64>>,
}

impl MockClock {
    /// Creates a new `MockClock` starting at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by the given number of milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    /// Advances the clock by the given number of microseconds.
    pub fn advance_us(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

/// Driver type used throughout the tests
pub type MockDriver = Gy521Driver<MockInterface, MockClock>;

/// Create a mock driver for testing
/// Returns (driver, interface, clock) where interface and clock share state with the driver
pub fn create_mock_driver() -> (MockDriver, MockInterface, MockClock) {
    let interface = MockInterface::new();
    let clock = MockClock::new();
    let driver = Gy521Driver::new(interface.clone(), clock.clone());
    (driver, interface, clock)
}

/// Create a mock driver that has already been started
pub fn create_started_driver() -> (MockDriver, MockInterface, MockClock) {
    let (mut driver, interface, clock) = create_mock_driver();
    driver.begin().expect("Failed to start mock driver");
    interface.clear_operations();
    (driver, interface, clock)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
